use anyhow::{Context, Result};
use clap::Parser;
use interiors_vision::{
    config::ConfigLoader,
    db,
    repositories::{InquiryRepository, InquiryStore},
};
use std::sync::Arc;

/// Prints the most recent stored inquiries as JSON lines.
#[derive(Parser, Debug)]
#[command(name = "list_inquiries")]
struct Args {
    /// Maximum number of inquiries to print, newest first
    #[arg(long, default_value_t = 20)]
    limit: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let loader = ConfigLoader::new();
    let config = loader.load().context("loading configuration")?;

    let db = db::init_and_migrate(&config)
        .await
        .context("initializing database connection pool")?;
    let store = InquiryRepository::new(Arc::new(db));

    let total = store.count().await.context("counting inquiries")?;
    let inquiries = store
        .list_recent(args.limit)
        .await
        .context("querying inquiries")?;

    for inquiry in &inquiries {
        println!(
            "{}",
            serde_json::to_string(inquiry).context("rendering inquiry")?
        );
    }
    eprintln!("Showing {} of {} inquiries.", inquiries.len(), total);

    Ok(())
}

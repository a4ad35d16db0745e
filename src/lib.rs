//! # Interiors Vision Inquiry Library
//!
//! This library provides the contact-form inquiry pipeline: the shared schema
//! and validator, the persistence store, the submission endpoint and the
//! client-side submission flow.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod server;
pub mod telemetry;
pub use migration;

//! Command implementations

pub mod ask;
pub mod config;
pub mod ingest;

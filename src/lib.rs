pub mod classifier;
pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod error;
pub mod extraction;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod record;
pub mod types;

// Collaborator contracts and their adapters
pub mod app;
pub mod infra;

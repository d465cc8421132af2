// Library interface for fakescan
// This allows integration tests to access internal modules

pub mod api;
pub mod config;
pub mod errors;
pub mod report;
pub mod workflow;

// Re-export commonly used types
pub use api::{HttpPredictionService, PredictionService};
pub use config::AppConfig;
pub use errors::FakescanError;
pub use workflow::{Phase, SelectedFile, UploadWorkflow};

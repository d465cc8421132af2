// Error types for fakescan

use crate::api::ClientError;
use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum FakescanError {
    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },
    #[snafu(display("Error parsing config file"))]
    ConfigParseError { source: serde_json::Error },

    // User input validation errors
    #[snafu(display("Invalid video file: {path}"))]
    InvalidVideoFile { path: String },

    // Prediction service errors
    #[snafu(display("Prediction service error"))]
    ServiceError { source: ClientError },
    #[snafu(display("Prediction failed: {message}"))]
    PredictionRejected { message: String },
    #[snafu(display("Sign-in failed: {reason}"))]
    SignInFailed { reason: String },

    // UI errors
    #[snafu(display("Could not start the user interface: {reason}"))]
    UiStartError { reason: String },
}

impl From<ClientError> for FakescanError {
    fn from(value: ClientError) -> Self {
        FakescanError::ServiceError { source: value }
    }
}

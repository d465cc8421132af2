// Prediction service wire types and the seam the workflow talks through

pub mod http;

use std::{fmt, io};

use serde::Deserialize;
use snafu::Snafu;

use crate::workflow::SelectedFile;

pub use http::HttpPredictionService;

/// Multipart field the server reads the uploaded video from.
pub const VIDEO_FIELD: &str = "video";
pub const PREDICT_PATH: &str = "/predict";
pub const HISTORY_PATH: &str = "/api/history";
pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";

#[derive(Debug, Snafu)]
pub enum ClientError {
    #[snafu(display("Could not reach the prediction service: {source}"))]
    Transport { source: reqwest::Error },
    #[snafu(display("Could not read {path}: {source}"))]
    ReadFile { path: String, source: io::Error },
    #[snafu(display("Unexpected response from the prediction service: {source}"))]
    Malformed { source: serde_json::Error },
    #[snafu(display("Sign-in required"))]
    SignInRequired,
    #[snafu(display("Invalid credentials"))]
    InvalidCredentials,
    #[snafu(display("Could not start the network runtime: {source}"))]
    Runtime { source: io::Error },
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        ClientError::Transport { source: value }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(value: serde_json::Error) -> Self {
        ClientError::Malformed { source: value }
    }
}

/// Classification outcome for one uploaded video.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub label: String,
    /// Probability of `label`, in [0, 1]
    pub confidence: f64,
    /// Kept as sent so it renders exactly as the server wrote it
    pub inference_time: serde_json::Number,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

/// Body of a `/predict` response.
///
/// The server either reports an application error or a prediction. Bodies matching
/// neither shape are rejected at parse time instead of rendering blank fields.
#[derive(Clone, Debug, PartialEq)]
pub enum PredictResponse {
    Rejected { error: String },
    Prediction(PredictionResult),
}

#[derive(Deserialize)]
struct ErrorField {
    #[serde(default)]
    error: Option<String>,
}

impl PredictResponse {
    /// A non-empty `error` wins over any prediction fields; `null` or `""` means no error.
    pub fn parse(body: &str) -> Result<Self, ClientError> {
        let ErrorField { error } = serde_json::from_str(body)?;
        match error {
            Some(error) if !error.is_empty() => Ok(PredictResponse::Rejected { error }),
            _ => Ok(PredictResponse::Prediction(serde_json::from_str(body)?)),
        }
    }
}

/// One past prediction as listed by the history endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub filename: String,
    pub label: String,
    pub confidence: f64,
    pub created_at: String,
    #[serde(default)]
    pub id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    history: Vec<HistoryEntry>,
}

pub fn parse_history(body: &str) -> Result<Vec<HistoryEntry>, ClientError> {
    let response: HistoryResponse = serde_json::from_str(body)?;
    Ok(response.history)
}

#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Remote side of the upload workflow.
///
/// Calls block until the server answers; the workflow runs them off the UI thread.
pub trait PredictionService: Send + Sync {
    fn predict(&self, file: &SelectedFile) -> Result<PredictResponse, ClientError>;
    fn history(&self) -> Result<Vec<HistoryEntry>, ClientError>;
    fn sign_in(&self, credentials: &Credentials) -> Result<(), ClientError>;
    fn sign_out(&self) -> Result<(), ClientError>;
}

use log::{debug, info};
use reqwest::{
    Response,
    multipart::{Form, Part},
};
use tokio::runtime::Runtime;

use super::{
    ClientError, Credentials, HISTORY_PATH, HistoryEntry, LOGIN_PATH, LOGOUT_PATH,
    PREDICT_PATH, PredictResponse, PredictionService, VIDEO_FIELD, parse_history,
};
use crate::workflow::SelectedFile;

/// `PredictionService` backed by the classification web server.
///
/// The server keeps the signed-in user in a session cookie, so one instance should be
/// shared by everything that talks to the same server.
pub struct HttpPredictionService {
    base_url: String,
    client: reqwest::Client,
    runtime: Runtime,
}

impl HttpPredictionService {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("fakescan-http")
            .enable_all()
            .build()
            .map_err(|e| ClientError::Runtime { source: e })?;
        let client = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            runtime,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Unauthenticated requests are redirected to the login page, which is HTML.
fn ensure_session(response: &Response) -> Result<(), ClientError> {
    if response.url().path() == LOGIN_PATH {
        return Err(ClientError::SignInRequired);
    }
    Ok(())
}

impl HttpPredictionService {
    async fn send_prediction(&self, form: Form) -> Result<PredictResponse, ClientError> {
        let response = self
            .client
            .post(self.endpoint(PREDICT_PATH))
            .multipart(form)
            .send()
            .await?;
        ensure_session(&response)?;
        // error bodies come with 4xx/5xx statuses, so the status is not checked
        let status = response.status();
        let body = response.text().await?;
        debug!("Prediction response ({}): {}", status, body);
        PredictResponse::parse(&body)
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        let response = self.client.get(self.endpoint(HISTORY_PATH)).send().await?;
        ensure_session(&response)?;
        let body = response.text().await?;
        parse_history(&body)
    }

    async fn send_login(&self, credentials: &Credentials) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.endpoint(LOGIN_PATH))
            .form(&[
                ("email", credentials.email.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;
        // a rejected login renders the login page again instead of redirecting
        if response.url().path() == LOGIN_PATH {
            return Err(ClientError::InvalidCredentials);
        }
        Ok(())
    }

    /// The server drops the session and redirects to the login page, which is also
    /// where a request without a session ends up.
    async fn send_logout(&self) -> Result<(), ClientError> {
        self.client
            .get(self.endpoint(LOGOUT_PATH))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl PredictionService for HttpPredictionService {
    fn predict(&self, file: &SelectedFile) -> Result<PredictResponse, ClientError> {
        let bytes = file.read_bytes().map_err(|e| ClientError::ReadFile {
            path: file.display_path(),
            source: e,
        })?;
        debug!(
            "Uploading {} ({} bytes, {})",
            file.file_name(),
            bytes.len(),
            file.mime_type()
        );
        let part = Part::bytes(bytes)
            .file_name(file.file_name().to_string())
            .mime_str(file.mime_type())?;
        let form = Form::new().part(VIDEO_FIELD, part);

        self.runtime.block_on(self.send_prediction(form))
    }

    fn history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        self.runtime.block_on(self.fetch_history())
    }

    fn sign_in(&self, credentials: &Credentials) -> Result<(), ClientError> {
        self.runtime.block_on(self.send_login(credentials))?;
        info!("Signed in to {} as {}", self.base_url, credentials.email);
        Ok(())
    }

    fn sign_out(&self) -> Result<(), ClientError> {
        self.runtime.block_on(self.send_logout())?;
        info!("Signed out of {}", self.base_url);
        Ok(())
    }
}

use std::{path::Path, sync::Arc};

use log::info;

use fakescan::{
    FakescanError, HttpPredictionService, PredictionService, SelectedFile, UploadWorkflow,
    api::Credentials,
    report,
    workflow::{InlineSpawner, NoPreview, SignInState, view::history_rows},
};

fn sign_in(workflow: &mut UploadWorkflow, credentials: Credentials) -> Result<(), FakescanError> {
    workflow.sign_in(credentials);
    workflow.poll();
    match workflow.sign_in_state() {
        SignInState::SignedIn { email } => {
            info!("Signed in as {}", email);
            Ok(())
        }
        SignInState::Rejected { reason } => Err(FakescanError::SignInFailed {
            reason: reason.clone(),
        }),
        state => Err(FakescanError::SignInFailed {
            reason: format!("unexpected sign-in state {:?}", state),
        }),
    }
}

/// Runs one select-submit-refresh cycle without a window and prints what the upload
/// screen would show.
pub(crate) fn predict(
    server_url: &str,
    file: &Path,
    credentials: Option<Credentials>,
) -> Result<(), FakescanError> {
    if !file.is_file() {
        return Err(FakescanError::InvalidVideoFile {
            path: format!("{:?}", file),
        });
    }
    let service = Arc::new(HttpPredictionService::new(server_url)?);
    // inline tasks finish before each call returns, so one poll applies them
    let mut workflow = UploadWorkflow::new(service, Box::new(InlineSpawner), Box::new(NoPreview));
    if let Some(credentials) = credentials {
        sign_in(&mut workflow, credentials)?;
    }

    workflow.select_file(Some(SelectedFile::from_path(file)));
    workflow.submit();
    workflow.poll();

    if let Some(notice) = workflow.notice() {
        return Err(FakescanError::PredictionRejected {
            message: notice.text(),
        });
    }
    if let Some(result) = workflow.result() {
        println!("{}", report::result_report(result));
    }
    if workflow.history_visible() {
        println!();
        println!("{}", report::history_table(workflow.history()));
    }
    Ok(())
}

pub(crate) fn history(
    server_url: &str,
    credentials: Option<Credentials>,
) -> Result<(), FakescanError> {
    let service = HttpPredictionService::new(server_url)?;
    if let Some(credentials) = credentials {
        service.sign_in(&credentials)?;
    }
    let entries = service.history()?;
    println!("{}", report::history_table(&history_rows(&entries)));
    Ok(())
}

mod headless;
mod ui;

use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use log::error;

use fakescan::{
    AppConfig, FakescanError, HttpPredictionService, PredictionService, SelectedFile,
    api::Credentials,
};
use ui::FakescanApp;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Base URL of the prediction server, overrides the saved config
    #[arg(short, long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the upload window
    Gui {
        /// Video to preselect
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Classify one video and print the result and the updated history
    Predict {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(long, env = "FAKESCAN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Print the prediction history
    History {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(long, env = "FAKESCAN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

fn credentials(email: Option<String>, password: Option<String>) -> Option<Credentials> {
    Some(Credentials {
        email: email?,
        password: password.unwrap_or_default(),
    })
}

fn gui(
    app_config: AppConfig,
    server_url: String,
    file: Option<PathBuf>,
) -> Result<(), FakescanError> {
    let initial_file = match file {
        Some(path) if !path.is_file() => {
            return Err(FakescanError::InvalidVideoFile {
                path: format!("{:?}", path),
            });
        }
        path => path.map(SelectedFile::from_path),
    };
    let service: Arc<dyn PredictionService> = Arc::new(HttpPredictionService::new(&server_url)?);

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_title("Fakescan")
        .with_inner_size(app_config.window_size.clone())
        .with_drag_and_drop(true);

    eframe::run_native(
        "Fakescan",
        native_options,
        Box::new(|cc| {
            Ok(Box::new(FakescanApp::new(
                service,
                server_url,
                app_config,
                initial_file,
                cc,
            )))
        }),
    )
    .map_err(|e| FakescanError::UiStartError {
        reason: e.to_string(),
    })
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    if let Err(e) = ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    }) {
        error!("Could not set Ctrl-C handler: {}", e);
    }

    let app_config = AppConfig::from_local_file().unwrap_or_default();
    let server_url = cli
        .server
        .clone()
        .unwrap_or_else(|| app_config.server_url.clone());

    let outcome = match cli.command {
        Commands::Gui { file } => gui(app_config, server_url, file),
        Commands::Predict {
            file,
            email,
            password,
        } => headless::predict(&server_url, &file, credentials(email, password)),
        Commands::History { email, password } => {
            headless::history(&server_url, credentials(email, password))
        }
    };

    if let Err(e) = outcome {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

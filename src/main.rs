use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nutri_lens::ai::{mime, AnalysisService, GeminiAnalyzer};
use nutri_lens::models::Config;
use nutri_lens::server::{self, ErrorResponse, FoodNamesResponse, NutritionResponse};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "nutri-lens")]
#[command(about = "Food photo and nutrition analysis proxy for Gemini")]
struct CliArgs {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP proxy (default).
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, short, default_value_t = 5000)]
        port: u16,
    },
    /// Name the foods in a local photo.
    Photo {
        #[arg(value_name = "PATH")]
        path: PathBuf,
        /// Override the sniffed MIME type.
        #[arg(long)]
        mime_type: Option<String>,
    },
    /// Estimate nutrition for a text list of foods.
    Text {
        #[arg(value_name = "TEXT")]
        text: String,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nutri_lens=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if config.api_key().is_err() {
        warn!("GEMINI_API_KEY is not set; analysis requests will fail with a configuration error");
    }

    let analyzer = Arc::new(GeminiAnalyzer::from_config(&config));

    match args.command.unwrap_or_default() {
        Command::Serve { host, port } => serve(analyzer, &config, &host, port).await,
        Command::Photo { path, mime_type } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let mime_type = mime::resolve_image_mime(mime_type.as_deref(), &bytes);

            let outcome = analyzer
                .analyze_photo(&bytes, &mime_type)
                .await
                .map(|food_names| FoodNamesResponse { food_names });
            print_outcome(outcome)
        }
        Command::Text { text } => {
            let outcome = analyzer
                .analyze_text(&text)
                .await
                .map(|nutrition_info| NutritionResponse { nutrition_info });
            print_outcome(outcome)
        }
    }
}

async fn serve(
    analyzer: Arc<GeminiAnalyzer>,
    config: &Config,
    host: &str,
    port: u16,
) -> Result<()> {
    let app = server::router(analyzer, config.max_upload_bytes);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        "Listening on {} (model: {}, timeout: {:?})",
        addr, config.gemini_model, config.request_timeout
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down...");
}

/// Prints the response body; on failure prints the error body and exits non-zero.
fn print_outcome<T: Serialize>(outcome: nutri_lens::Result<T>) -> Result<()> {
    match outcome {
        Ok(body) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Err(e) => {
            error!("Analysis failed ({}): {}", e.kind(), e);
            let body = ErrorResponse {
                message: e.to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&body)?);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_serve() {
        let args = CliArgs::parse_from(["nutri-lens"]);
        assert!(args.command.is_none());
        assert!(matches!(
            Command::default(),
            Command::Serve { port: 5000, .. }
        ));
    }

    #[test]
    fn test_parse_photo_subcommand() {
        let args =
            CliArgs::parse_from(["nutri-lens", "photo", "lunch.jpg", "--mime-type", "image/jpeg"]);
        match args.command {
            Some(Command::Photo { path, mime_type }) => {
                assert_eq!(path, PathBuf::from("lunch.jpg"));
                assert_eq!(mime_type.as_deref(), Some("image/jpeg"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_port() {
        let args = CliArgs::parse_from(["nutri-lens", "serve", "--port", "8080"]);
        assert!(matches!(
            args.command,
            Some(Command::Serve { port: 8080, .. })
        ));
    }
}

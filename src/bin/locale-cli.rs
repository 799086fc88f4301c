use std::path::PathBuf;

use clap::{Parser, Subcommand};
use locale_service::config::{load_config, ConfigError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "locale-cli")]
#[command(about = "Management CLI for the locale service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the service which locale it would pick
    Detect {
        /// Accept-Language header to send
        #[arg(short, long)]
        accept_language: Option<String>,

        /// X-Forwarded-For header to send
        #[arg(short, long)]
        forwarded_for: Option<String>,
    },
    /// Check service health
    Health,
    /// Print the rendered sitemap
    Sitemap,
    /// Validate a config file without starting the service
    CheckConfig {
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Detect { accept_language, forwarded_for } => {
            let mut headers = HeaderMap::new();
            if let Some(value) = accept_language {
                headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&value)?);
            }
            if let Some(value) = forwarded_for {
                headers.insert("x-forwarded-for", HeaderValue::from_str(&value)?);
            }
            let res = client
                .get(format!("{}/api/detect-locale", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_json(res).await?;
        }
        Commands::Sitemap => {
            let res = client.get(format!("{}/sitemap.xml", cli.url)).send().await?;
            println!("{}", res.text().await?);
        }
        Commands::CheckConfig { path } => match load_config(&path) {
            Ok(config) => {
                println!("OK: strategy = {}", config.locale.strategy.as_str());
            }
            Err(ConfigError::Validation(errors)) => {
                for error in &errors {
                    eprintln!("error: {}", error);
                }
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Detection failures still carry a JSON body, so print it regardless of
/// status.
async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Service returned status {}", status);
    }

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}

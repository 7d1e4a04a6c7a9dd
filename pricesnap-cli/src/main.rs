use clap::{Parser, ValueEnum};
use pricesnap_app::infrastructure::http::HeaderRandomizer;
use pricesnap_app::{AppContext, ExtractedRecord};
use pricesnap_errors::AppError;
use std::path::PathBuf;
use std::process::ExitCode;

const FAILURE_MESSAGE: &str = "Failed to scrape data";

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// One `field: value` line per field
    #[default]
    Text,
    /// The record as a JSON object
    Json,
}

/// Scrape name, price, currency and promotion from a product page
#[derive(Parser, Debug)]
#[command(name = "pricesnap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Product page URL
    url: String,

    /// Output format
    #[arg(long, short, default_value = "text")]
    output: OutputFormat,

    /// Where to write the fetched HTML (overrides PRICESNAP_DEBUG_ARTIFACT)
    #[arg(long, conflicts_with = "no_debug_artifact")]
    debug_artifact: Option<PathBuf>,

    /// Do not write the fetched HTML to disk
    #[arg(long)]
    no_debug_artifact: bool,

    /// User-Agent to rotate through instead of the built-in pool (repeatable)
    #[arg(long)]
    user_agent: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv_override().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(Some(_)) => ExitCode::SUCCESS,
        Ok(None) => {
            println!("{}", FAILURE_MESSAGE);
            ExitCode::from(1)
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<Option<ExtractedRecord>, AppError> {
    let mut ctx = AppContext::from_env()?;

    if cli.no_debug_artifact || cli.debug_artifact.is_some() {
        let mut config = (*ctx.config).clone();
        config.debug_artifact = cli.debug_artifact.clone();
        ctx.config = config.into();
    }

    let mut scrape = ctx.scrape_product(&cli.url)?;
    if !cli.user_agent.is_empty() {
        scrape = scrape.with_headers(HeaderRandomizer::with_user_agents(cli.user_agent.clone()));
    }

    let record = scrape.scrape().await;
    if let Some(record) = &record {
        print_record(record, cli.output);
    }
    Ok(record)
}

fn print_record(record: &ExtractedRecord, output: OutputFormat) {
    match output {
        OutputFormat::Text => {
            println!("\nScraped Data:");
            for (key, value) in record.fields() {
                println!("{}: {}", key, value);
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(record) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize record: {}", e),
        },
    }
}

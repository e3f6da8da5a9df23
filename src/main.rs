use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use esoc_fill::{FillConfig, FormFiller};

#[derive(Parser, Debug)]
#[command(name = "esoc-fill", version, about = "Fill the E-SOC intake paperwork PDF")]
struct Cli {
    /// Template PDF (overrides ESOC_TEMPLATE_PATH)
    #[arg(long, global = true)]
    template: Option<PathBuf>,

    /// TrueType font carrying U+2714 (overrides ESOC_FONT_PATH)
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    /// Required template page count (overrides ESOC_EXPECTED_PAGES)
    #[arg(long, global = true)]
    expected_pages: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP fill service
    Serve {
        /// Bind address (overrides ESOC_ADDR)
        #[arg(long)]
        addr: Option<String>,
    },
    /// Fill one request payload and write the PDF
    Fill {
        /// JSON file shaped like `{ "patientData": {...}, "medicationRows": [...] }`
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("esoc_fill=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = FillConfig::from_env()?;
    if let Some(template) = cli.template {
        config.template_path = template;
    }
    if let Some(font) = cli.font {
        config.font_path = font;
    }
    if cli.expected_pages.is_some() {
        config.expected_pages = cli.expected_pages;
    }

    match cli.command {
        Command::Serve { addr } => {
            if let Some(addr) = addr {
                config.addr = addr;
            }
            let addr = config.addr.clone();
            tracing::info!(
                template = %config.template_path.display(),
                font = %config.font_path.display(),
                "starting E-SOC fill service"
            );
            let filler = Arc::new(FormFiller::new(config)?);
            esoc_fill::server::serve(filler, &addr)
                .await
                .with_context(|| format!("server on {addr} failed"))?;
        }
        Command::Fill { input, output } => {
            let body = std::fs::read(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let filler = FormFiller::new(config)?;
            let filled = tokio::task::spawn_blocking(move || filler.fill_json(&body)).await??;
            std::fs::write(&output, &filled.bytes)
                .with_context(|| format!("writing {}", output.display()))?;
            tracing::info!(
                output = %output.display(),
                bytes = filled.bytes.len(),
                checkmarks = filled.metrics.checkmarks(),
                text = filled.metrics.text_fields(),
                signatures = filled.metrics.signatures_embedded(),
                "filled document written"
            );
        }
    }

    Ok(())
}

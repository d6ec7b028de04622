use anyhow::{Context, Result};
use apply_pipeline::applypack::{self, ApplyPack};
use apply_pipeline::core::{ConfigManager, GeminiClient};
use apply_pipeline::{intake, utils};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "applyforge")]
#[command(about = "Job-application pipeline: issue intake and apply-pack generation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a job opening from an issue-form event into the tracker
    Intake,
    /// Generate a tailored resume and outreach pack for one job
    ApplyPack {
        /// Master resume in LaTeX
        #[arg(long)]
        master: PathBuf,
        /// File holding the job description text
        #[arg(long)]
        jd: PathBuf,
        #[arg(long)]
        company: String,
        #[arg(long)]
        role: String,
        #[arg(long, default_value = "")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the defined stdout lines stay machine-readable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Intake => {
            let config = ConfigManager::load_intake()?;
            intake::run_intake(&config).await?;
        }
        Command::ApplyPack {
            master,
            jd,
            company,
            role,
            url,
        } => {
            let master_latex = utils::read_file_content(&master).await?;
            let job_description = utils::read_file_content(&jd).await?;

            let config = ConfigManager::load_apply_pack()?;
            let client = GeminiClient::new(config.api_key, config.model, config.api_base)?;

            let pack = applypack::generate_apply_pack(
                &client,
                &master_latex,
                &job_description,
                &company,
                &role,
                &url,
            )
            .await?;

            write_artifacts(&pack, &company, &role).await?;

            println!(
                "{}",
                serde_json::to_string_pretty(&pack).context("Failed to serialize apply pack")?
            );
        }
    }

    Ok(())
}

async fn write_artifacts(pack: &ApplyPack, company: &str, role: &str) -> Result<()> {
    let environment = ConfigManager::load_environment();
    utils::ensure_directory(&environment.output_path).await?;

    let tex_path = utils::artifact_file_path(&environment.output_path, company, role, "tex");
    utils::write_file_content(&tex_path, &pack.tailored_latex).await?;

    let outreach_path = utils::artifact_file_path(&environment.output_path, company, role, "md");
    utils::write_file_content(&outreach_path, &pack.outreach.to_markdown()).await?;

    tracing::info!(
        "Wrote artifacts: {} and {}",
        tex_path.display(),
        outreach_path.display()
    );

    Ok(())
}

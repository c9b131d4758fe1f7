//! Impact Award CLI: validate, save and submit recommendations from the shell.
//!
//! Reads the same environment as the API server (LOCAL_STORAGE_PATH,
//! AWARD_DELIVERY_URL, ...), so drafts and submissions land in the same store.

use anyhow::Context;
use award_cli::{
    evidence_files, init_tracing, print_json, read_draft_file, render_summary, submit,
    SubmitOutcome, SUBMISSION_REJECTED_MESSAGE,
};
use award_core::validation::validate_step;
use award_core::Config;
use award_services::{DeliveryClient, DraftAutosaver, RecommendationService};
use award_storage::create_storage;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "award", about = "Impact Award recommendation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the required fields of one form step
    ValidateStep {
        /// Zero-based step index
        index: usize,
        /// JSON file holding the recommendation fields
        #[arg(long)]
        draft: PathBuf,
        /// Evidence file name (repeatable)
        #[arg(long = "evidence")]
        evidence: Vec<String>,
    },
    /// Draft operations
    Draft {
        #[command(subcommand)]
        sub: DraftCommands,
    },
    /// Submit a recommendation and deliver it
    Submit {
        /// JSON file holding the recommendation fields
        #[arg(long)]
        draft: PathBuf,
        /// Evidence file name (repeatable)
        #[arg(long = "evidence")]
        evidence: Vec<String>,
        /// Record the submission locally without calling the delivery endpoint
        #[arg(long)]
        no_deliver: bool,
    },
    /// List recorded submissions, oldest first
    Submissions,
}

#[derive(Subcommand)]
enum DraftCommands {
    /// Print the saved draft
    Show,
    /// Replace the saved draft with the contents of a file
    Save {
        /// JSON file holding the recommendation fields
        file: PathBuf,
    },
}

async fn open_service() -> anyhow::Result<(Config, RecommendationService)> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let store = create_storage(&config).await.context("Failed to open storage")?;
    let service = RecommendationService::from_config(store, &config);
    Ok((config, service))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::ValidateStep {
            index,
            draft,
            evidence,
        } => {
            let data = read_draft_file(&draft)?;
            let result = validate_step(index, &data, &evidence_files(&evidence));
            print_json(&result)?;
            if !result.valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Draft { sub } => match sub {
            DraftCommands::Show => {
                let (_, service) = open_service().await?;
                let draft = service.load_draft().await;
                print_json(&serde_json::json!({ "draft": draft }))?;
            }
            DraftCommands::Save { file } => {
                let data = read_draft_file(&file)?;
                let (config, service) = open_service().await?;
                let autosaver = DraftAutosaver::new(
                    service.clone(),
                    Duration::from_millis(config.autosave_quiet_period_ms()),
                );
                autosaver.schedule(data).await;
                autosaver.flush().await;
                let status = autosaver.status();
                autosaver.shutdown().await;
                print_json(&serde_json::json!({ "status": status, "label": status.label() }))?;
            }
        },
        Commands::Submit {
            draft,
            evidence,
            no_deliver,
        } => {
            let data = read_draft_file(&draft)?;
            let files = evidence_files(&evidence);
            let (config, service) = open_service().await?;

            let delivery = if no_deliver {
                None
            } else {
                Some(DeliveryClient::from_config(&config)?)
            };

            let outcome = submit(&service, delivery.as_ref(), data, &files).await?;
            match &outcome {
                SubmitOutcome::Rejected { .. } => eprintln!("{}", SUBMISSION_REJECTED_MESSAGE),
                SubmitOutcome::Recorded { receipt, .. } => eprintln!(
                    "{}",
                    render_summary(receipt.submission.data(), receipt.submission.evidence_files())
                ),
                SubmitOutcome::DeliveryFailed { receipt, message } => {
                    eprintln!(
                        "{}",
                        render_summary(receipt.submission.data(), receipt.submission.evidence_files())
                    );
                    eprintln!("메일 전송 실패: {}", message);
                }
            }
            print_json(&outcome.report())?;
            if outcome.exit_code() != 0 {
                return Ok(ExitCode::from(outcome.exit_code()));
            }
        }
        Commands::Submissions => {
            let (_, service) = open_service().await?;
            let submissions = service.list_submissions().await?;
            print_json(&serde_json::json!({
                "total": submissions.len(),
                "submissions": submissions,
            }))?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

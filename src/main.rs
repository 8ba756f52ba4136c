use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::io::AsyncReadExt;

use roofestimate::api::{DataResponse, QuoteDocument};
use roofestimate::app::{self, AppState};
use roofestimate::config::Settings;
use roofestimate::domain::{FieldEdit, JobField, RawJobInput};
use roofestimate::error::WizardError;
use roofestimate::logging;
use roofestimate::wizard::Wizard;

/// A single job or a list of jobs priced one after the other
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JobBatch {
    Many(Vec<RawJobInput>),
    One(RawJobInput),
}

impl JobBatch {
    fn into_jobs(self) -> Vec<RawJobInput> {
        match self {
            JobBatch::Many(jobs) => jobs,
            JobBatch::One(job) => vec![job],
        }
    }
}

/// Usage: roofestimate [job.json | -] [photo ...]
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings);

    tracing::info!(
        env = ?settings.env,
        analysis_delay_ms = settings.analysis_delay.as_millis() as u64,
        default_location = %settings.default_location,
        "Starting roof estimator"
    );

    let mut args = std::env::args().skip(1);
    let job_source = args.next().unwrap_or_else(|| "-".to_string());
    let photo_paths: Vec<String> = args.collect();

    let jobs = read_jobs(&job_source).await?;
    let photos = read_photos(&photo_paths).await?;

    let state = AppState::new(settings);
    let mut wizard = app::create_wizard(&state);

    for (index, raw) in jobs.into_iter().enumerate() {
        if index > 0 {
            wizard.reset();
        }

        for (name, data) in &photos {
            if let Err(e) = wizard.attach_photo(name.clone(), data.clone()) {
                return report_failure(&e);
            }
        }

        if let Err(e) = run_wizard(&mut wizard, raw).await {
            return report_failure(&e);
        }

        let document = DataResponse::new(QuoteDocument::from_wizard(&wizard));
        println!("{}", serde_json::to_string_pretty(&document)?);
    }

    Ok(())
}

async fn read_jobs(source: &str) -> Result<Vec<RawJobInput>> {
    let text = if source == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read job from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("Failed to read job file {}", source))?
    };

    let batch: JobBatch =
        serde_json::from_str(&text).context("Job is not a valid JSON object or array")?;
    let jobs = batch.into_jobs();
    if jobs.is_empty() {
        anyhow::bail!("Job list is empty");
    }
    Ok(jobs)
}

async fn read_photos(paths: &[String]) -> Result<Vec<(String, Vec<u8>)>> {
    let mut photos = Vec::with_capacity(paths.len());
    for path in paths {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read photo {}", path))?;
        let name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());
        photos.push((name, data));
    }
    Ok(photos)
}

/// Walk the wizard from the dimensions step to the finished estimate.
async fn run_wizard(wizard: &mut Wizard, raw: RawJobInput) -> Result<(), WizardError> {
    wizard.continue_to_dimensions()?;

    let edits = [
        FieldEdit::new(JobField::Length, raw.length),
        FieldEdit::new(JobField::Width, raw.width),
        FieldEdit::new(JobField::RoofType, raw.roof_type),
        FieldEdit::new(JobField::Condition, raw.condition),
        FieldEdit::new(JobField::Urgency, raw.urgency),
        FieldEdit::new(JobField::Location, raw.location),
    ];
    for edit in edits {
        let field = edit.field;
        match wizard.edit(edit) {
            Ok(()) => {}
            // A bad dimension is left for the analysis to report
            Err(WizardError::Validation(e)) if e.is_recoverable() => {
                tracing::warn!(field = %field, error = %e, "Field check failed");
            }
            Err(e) => return Err(e),
        }
    }

    wizard.start_analysis()?;
    wizard.generate_estimate().await?;
    Ok(())
}

fn report_failure(err: &WizardError) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&err.to_response())?);
    anyhow::bail!("{}", err)
}

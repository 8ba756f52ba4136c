//! Estimate wizard state machine.
//!
//! Four linear steps: photos, dimensions, analysis, estimate. Every transition
//! is an explicit method; calling one from the wrong step fails with
//! `WizardError::InvalidTransition` and leaves the wizard untouched.

use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::app::AppState;
use crate::domain::{CostEstimate, FieldEdit, Photo, RawJobInput};
use crate::error::{ValidationError, WizardError};
use crate::services::{AnalysisOutcome, AnalysisTicket};

/// Wizard step
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    CollectingPhotos,
    CollectingDimensions,
    Analyzing,
    Complete,
}

impl WizardStep {
    /// 1-based position for progress indicators
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::CollectingPhotos => 1,
            WizardStep::CollectingDimensions => 2,
            WizardStep::Analyzing => 3,
            WizardStep::Complete => 4,
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardStep::CollectingPhotos => write!(f, "collecting photos"),
            WizardStep::CollectingDimensions => write!(f, "collecting dimensions"),
            WizardStep::Analyzing => write!(f, "analyzing"),
            WizardStep::Complete => write!(f, "complete"),
        }
    }
}

#[derive(Debug)]
struct PendingAnalysis {
    generation: u64,
    token: CancellationToken,
}

/// One estimate session
#[derive(Debug)]
pub struct Wizard {
    state: Arc<AppState>,
    step: WizardStep,
    photos: Vec<Photo>,
    draft: RawJobInput,
    estimate: Option<CostEstimate>,
    last_error: Option<ValidationError>,
    generation: u64,
    pending: Option<PendingAnalysis>,
}

impl Wizard {
    pub fn new(state: Arc<AppState>) -> Self {
        let draft = state.reset_job();
        Self {
            state,
            step: WizardStep::CollectingPhotos,
            photos: Vec::new(),
            draft,
            estimate: None,
            last_error: None,
            generation: 0,
            pending: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    pub fn draft(&self) -> &RawJobInput {
        &self.draft
    }

    pub fn estimate(&self) -> Option<&CostEstimate> {
        self.estimate.as_ref()
    }

    /// Validation failure from the last analysis, if it bounced the wizard back
    pub fn last_error(&self) -> Option<&ValidationError> {
        self.last_error.as_ref()
    }

    pub fn is_analysis_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn require(&self, step: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            tracing::warn!(step = %self.step, action, "Rejected wizard transition");
            Err(WizardError::InvalidTransition {
                step: self.step,
                action,
            })
        }
    }

    // =========================================================================
    // Step 1: photos
    // =========================================================================

    pub fn attach_photo(
        &mut self,
        name: impl Into<String>,
        data: Vec<u8>,
    ) -> Result<Uuid, WizardError> {
        self.require(WizardStep::CollectingPhotos, "attach a photo")?;

        let photo = Photo::new(name, data);
        let id = photo.id;
        tracing::debug!(photo_id = %id, name = %photo.name, size = photo.size_bytes(), "Photo attached");
        self.photos.push(photo);
        Ok(id)
    }

    pub fn remove_photo(&mut self, id: Uuid) -> Result<(), WizardError> {
        self.require(WizardStep::CollectingPhotos, "remove a photo")?;

        let index = self
            .photos
            .iter()
            .position(|p| p.id == id)
            .ok_or(WizardError::PhotoNotFound(id))?;
        self.photos.remove(index);
        Ok(())
    }

    pub fn continue_to_dimensions(&mut self) -> Result<(), WizardError> {
        self.require(WizardStep::CollectingPhotos, "continue to dimensions")?;

        if self.photos.is_empty() {
            return Err(WizardError::NoPhotos);
        }
        if self.photos.len() < self.state.settings.min_recommended_photos {
            tracing::warn!(
                photos = self.photos.len(),
                recommended = self.state.settings.min_recommended_photos,
                "Fewer photos than recommended"
            );
        }

        self.step = WizardStep::CollectingDimensions;
        tracing::info!(photos = self.photos.len(), "Collecting dimensions");
        Ok(())
    }

    // =========================================================================
    // Step 2: dimensions
    // =========================================================================

    /// Apply a form edit. The value is stored even when its early check fails;
    /// the failure is returned for inline feedback.
    pub fn edit(&mut self, edit: FieldEdit) -> Result<(), WizardError> {
        self.require(WizardStep::CollectingDimensions, "edit the job")?;
        self.draft.apply(edit)?;
        Ok(())
    }

    /// Direct access to the typed draft setters
    pub fn draft_mut(&mut self) -> Result<&mut RawJobInput, WizardError> {
        self.require(WizardStep::CollectingDimensions, "edit the job")?;
        Ok(&mut self.draft)
    }

    pub fn back_to_photos(&mut self) -> Result<(), WizardError> {
        self.require(WizardStep::CollectingDimensions, "go back to photos")?;
        self.step = WizardStep::CollectingPhotos;
        Ok(())
    }

    /// Only checks that both dimensions are filled in; the validator runs when
    /// the estimate is generated.
    pub fn start_analysis(&mut self) -> Result<(), WizardError> {
        self.require(WizardStep::CollectingDimensions, "start the analysis")?;

        if !self.draft.has_dimensions() {
            return Err(WizardError::DimensionsIncomplete);
        }

        self.last_error = None;
        self.step = WizardStep::Analyzing;
        tracing::info!("Analyzing");
        Ok(())
    }

    // =========================================================================
    // Step 3: analysis
    // =========================================================================

    /// Start generating the estimate. Run the ticket, then hand its outcome to
    /// `complete_analysis`.
    pub fn begin_estimate(&mut self) -> Result<AnalysisTicket, WizardError> {
        self.require(WizardStep::Analyzing, "generate an estimate")?;

        if self.pending.is_some() {
            return Err(WizardError::AnalysisInProgress);
        }

        self.generation += 1;
        let token = CancellationToken::new();
        self.pending = Some(PendingAnalysis {
            generation: self.generation,
            token: token.clone(),
        });

        Ok(AnalysisTicket::new(
            self.generation,
            self.draft.clone(),
            Arc::clone(&self.state),
            token,
        ))
    }

    /// Apply the outcome of a ticket from `begin_estimate`.
    ///
    /// A successful estimate moves the wizard to `Complete`. A validation
    /// failure sends it back to `CollectingDimensions` with the error kept in
    /// `last_error`. Outcomes from a cancelled or superseded ticket are dropped.
    pub fn complete_analysis(
        &mut self,
        outcome: AnalysisOutcome,
    ) -> Result<&CostEstimate, WizardError> {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|p| p.generation == outcome.generation());
        if self.step != WizardStep::Analyzing || !current {
            tracing::debug!(
                generation = outcome.generation(),
                step = %self.step,
                "Discarding stale analysis outcome"
            );
            return Err(WizardError::AnalysisDiscarded);
        }
        self.pending = None;

        match outcome {
            AnalysisOutcome::Cancelled { .. } => Err(WizardError::AnalysisDiscarded),
            AnalysisOutcome::Finished { result: Err(e), .. } => {
                tracing::warn!(error = %e, field = %e.field(), "Estimate rejected, back to dimensions");
                self.step = WizardStep::CollectingDimensions;
                self.last_error = Some(e.clone());
                Err(WizardError::Validation(e))
            }
            AnalysisOutcome::Finished {
                result: Ok(estimate),
                ..
            } => {
                tracing::info!(
                    surface_area = %estimate.surface_area,
                    total_cost = %estimate.total_cost,
                    "Estimate complete"
                );
                self.step = WizardStep::Complete;
                self.last_error = None;
                Ok(self.estimate.insert(estimate))
            }
        }
    }

    /// `begin_estimate`, wait for the analysis, `complete_analysis`.
    pub async fn generate_estimate(&mut self) -> Result<&CostEstimate, WizardError> {
        let ticket = self.begin_estimate()?;
        let outcome = ticket.run().await;
        self.complete_analysis(outcome)
    }

    // =========================================================================
    // Reset
    // =========================================================================

    /// Start over from any step. A pending analysis is cancelled and its
    /// result will be discarded.
    pub fn reset(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.token.cancel();
        }

        self.step = WizardStep::CollectingPhotos;
        self.photos.clear();
        self.draft = self.state.reset_job();
        self.estimate = None;
        self.last_error = None;
        tracing::info!("Wizard reset");
    }
}

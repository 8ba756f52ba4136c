//! Simulated roof analysis.
//!
//! The "analysis" is a minimum dwell before the estimate is shown. Photos are
//! never looked at, and the delay has no influence on the numbers: once the
//! dwell is over, validation and pricing run synchronously.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::app::AppState;
use crate::domain::{CostEstimate, RawJobInput};
use crate::error::ValidationError;

/// Result of one simulated analysis run
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Finished {
        generation: u64,
        result: Result<CostEstimate, ValidationError>,
    },
    Cancelled {
        generation: u64,
    },
}

impl AnalysisOutcome {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Finished { generation, .. } | Self::Cancelled { generation } => *generation,
        }
    }
}

/// Handle for a pending analysis.
///
/// Owns a snapshot of the draft so the wizard is free to move on (or reset)
/// while the dwell is running.
#[derive(Debug)]
pub struct AnalysisTicket {
    generation: u64,
    input: RawJobInput,
    state: Arc<AppState>,
    token: CancellationToken,
}

impl AnalysisTicket {
    pub fn new(
        generation: u64,
        input: RawJobInput,
        state: Arc<AppState>,
        token: CancellationToken,
    ) -> Self {
        Self {
            generation,
            input,
            state,
            token,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait out the configured dwell, then validate and price the snapshot.
    pub async fn run(self) -> AnalysisOutcome {
        let generation = self.generation;
        let min_dwell = self.state.settings.analysis_delay;
        tracing::debug!(
            generation,
            delay_ms = min_dwell.as_millis() as u64,
            "Analysis started"
        );

        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                tracing::info!(generation, "Analysis cancelled");
                AnalysisOutcome::Cancelled { generation }
            }
            _ = tokio::time::sleep(min_dwell) => {
                let result = self.state.validate_and_estimate(&self.input);
                AnalysisOutcome::Finished { generation, result }
            }
        }
    }
}

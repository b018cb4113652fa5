//! Applies a stage's [`Recovery`] policy to a failure.

use log::warn;

use menuseed_core::{Recovery, Stage};

use super::{SeedError, StageFailure};

/// Either log `failure` and hand it back for reporting, or abort the run.
pub(crate) fn escalate(stage: Stage, failure: StageFailure) -> Result<StageFailure, SeedError> {
    match stage.recovery() {
        Recovery::LocalLog => {
            warn!("{stage}: {failure}; continuing");
            Ok(failure)
        }
        Recovery::Propagate => Err(SeedError::Aborted { stage, failure }),
    }
}

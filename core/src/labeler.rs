//! Reverse-pass labeling: hours until the next failure.
//!
//! Runs once, over a complete forward pass. Scanning from the last
//! day backward keeps a single "next known failure" value live, so
//! the whole labeling is O(n) with no lookahead structures.
//!
//! RULE: the input must be a finalized, unlabeled sequence. Feeding
//! the labeler a partially labeled or streaming sequence is a contract
//! violation and fails fast — it would silently produce labels
//! measured against the wrong failure.

use crate::{
    error::{SimError, SimResult},
    record::{DailyRecord, NO_UPCOMING_FAILURE},
    types::round2,
};

/// Fill `time_until_next_failure_hours` for every record, in place.
///
/// - Failure days are labeled 0 and become the new "next failure".
/// - Earlier days get the hour gap to that failure's cumulative hours,
///   floored at 0 after rounding.
/// - Days with no failure anywhere ahead get NO_UPCOMING_FAILURE.
pub fn label_time_to_failure(records: &mut [DailyRecord]) -> SimResult<()> {
    if let Some(index) = records
        .iter()
        .position(|r| r.time_until_next_failure_hours.is_some())
    {
        return Err(SimError::LabelerContract {
            message: format!(
                "record at index {index} is already labeled; \
                 the labeler requires a complete, unlabeled forward pass"
            ),
        });
    }

    let mut next_failure_hours: Option<f64> = None;

    for record in records.iter_mut().rev() {
        if record.is_failure == 1 {
            next_failure_hours = Some(record.cumulative_operating_hours);
            record.time_until_next_failure_hours = Some(0.0);
        } else {
            let label = match next_failure_hours {
                Some(failure_hours) => {
                    round2(failure_hours - record.cumulative_operating_hours).max(0.0)
                }
                None => NO_UPCOMING_FAILURE,
            };
            record.time_until_next_failure_hours = Some(label);
        }
    }

    Ok(())
}

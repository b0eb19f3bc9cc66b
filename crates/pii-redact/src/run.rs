//! Document-level aggregation of per-detection redaction results
//!
//! The engine itself never retries; callers feed each detection's
//! regions and outcome in, and the run reports how many detections
//! could not be visually located or applied so that a silent
//! unmodified document is never produced.

use serde::{Deserialize, Serialize};

use pii_core::RedactionRegion;

use crate::compositor::RedactionOutcome;

#[derive(Debug, Default)]
pub struct RedactionRun {
    detections: usize,
    located: usize,
    native: usize,
    drawn: usize,
    skipped: usize,
    failures: Vec<String>,
}

/// Final accounting for one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub detections: usize,
    pub located: usize,
    pub missed: usize,
    pub regions_native: usize,
    pub regions_drawn: usize,
    pub regions_skipped: usize,
    #[serde(flatten)]
    pub outcome: RedactionOutcome,
}

impl RedactionRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one detection's located regions and the outcome of
    /// applying them
    pub fn record(&mut self, regions: &[RedactionRegion], outcome: &RedactionOutcome) {
        self.detections += 1;
        if !regions.is_empty() {
            self.located += 1;
        }
        match outcome {
            RedactionOutcome::Applied { regions, skipped } => {
                self.native += regions;
                self.skipped += skipped;
            }
            RedactionOutcome::AppliedWithFallback {
                native,
                drawn,
                skipped,
            } => {
                self.native += native;
                self.drawn += drawn;
                self.skipped += skipped;
            }
            RedactionOutcome::Skipped { skipped } => self.skipped += skipped,
            RedactionOutcome::NothingFound => {}
            RedactionOutcome::Failed { reason } => self.failures.push(reason.clone()),
        }
    }

    /// Detections with no visual region on any page
    pub fn missed(&self) -> usize {
        self.detections - self.located
    }

    pub fn finish(self) -> RunSummary {
        let outcome = if !self.failures.is_empty() {
            RedactionOutcome::Failed {
                reason: self.failures.join("; "),
            }
        } else if self.native + self.drawn == 0 {
            // located regions that all went unapplied are not the same
            // thing as a page with nothing on it
            if self.skipped > 0 {
                RedactionOutcome::Skipped {
                    skipped: self.skipped,
                }
            } else {
                RedactionOutcome::NothingFound
            }
        } else if self.drawn > 0 {
            RedactionOutcome::AppliedWithFallback {
                native: self.native,
                drawn: self.drawn,
                skipped: self.skipped,
            }
        } else {
            RedactionOutcome::Applied {
                regions: self.native,
                skipped: self.skipped,
            }
        };

        if self.detections > self.located {
            tracing::warn!(
                missed = self.detections - self.located,
                total = self.detections,
                "detections could not be visually located"
            );
        }
        if self.skipped > 0 {
            tracing::warn!(skipped = self.skipped, "regions could not be applied");
        }

        RunSummary {
            detections: self.detections,
            located: self.located,
            missed: self.detections - self.located,
            regions_native: self.native,
            regions_drawn: self.drawn,
            regions_skipped: self.skipped,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pii_core::{Rect, RegionSource};

    fn regions(n: usize) -> Vec<RedactionRegion> {
        (0..n)
            .map(|i| {
                RedactionRegion::new(
                    0,
                    Rect::new(0.0, i as f32, 10.0, i as f32 + 1.0),
                    1.0,
                    RegionSource::Exact,
                )
            })
            .collect()
    }

    #[test]
    fn test_all_native() {
        let mut run = RedactionRun::new();
        run.record(
            &regions(2),
            &RedactionOutcome::Applied {
                regions: 2,
                skipped: 0,
            },
        );
        run.record(
            &regions(1),
            &RedactionOutcome::Applied {
                regions: 1,
                skipped: 0,
            },
        );

        let summary = run.finish();
        assert_eq!(summary.detections, 2);
        assert_eq!(summary.missed, 0);
        assert_eq!(
            summary.outcome,
            RedactionOutcome::Applied {
                regions: 3,
                skipped: 0
            }
        );
    }

    #[test]
    fn test_zero_regions_across_document_is_nothing_found() {
        let mut run = RedactionRun::new();
        run.record(&[], &RedactionOutcome::NothingFound);
        run.record(&[], &RedactionOutcome::NothingFound);

        let summary = run.finish();
        assert_eq!(summary.outcome, RedactionOutcome::NothingFound);
        assert_eq!(summary.missed, 2);
    }

    #[test]
    fn test_located_but_unapplied_is_not_nothing_found() {
        // one detection located a region but the backend could not
        // apply it on either path
        let mut run = RedactionRun::new();
        run.record(&regions(1), &RedactionOutcome::Skipped { skipped: 1 });

        let summary = run.finish();
        assert_eq!(summary.located, 1);
        assert_eq!(summary.regions_skipped, 1);
        assert_ne!(summary.outcome, RedactionOutcome::NothingFound);
        assert_eq!(summary.outcome, RedactionOutcome::Skipped { skipped: 1 });
    }

    #[test]
    fn test_fallback_degradation_propagates() {
        let mut run = RedactionRun::new();
        run.record(
            &regions(1),
            &RedactionOutcome::Applied {
                regions: 1,
                skipped: 0,
            },
        );
        run.record(
            &regions(1),
            &RedactionOutcome::AppliedWithFallback {
                native: 0,
                drawn: 1,
                skipped: 0,
            },
        );

        let summary = run.finish();
        assert_eq!(
            summary.outcome,
            RedactionOutcome::AppliedWithFallback {
                native: 1,
                drawn: 1,
                skipped: 0
            }
        );
    }

    #[test]
    fn test_partial_skips_stay_visible_in_applied_outcome() {
        let mut run = RedactionRun::new();
        run.record(
            &regions(2),
            &RedactionOutcome::Applied {
                regions: 1,
                skipped: 1,
            },
        );

        let summary = run.finish();
        assert_eq!(summary.regions_skipped, 1);
        assert_eq!(
            summary.outcome,
            RedactionOutcome::Applied {
                regions: 1,
                skipped: 1
            }
        );
    }

    #[test]
    fn test_failure_wins_over_success() {
        let mut run = RedactionRun::new();
        run.record(
            &regions(1),
            &RedactionOutcome::Applied {
                regions: 1,
                skipped: 0,
            },
        );
        run.record(
            &regions(1),
            &RedactionOutcome::Failed {
                reason: "save failed".into(),
            },
        );

        let summary = run.finish();
        assert!(matches!(summary.outcome, RedactionOutcome::Failed { .. }));
    }

    #[test]
    fn test_summary_serializes_with_outcome_tag() {
        let mut run = RedactionRun::new();
        run.record(
            &regions(3),
            &RedactionOutcome::Applied {
                regions: 3,
                skipped: 0,
            },
        );

        let value = serde_json::to_value(run.finish()).unwrap();
        assert_eq!(value["outcome"], "applied");
        assert_eq!(value["regions"], 3);
        assert_eq!(value["skipped"], 0);
        assert_eq!(value["detections"], 1);
    }

    #[test]
    fn test_missed_count() {
        let mut run = RedactionRun::new();
        run.record(
            &regions(1),
            &RedactionOutcome::Applied {
                regions: 1,
                skipped: 0,
            },
        );
        run.record(&[], &RedactionOutcome::NothingFound);
        run.record(&[], &RedactionOutcome::NothingFound);
        assert_eq!(run.missed(), 2);
    }
}

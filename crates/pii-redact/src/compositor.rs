//! Per-page application of redaction regions

use pii_core::{Rect, RedactionRegion};
use serde::{Deserialize, Serialize};

/// Mutable page surface exposed by the document backend
pub trait RedactionTarget {
    /// Native redaction: removes the underlying content, not just the
    /// pixels
    fn add_redaction(&mut self, rect: Rect) -> anyhow::Result<()>;

    /// Permanently draw an opaque filled rectangle. Visually equivalent
    /// to redaction but does not guarantee removal of extractable text.
    fn draw_fill(&mut self, rect: Rect) -> anyhow::Result<()>;

    /// Flatten any native redactions added so far
    fn apply(&mut self) -> anyhow::Result<()>;
}

/// Result of applying a page's regions
///
/// `skipped` counts regions that could not be applied at all (both the
/// native path and the drawing fallback failed, or the covered area was
/// empty); it is always reported, never folded into a clean outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RedactionOutcome {
    Applied {
        regions: usize,
        skipped: usize,
    },
    /// Some regions were drawn instead of natively redacted; underlying
    /// text may still be extractable
    AppliedWithFallback {
        native: usize,
        drawn: usize,
        skipped: usize,
    },
    /// Regions were located but none could be applied
    Skipped {
        skipped: usize,
    },
    NothingFound,
    Failed {
        reason: String,
    },
}

/// The part of a region's rect actually blacked out: the left
/// `coverage` fraction of its width
fn mask_rect(region: &RedactionRegion) -> Rect {
    let r = region.rect;
    Rect {
        x0: r.x0,
        y0: r.y0,
        x1: r.x0 + r.width() * region.coverage,
        y1: r.y1,
    }
}

/// Apply `regions` to one page.
///
/// Each region is first attempted as a native redaction; on failure an
/// opaque rectangle is drawn at the same coordinates, and that
/// degradation is surfaced in the outcome rather than hidden. Regions
/// whose covered area is empty (coverage 0) are skipped.
pub fn apply_regions(
    target: &mut dyn RedactionTarget,
    regions: &[RedactionRegion],
) -> RedactionOutcome {
    if regions.is_empty() {
        return RedactionOutcome::NothingFound;
    }

    let mut native = 0usize;
    let mut drawn = 0usize;
    let mut skipped = 0usize;

    for region in regions {
        let rect = mask_rect(region);
        if rect.is_empty() {
            skipped += 1;
            continue;
        }
        match target.add_redaction(rect) {
            Ok(()) => native += 1,
            Err(e) => {
                tracing::warn!(page = region.page, error = %e, "native redaction failed, drawing fill");
                match target.draw_fill(rect) {
                    Ok(()) => drawn += 1,
                    Err(e) => {
                        tracing::warn!(page = region.page, error = %e, "fallback draw failed, region skipped");
                        skipped += 1;
                    }
                }
            }
        }
    }

    if native + drawn == 0 {
        return RedactionOutcome::Skipped { skipped };
    }

    if native > 0 {
        if let Err(e) = target.apply() {
            return RedactionOutcome::Failed {
                reason: format!("failed to apply redactions: {}", e),
            };
        }
    }

    if drawn > 0 {
        RedactionOutcome::AppliedWithFallback {
            native,
            drawn,
            skipped,
        }
    } else {
        RedactionOutcome::Applied {
            regions: native,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use pii_core::RegionSource;

    #[derive(Default)]
    struct MockTarget {
        native_supported: bool,
        draw_supported: bool,
        apply_fails: bool,
        redacted: Vec<Rect>,
        drawn: Vec<Rect>,
        applied: bool,
    }

    impl RedactionTarget for MockTarget {
        fn add_redaction(&mut self, rect: Rect) -> anyhow::Result<()> {
            if !self.native_supported {
                return Err(anyhow!("redaction annotations unsupported"));
            }
            self.redacted.push(rect);
            Ok(())
        }

        fn draw_fill(&mut self, rect: Rect) -> anyhow::Result<()> {
            if !self.draw_supported {
                return Err(anyhow!("drawing unsupported"));
            }
            self.drawn.push(rect);
            Ok(())
        }

        fn apply(&mut self) -> anyhow::Result<()> {
            if self.apply_fails {
                return Err(anyhow!("save failed"));
            }
            self.applied = true;
            Ok(())
        }
    }

    fn region(coverage: f32) -> RedactionRegion {
        RedactionRegion::new(
            0,
            Rect::new(10.0, 10.0, 110.0, 20.0),
            coverage,
            RegionSource::Exact,
        )
    }

    #[test]
    fn test_native_redaction() {
        let mut target = MockTarget {
            native_supported: true,
            draw_supported: true,
            ..Default::default()
        };

        let outcome = apply_regions(&mut target, &[region(1.0)]);
        assert_eq!(
            outcome,
            RedactionOutcome::Applied {
                regions: 1,
                skipped: 0
            }
        );
        assert!(target.applied);
        assert!(target.drawn.is_empty());
    }

    #[test]
    fn test_coverage_scales_rect_width() {
        let mut target = MockTarget {
            native_supported: true,
            draw_supported: true,
            ..Default::default()
        };

        apply_regions(&mut target, &[region(0.5)]);
        // left half of the 100-wide rect
        assert_eq!(target.redacted[0], Rect::new(10.0, 10.0, 60.0, 20.0));
    }

    #[test]
    fn test_draw_fallback_is_surfaced() {
        let mut target = MockTarget {
            native_supported: false,
            draw_supported: true,
            ..Default::default()
        };

        let outcome = apply_regions(&mut target, &[region(1.0), region(1.0)]);
        assert_eq!(
            outcome,
            RedactionOutcome::AppliedWithFallback {
                native: 0,
                drawn: 2,
                skipped: 0
            }
        );
        assert_eq!(target.drawn.len(), 2);
        // nothing native to flatten
        assert!(!target.applied);
    }

    #[test]
    fn test_empty_regions_is_nothing_found() {
        let mut target = MockTarget {
            native_supported: true,
            draw_supported: true,
            ..Default::default()
        };
        assert_eq!(apply_regions(&mut target, &[]), RedactionOutcome::NothingFound);
    }

    #[test]
    fn test_zero_coverage_region_is_skipped() {
        let mut target = MockTarget {
            native_supported: true,
            draw_supported: true,
            ..Default::default()
        };
        let outcome = apply_regions(&mut target, &[region(0.0)]);
        assert_eq!(outcome, RedactionOutcome::Skipped { skipped: 1 });
        assert!(target.redacted.is_empty());
    }

    #[test]
    fn test_partial_skip_is_reported_alongside_applied() {
        let mut target = MockTarget {
            native_supported: true,
            draw_supported: true,
            ..Default::default()
        };
        let outcome = apply_regions(&mut target, &[region(1.0), region(0.0)]);
        assert_eq!(
            outcome,
            RedactionOutcome::Applied {
                regions: 1,
                skipped: 1
            }
        );
    }

    #[test]
    fn test_apply_failure_is_fatal_for_the_page() {
        let mut target = MockTarget {
            native_supported: true,
            draw_supported: true,
            apply_fails: true,
            ..Default::default()
        };
        let outcome = apply_regions(&mut target, &[region(1.0)]);
        assert!(matches!(outcome, RedactionOutcome::Failed { .. }));
    }

    #[test]
    fn test_both_paths_failing_is_not_nothing_found() {
        // a backend that can neither annotate nor draw
        let mut target = MockTarget::default();
        let outcome = apply_regions(&mut target, &[region(1.0)]);
        assert_ne!(outcome, RedactionOutcome::NothingFound);
        assert_eq!(outcome, RedactionOutcome::Skipped { skipped: 1 });
    }
}

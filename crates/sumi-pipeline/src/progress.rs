//! Progress reporting for long-running pipeline stages.
//!
//! Stages report a completion fraction in `[0.0, 1.0]` through a caller
//! supplied callback. Within one pipeline run the reported fractions are
//! monotonically non-decreasing; [`StageProgress`] enforces this while
//! remapping a stage's local fraction into its slice of the overall
//! range (for example, resizing occupies the first 30% of a run and
//! binarization the remaining 70%).

/// Callback receiving a completion fraction in `[0.0, 1.0]`.
pub type ProgressFn<'a> = dyn FnMut(f32) + 'a;

/// Remaps a stage's local `[0, 1]` progress into `[start, end]` of the
/// overall run, clamping input and never emitting a value lower than one
/// already reported.
pub struct StageProgress<'s, 'f> {
    sink: &'s mut ProgressFn<'f>,
    start: f32,
    end: f32,
    last: f32,
}

impl<'s, 'f> StageProgress<'s, 'f> {
    /// Create a remapper covering `[start, end]` of the overall range.
    pub fn new(sink: &'s mut ProgressFn<'f>, start: f32, end: f32) -> Self {
        let start = start.clamp(0.0, 1.0);
        let end = end.clamp(start, 1.0);
        Self {
            sink,
            start,
            end,
            last: start,
        }
    }

    /// Report a stage-local fraction, forwarding the remapped overall
    /// fraction to the sink.
    pub fn report(&mut self, fraction: f32) {
        let local = fraction.clamp(0.0, 1.0);
        let overall = (self.end - self.start).mul_add(local, self.start);
        let overall = overall.max(self.last);
        self.last = overall;
        (self.sink)(overall);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_remaps_into_stage_range() {
        let mut seen = Vec::new();
        let mut sink = |f: f32| seen.push(f);
        let mut stage = StageProgress::new(&mut sink, 0.3, 1.0);
        stage.report(0.0);
        stage.report(0.5);
        stage.report(1.0);
        assert_eq!(seen.len(), 3);
        assert!((seen[0] - 0.3).abs() < 1e-6);
        assert!((seen[1] - 0.65).abs() < 1e-6);
        assert!((seen[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn report_clamps_out_of_range_input() {
        let mut seen = Vec::new();
        let mut sink = |f: f32| seen.push(f);
        let mut stage = StageProgress::new(&mut sink, 0.0, 0.3);
        stage.report(-1.0);
        stage.report(2.0);
        assert!((seen[0] - 0.0).abs() < 1e-6);
        assert!((seen[1] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn report_never_decreases() {
        let mut seen = Vec::new();
        let mut sink = |f: f32| seen.push(f);
        let mut stage = StageProgress::new(&mut sink, 0.0, 1.0);
        stage.report(0.8);
        stage.report(0.2);
        assert!((seen[1] - 0.8).abs() < 1e-6, "got {}", seen[1]);
    }

    #[test]
    fn degenerate_range_reports_constant() {
        let mut seen = Vec::new();
        let mut sink = |f: f32| seen.push(f);
        let mut stage = StageProgress::new(&mut sink, 0.5, 0.5);
        stage.report(0.0);
        stage.report(1.0);
        assert!(seen.iter().all(|f| (f - 0.5).abs() < 1e-6));
    }
}

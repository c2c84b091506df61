/// Energy deposited in the scoring volume over a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunSummary {
    pub events: u64,
    /// Sum of per-event deposits in MeV.
    pub total_edep: f64,
    /// Spread of the per-event deposits, sqrt(Σe² − (Σe)²/n), in MeV.
    pub rms_edep: f64,
}

impl RunSummary {
    pub fn mean_edep(&self) -> f64 {
        if self.events == 0 {
            0.0
        } else {
            self.total_edep / self.events as f64
        }
    }
}

/// Running sums of per-event energy deposits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunAccumulator {
    events: u64,
    edep: f64,
    edep2: f64,
}

impl RunAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, edep: f64) {
        self.events += 1;
        self.edep += edep;
        self.edep2 += edep * edep;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn summary(&self) -> RunSummary {
        if self.events == 0 {
            return RunSummary::default();
        }
        let variance = self.edep2 - self.edep * self.edep / self.events as f64;
        let rms_edep = if variance > 0.0 { variance.sqrt() } else { 0.0 };
        RunSummary {
            events: self.events,
            total_edep: self.edep,
            rms_edep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_run_has_zero_summary() {
        let summary = RunAccumulator::new().summary();
        assert_eq!(summary, RunSummary::default());
        assert_eq!(summary.mean_edep(), 0.0);
    }

    #[test]
    fn summary_sums_event_deposits() {
        let mut run = RunAccumulator::new();
        run.add_event(1.0);
        run.add_event(3.0);
        let summary = run.summary();
        assert_eq!(summary.events, 2);
        assert_eq!(summary.total_edep, 4.0);
        assert_eq!(summary.mean_edep(), 2.0);
    }

    #[test]
    fn rms_follows_sum_of_squares_formula() {
        let mut run = RunAccumulator::new();
        run.add_event(1.0);
        run.add_event(3.0);
        // 1 + 9 - 16/2 = 2
        assert_eq!(run.summary().rms_edep, 2.0f64.sqrt());
    }

    #[test]
    fn rms_is_zero_for_identical_events() {
        let mut run = RunAccumulator::new();
        run.add_event(2.5);
        run.add_event(2.5);
        assert_eq!(run.summary().rms_edep, 0.0);
    }

    #[test]
    fn reset_clears_all_sums() {
        let mut run = RunAccumulator::new();
        run.add_event(5.0);
        run.reset();
        assert_eq!(run, RunAccumulator::default());
    }
}

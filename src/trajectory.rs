//! Committed integration output.

use crate::solver::Stats;

/// One committed point of a trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<const N: usize> {
    /// Time
    pub t: f64,
    /// State at `t`
    pub y: [f64; N],
    /// Truncation-error estimate of the step that produced `y`
    /// (all zeros for the initial sample)
    pub error: [f64; N],
}

/// Ordered `(time, state, error)` samples produced by one integration run.
///
/// Always holds at least the initial sample. Samples are only ever appended,
/// and times strictly increase from one sample to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<const N: usize> {
    samples: Vec<Sample<N>>,
    stats: Stats,
}

impl<const N: usize> Trajectory<N> {
    /// Start a trajectory at `(t0, y0)` with a zero error estimate
    pub(crate) fn new(t0: f64, y0: [f64; N]) -> Self {
        Self {
            samples: vec![Sample {
                t: t0,
                y: y0,
                error: [0.0; N],
            }],
            stats: Stats::default(),
        }
    }

    pub(crate) fn push(&mut self, t: f64, y: [f64; N], error: [f64; N]) {
        debug_assert!(t > self.last().t, "trajectory time must increase");
        self.samples.push(Sample { t, y, error });
    }

    pub(crate) fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    /// All samples in time order
    pub fn samples(&self) -> &[Sample<N>] {
        &self.samples
    }

    /// Iterate over samples in time order
    pub fn iter(&self) -> std::slice::Iter<'_, Sample<N>> {
        self.samples.iter()
    }

    /// Number of samples, including the initial one
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`: a trajectory holds at least its initial sample
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample
    pub fn last(&self) -> &Sample<N> {
        // `new` seeds the initial sample and nothing removes samples
        &self.samples[self.samples.len() - 1]
    }

    /// Time of the most recent sample
    pub fn final_time(&self) -> f64 {
        self.last().t
    }

    /// State of the most recent sample
    pub fn final_state(&self) -> [f64; N] {
        self.last().y
    }

    /// Sample times
    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.t).collect()
    }

    /// Sample states
    pub fn states(&self) -> Vec<[f64; N]> {
        self.samples.iter().map(|s| s.y).collect()
    }

    /// Per-sample error estimates
    pub fn errors(&self) -> Vec<[f64; N]> {
        self.samples.iter().map(|s| s.error).collect()
    }

    /// Values of one state component over time
    ///
    /// # Panics
    /// If `component >= N`.
    pub fn component(&self, component: usize) -> Vec<f64> {
        assert!(component < N, "component {} out of range for N = {}", component, N);
        self.samples.iter().map(|s| s.y[component]).collect()
    }

    /// Work done to produce this trajectory
    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

impl<'a, const N: usize> IntoIterator for &'a Trajectory<N> {
    type Item = &'a Sample<N>;
    type IntoIter = std::slice::Iter<'a, Sample<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_sample() {
        let traj = Trajectory::new(0.5, [1.0, 2.0]);
        assert_eq!(traj.len(), 1);
        assert!(!traj.is_empty());
        assert_eq!(
            *traj.last(),
            Sample {
                t: 0.5,
                y: [1.0, 2.0],
                error: [0.0, 0.0]
            }
        );
        assert_eq!(traj.stats(), &Stats::default());
    }

    #[test]
    fn test_accessors() {
        let mut traj = Trajectory::new(0.0, [1.0, 0.0]);
        traj.push(0.1, [0.9, 0.1], [1e-8, 2e-8]);
        traj.push(0.3, [0.7, 0.2], [3e-8, 4e-8]);

        assert_eq!(traj.times(), vec![0.0, 0.1, 0.3]);
        assert_eq!(traj.component(1), vec![0.0, 0.1, 0.2]);
        assert_eq!(traj.errors()[2], [3e-8, 4e-8]);
        assert_eq!(traj.states().len(), 3);
        assert_eq!(traj.final_time(), 0.3);
        assert_eq!(traj.final_state(), [0.7, 0.2]);
        assert_eq!((&traj).into_iter().count(), 3);
    }

    #[test]
    #[should_panic]
    fn test_component_out_of_range() {
        let traj = Trajectory::new(0.0, [1.0]);
        traj.component(1);
    }
}

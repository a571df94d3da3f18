//! Smoothing passes over a strand.
//!
//! One generic routine feeds a per-mass quantity through the chain
//! filter and hands each output sample to a per-mass store. The three
//! passes below differ only in what they read and where they write.

use wisp_math::filter::smooth_into;
use wisp_math::{smoothing_coefficient, DVec3, FilterSample};
use wisp_types::Scalar;

use crate::point_mass::PointMass;
use crate::strand::Strand;

impl Strand {
    /// Filter coefficient for this strand at smoothing amount `tau`.
    #[inline]
    pub fn smoothing_beta(&self, tau: Scalar) -> Scalar {
        smoothing_coefficient(self.avg_spring_length(), tau)
    }

    /// Smooths current positions into `smoothing_amt` / `smoothed_position`.
    pub fn smooth_positions(&mut self, tau: Scalar) {
        self.apply_filter(
            tau,
            |pm| pm.position,
            |pm, sample| {
                pm.smoothing_amt = sample.amount;
                pm.smoothed_position = sample.value;
            },
        );
    }

    /// Smooths Verlet velocities into `smoothed_velocity`.
    pub fn smooth_velocities(&mut self, tau: Scalar, dt: Scalar) {
        self.apply_filter(
            tau,
            |pm| pm.velocity(dt),
            |pm, sample| pm.smoothed_velocity = sample.value,
        );
    }

    /// Recomputes the rest-core curve from the start positions.
    ///
    /// Start positions never move, so the result depends only on `tau`.
    pub fn refresh_rest_smoothing(&mut self, tau: Scalar) {
        self.apply_filter(
            tau,
            |pm| pm.start_position(),
            |pm, sample| pm.set_rest_smoothing(sample.amount, sample.value),
        );
        self.set_rest_tau(tau);
    }

    /// Refreshes the rest-core curve only if `tau` changed.
    ///
    /// Returns `true` when a refresh ran.
    pub fn sync_rest_smoothing(&mut self, tau: Scalar) -> bool {
        if self.rest_smoothing_tau() == tau {
            return false;
        }
        tracing::debug!(
            old = self.rest_smoothing_tau(),
            new = tau,
            "core smoothing amount changed, refreshing rest curve"
        );
        self.refresh_rest_smoothing(tau);
        true
    }

    fn apply_filter<Q, S>(&mut self, tau: Scalar, quantity: Q, mut store: S)
    where
        Q: Fn(&PointMass) -> DVec3,
        S: FnMut(&mut PointMass, FilterSample),
    {
        let beta = self.smoothing_beta(tau);

        let mut input = std::mem::take(&mut self.scratch_quantity);
        let mut samples = std::mem::take(&mut self.scratch_samples);

        input.clear();
        input.extend(self.point_masses().iter().map(&quantity));
        samples.clear();
        samples.resize(input.len(), FilterSample::default());

        smooth_into(beta, &input, &mut samples);

        for (pm, sample) in self.point_masses_mut().iter_mut().zip(&samples) {
            store(pm, *sample);
        }

        self.scratch_quantity = input;
        self.scratch_samples = samples;
    }
}

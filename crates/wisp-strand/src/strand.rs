//! The strand: one hair as a contiguous chain of point masses.
//!
//! Masses live in a single `Vec` in chain order (index 0 is the pinned
//! root). Springs and smoothing recursions address neighbours by index
//! (`i − 1`, `i + 1`, `i + 2`), so there are no pointers to dangle when
//! a strand is cloned or moved.

use wisp_math::filter::smooth;
use wisp_math::{smoothing_coefficient, DVec3, FilterSample, LocalFrame};
use wisp_types::{PointMassId, Scalar, WispError, WispResult};

use crate::generators::place_masses;
use crate::params::StrandParams;
use crate::point_mass::PointMass;
use crate::spring::Spring;
use crate::topology::StrandTopology;

/// One simulated hair.
#[derive(Debug, Clone)]
pub struct Strand {
    params: StrandParams,
    point_masses: Vec<PointMass>,
    stretch_springs: Vec<Spring>,
    support_springs: Vec<Spring>,
    avg_spring_length: Scalar,
    /// Smoothing amount the rest-core curve was computed with.
    rest_tau: Scalar,
    /// Smoothing amount the reference vectors were computed with.
    bend_tau: Scalar,

    // Reused by the smoothing passes to avoid per-sub-step allocation.
    pub(crate) scratch_quantity: Vec<DVec3>,
    pub(crate) scratch_samples: Vec<FilterSample>,
}

impl Strand {
    /// Builds a strand from its parameters.
    ///
    /// `bend_tau` (`ab`) shapes the rest frames the reference vectors are
    /// expressed in; `core_tau` (`ac`) shapes the rest curve the core
    /// springs compare against.
    ///
    /// # Errors
    /// [`WispError::InvalidStrand`] for invalid parameters and
    /// [`WispError::InvalidConfig`] for a negative or non-finite smoothing
    /// amount. Nothing is built on error.
    pub fn build(params: StrandParams, bend_tau: Scalar, core_tau: Scalar) -> WispResult<Self> {
        for (name, tau) in [("bend", bend_tau), ("core", core_tau)] {
            if !tau.is_finite() || tau < 0.0 {
                return Err(WispError::InvalidConfig(format!(
                    "{name} smoothing amount must be finite and non-negative, got {tau}"
                )));
            }
        }

        let positions = place_masses(&params)?;
        let topology = StrandTopology::build(&positions);
        let avg_spring_length = topology.avg_stretch_length();

        let point_masses: Vec<PointMass> = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| PointMass::new(p, i == 0))
            .collect();

        let n = point_masses.len();
        let mut strand = Self {
            params,
            point_masses,
            stretch_springs: topology.stretch,
            support_springs: topology.support,
            avg_spring_length,
            rest_tau: core_tau,
            bend_tau,
            scratch_quantity: Vec::with_capacity(n),
            scratch_samples: Vec::with_capacity(n),
        };

        strand.refresh_rest_smoothing(core_tau);
        strand.compute_ref_vectors();

        tracing::debug!(
            particles = n,
            length = strand.params.length,
            avg_spring_length,
            "strand built"
        );

        Ok(strand)
    }

    /// Expresses each rest edge in the frame of the `ab`-smoothed rest curve.
    fn compute_ref_vectors(&mut self) {
        let starts: Vec<DVec3> = self.point_masses.iter().map(|pm| pm.start_position()).collect();
        let beta = smoothing_coefficient(self.avg_spring_length, self.bend_tau);
        let rest_bend = smooth(beta, &starts);
        let n = starts.len();

        for i in 0..n {
            let ref_vector = if i == 0 || i + 1 >= n {
                None
            } else {
                LocalFrame::between(rest_bend[i - 1].value, rest_bend[i].value)
                    .map(|frame| frame.to_local(starts[i + 1] - starts[i]))
            };
            self.point_masses[i].set_ref_vector(ref_vector);
        }
    }

    // ─── Configuration ──────────────────────────────────────

    pub fn params(&self) -> &StrandParams {
        &self.params
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.point_masses.len()
    }

    #[inline]
    pub fn length(&self) -> Scalar {
        self.params.length
    }

    #[inline]
    pub fn thickness(&self) -> Scalar {
        self.params.thickness
    }

    #[inline]
    pub fn offset(&self) -> DVec3 {
        self.params.offset
    }

    /// Mean stretch-spring rest length, the filter's characteristic length.
    #[inline]
    pub fn avg_spring_length(&self) -> Scalar {
        self.avg_spring_length
    }

    #[inline]
    pub fn rest_smoothing_tau(&self) -> Scalar {
        self.rest_tau
    }

    #[inline]
    pub fn bend_smoothing_tau(&self) -> Scalar {
        self.bend_tau
    }

    pub(crate) fn set_rest_tau(&mut self, tau: Scalar) {
        self.rest_tau = tau;
    }

    /// Uniform per-mass inertia: `length · density / particle_count`.
    #[inline]
    pub fn mass(&self, density: Scalar) -> Scalar {
        self.params.length * density / self.point_masses.len() as Scalar
    }

    // ─── Point masses ───────────────────────────────────────

    pub fn point_masses(&self) -> &[PointMass] {
        &self.point_masses
    }

    pub fn point_masses_mut(&mut self) -> &mut [PointMass] {
        &mut self.point_masses
    }

    pub fn point_mass(&self, id: PointMassId) -> WispResult<&PointMass> {
        self.point_masses.get(id.index()).ok_or(WispError::UnknownId {
            kind: "point mass",
            id: id.index(),
        })
    }

    /// The pinned root mass.
    pub fn root(&self) -> &PointMass {
        &self.point_masses[0]
    }

    /// Current positions in chain order.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = DVec3> + '_ {
        self.point_masses.iter().map(|pm| pm.position)
    }

    /// Smoothed positions in chain order (the drawn smooth curve).
    pub fn smoothed_positions(&self) -> impl ExactSizeIterator<Item = DVec3> + '_ {
        self.point_masses.iter().map(|pm| pm.smoothed_position)
    }

    // ─── Springs ────────────────────────────────────────────

    pub fn stretch_springs(&self) -> &[Spring] {
        &self.stretch_springs
    }

    pub fn support_springs(&self) -> &[Spring] {
        &self.support_springs
    }

    /// All springs, stretch first, for drawing connectivity.
    pub fn springs(&self) -> impl Iterator<Item = &Spring> + '_ {
        self.stretch_springs.iter().chain(self.support_springs.iter())
    }

    /// Springs (read-only) alongside the masses (mutable), for force passes.
    pub fn springs_and_masses_mut(&mut self) -> (&[Spring], &[Spring], &mut [PointMass]) {
        (
            &self.stretch_springs,
            &self.support_springs,
            &mut self.point_masses,
        )
    }

    /// Current length of `spring` divided by its rest length.
    pub fn stretch_ratio(&self, spring: &Spring) -> Scalar {
        let a = self.point_masses[spring.a.index()].position;
        let b = self.point_masses[spring.b.index()].position;
        if spring.rest_length > 0.0 {
            (b - a).length() / spring.rest_length
        } else {
            1.0
        }
    }

    // ─── Steering ───────────────────────────────────────────

    /// Drags the pinned root by `delta`.
    ///
    /// Only `position` moves; the previous position is kept so the root
    /// carries the implied velocity into the damping terms.
    ///
    /// # Errors
    /// [`WispError::InvalidConfig`] if `delta` is not finite; the root is
    /// left where it was.
    pub fn translate_root(&mut self, delta: DVec3) -> WispResult<()> {
        if !delta.is_finite() {
            return Err(WispError::InvalidConfig(format!(
                "root translation must be finite, got {delta}"
            )));
        }
        self.point_masses[0].position += delta;
        Ok(())
    }
}

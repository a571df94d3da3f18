//! Integration tests for wisp-solver.

use wisp_math::{DMat3, DVec3};
use wisp_solver::bending::{bend_force, bend_target};
use wisp_solver::core_springs::core_force;
use wisp_solver::forces::{apply_linear_springs, spring_magnitude, total_acceleration};
use wisp_solver::integrate::{max_length, relax_spring};
use wisp_solver::pipeline::step_strand;
use wisp_solver::{
    ForceCategory, ForceToggles, FrameSettings, SimulationConfig, StepTiming, StrandGroup,
};
use wisp_strand::{PointMass, Spring, SpringKind, Strand, StrandParams, StrandShape};
use wisp_types::constants::INEXTENSIBILITY_TOLERANCE;
use wisp_types::{PointMassId, StrandId, WispError};

const GRAVITY: DVec3 = DVec3::new(0.0, -9.8, 0.0);

fn horizontal(n: usize, length: f64) -> StrandParams {
    StrandParams::new(n, length).with_shape(StrandShape::Straight { direction: DVec3::X })
}

fn hanging(n: usize, length: f64) -> StrandParams {
    StrandParams::new(n, length).with_shape(StrandShape::hanging())
}

fn spring(a: u32, b: u32, rest: f64) -> Spring {
    Spring::new(PointMassId(a), PointMassId(b), rest, SpringKind::Stretch)
}

fn max_ratio(strand: &Strand) -> f64 {
    strand
        .springs()
        .map(|s| strand.stretch_ratio(s))
        .fold(0.0, f64::max)
}

// ─── Timing & Config Tests ────────────────────────────────────

#[test]
fn timing_divides_frame() {
    let t = StepTiming::new(24.0, 15).unwrap();
    assert!((t.dt - 1.0 / 360.0).abs() < 1e-15);
    assert!((t.dt * 15.0 - t.frame_time()).abs() < 1e-15);
    assert!((t.dt_squared() - t.dt * t.dt).abs() < 1e-20);
}

#[test]
fn timing_rejects_bad_values() {
    assert!(matches!(StepTiming::new(0.0, 10), Err(WispError::InvalidConfig(_))));
    assert!(matches!(StepTiming::new(f64::NAN, 10), Err(WispError::InvalidConfig(_))));
    assert!(matches!(StepTiming::new(30.0, 0), Err(WispError::InvalidConfig(_))));
}

#[test]
fn frame_settings_defaults() {
    let settings = FrameSettings::default();
    assert_eq!(settings.frames_per_sec, 90);
    assert_eq!(settings.substeps_per_frame, 30);
    assert_eq!(settings.gravity, GRAVITY);
    let t = settings.timing().unwrap();
    assert!((t.dt - 1.0 / 2700.0).abs() < 1e-15);
}

#[test]
fn default_config_is_valid() {
    let cfg = SimulationConfig::default();
    cfg.validate().unwrap();
    assert!(cfg.forces.stretch && cfg.forces.support && cfg.forces.core);
    assert!(!cfg.forces.bend);
    SimulationConfig::stiff().validate().unwrap();
    SimulationConfig::stretch_only(1000.0, 1.0).validate().unwrap();
}

#[test]
fn config_rejects_bad_values() {
    let cases = [
        SimulationConfig { density: 0.0, ..Default::default() },
        SimulationConfig { damping: 1.0, ..Default::default() },
        SimulationConfig { damping: -0.1, ..Default::default() },
        SimulationConfig { ks: -1.0, ..Default::default() },
        SimulationConfig { ab: f64::INFINITY, ..Default::default() },
        SimulationConfig { cc: f64::NAN, ..Default::default() },
    ];
    for cfg in cases {
        assert!(matches!(cfg.validate(), Err(WispError::InvalidConfig(_))), "{cfg:?}");
    }
}

#[test]
fn stretch_only_disables_everything_else() {
    let cfg = SimulationConfig::stretch_only(500.0, 2.0);
    assert_eq!(cfg.ks, 500.0);
    assert_eq!(cfg.cs, 2.0);
    assert_eq!(cfg.kb, 0.0);
    assert_eq!(cfg.kc, 0.0);
    for category in ForceCategory::ALL {
        assert_eq!(cfg.forces.is_enabled(category), category == ForceCategory::Stretch);
    }
}

#[test]
fn toggles_set_and_query() {
    let mut toggles = ForceToggles::none();
    toggles.set(ForceCategory::Bend, true);
    assert!(toggles.bend);
    assert!(toggles.is_enabled(ForceCategory::Bend));
    assert!(!toggles.is_enabled(ForceCategory::Core));
    assert_eq!(ForceCategory::Core.name(), "core");
}

#[test]
fn config_toml_round_trip() {
    let cfg = SimulationConfig::stiff();
    let text = toml::to_string(&cfg).unwrap();
    let back: SimulationConfig = toml::from_str(&text).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn config_partial_toml_uses_defaults() {
    let cfg: SimulationConfig = toml::from_str("ks = 42.0\n[forces]\nbend = true\n").unwrap();
    assert_eq!(cfg.ks, 42.0);
    assert_eq!(cfg.kb, SimulationConfig::default().kb);
    assert!(cfg.forces.bend);
    assert!(cfg.forces.stretch);
}

#[test]
fn frame_settings_json_round_trip() {
    let settings = FrameSettings {
        frames_per_sec: 24,
        substeps_per_frame: 15,
        gravity: DVec3::new(0.0, -1.0, 0.5),
    };
    let json = serde_json::to_string(&settings).unwrap();
    let back: FrameSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(back, settings);
}

// ─── Force Law Tests ──────────────────────────────────────────

#[test]
fn accelerations_sum() {
    assert_eq!(total_acceleration(&[]), DVec3::ZERO);
    let total = total_acceleration(&[GRAVITY, DVec3::new(1.0, 0.0, 0.0)]);
    assert_eq!(total, DVec3::new(1.0, -9.8, 0.0));
}

#[test]
fn spring_magnitude_law() {
    let f = spring_magnitude(1.5, 1.0, DVec3::new(0.0, 2.0, 0.0), DVec3::Y, 10.0, 0.5);
    assert!((f - (10.0 * 0.5 + 0.5 * 2.0)).abs() < 1e-12);
}

#[test]
fn stretched_spring_pulls_ends_together() {
    let mut masses = vec![
        PointMass::new(DVec3::ZERO, false),
        PointMass::new(DVec3::new(2.0, 0.0, 0.0), false),
    ];
    let skipped = apply_linear_springs(&[spring(0, 1, 1.0)], &mut masses, 10.0, 0.0, 0.01);
    assert_eq!(skipped, 0);
    assert!((masses[0].forces - DVec3::new(10.0, 0.0, 0.0)).length() < 1e-12);
    assert!((masses[1].forces - DVec3::new(-10.0, 0.0, 0.0)).length() < 1e-12);
}

#[test]
fn zero_length_spring_is_skipped() {
    let mut masses = vec![
        PointMass::new(DVec3::ONE, false),
        PointMass::new(DVec3::ONE, false),
    ];
    let skipped = apply_linear_springs(&[spring(0, 1, 1.0)], &mut masses, 10.0, 1.0, 0.01);
    assert_eq!(skipped, 1);
    assert!(masses.iter().all(|m| m.forces == DVec3::ZERO));
}

#[test]
fn bend_target_reproduces_rest_edge() {
    let prev = DVec3::new(0.0, 0.0, 0.0);
    let cur = DVec3::new(0.2, -1.0, 0.0);
    let edge = DVec3::new(0.6, -0.8, 0.1);
    let frame = wisp_math::LocalFrame::between(prev, cur).unwrap();
    let target = bend_target(prev, cur, frame.to_local(edge)).unwrap();
    assert!((target.edge - edge).length() < 1e-12);
    assert_eq!(target.frame, frame);
}

#[test]
fn bend_target_follows_rotation_about_world_axis() {
    let prev = DVec3::new(0.1, 0.0, 0.0);
    let cur = DVec3::new(0.3, -1.0, 0.2);
    let ref_vector = DVec3::new(0.9, 0.3, -0.2);
    let rot = DMat3::from_rotation_z(0.6);

    let a = bend_target(prev, cur, ref_vector).unwrap();
    let b = bend_target(rot * prev, rot * cur, ref_vector).unwrap();
    assert!((b.edge - rot * a.edge).length() < 1e-12);

    let shift = DVec3::new(5.0, -2.0, 1.0);
    let c = bend_target(prev + shift, cur + shift, ref_vector).unwrap();
    assert!((c.edge - a.edge).length() < 1e-12);
}

#[test]
fn bend_target_degenerate_frame() {
    assert!(bend_target(DVec3::ONE, DVec3::ONE, DVec3::X).is_none());
}

#[test]
fn bend_force_spring_and_perpendicular_damping() {
    let edge = DVec3::new(0.0, -1.0, 0.0);
    let target = DVec3::new(0.5, -1.0, 0.0);
    let f = bend_force(edge, target, DVec3::ZERO, 10.0, 1.0).unwrap();
    assert!((f - DVec3::new(-5.0, 0.0, 0.0)).length() < 1e-12);

    // Velocity along the edge is not damped.
    let along = bend_force(edge, edge, DVec3::new(0.0, 3.0, 0.0), 10.0, 1.0).unwrap();
    assert!(along.length() < 1e-12);

    let across = bend_force(edge, edge, DVec3::new(2.0, 0.0, 0.0), 10.0, 0.5).unwrap();
    assert!((across - DVec3::new(1.0, 0.0, 0.0)).length() < 1e-12);

    assert!(bend_force(DVec3::ZERO, target, DVec3::ZERO, 10.0, 1.0).is_none());
}

#[test]
fn core_force_law() {
    let smoothed = DVec3::new(0.0, -1.2, 0.0);
    let rest = DVec3::new(0.3, -0.954, 0.0).normalize();
    let f = core_force(smoothed, rest, DVec3::ZERO, 10.0, 0.0).unwrap();
    // Stretched by 0.2: pull `a` along the edge towards `b`.
    assert!((f - DVec3::new(0.0, -2.0, 0.0)).length() < 1e-9);

    let damped = core_force(smoothed, 1.2 * DVec3::NEG_Y, DVec3::new(0.0, -1.0, 0.0), 10.0, 3.0)
        .unwrap();
    assert!((damped - DVec3::new(0.0, -3.0, 0.0)).length() < 1e-12);

    assert!(core_force(DVec3::ZERO, rest, DVec3::ZERO, 10.0, 1.0).is_none());
}

// ─── Relaxation Tests ─────────────────────────────────────────

#[test]
fn relax_pinned_free_moves_free_end_only() {
    let mut masses = vec![
        PointMass::new(DVec3::ZERO, true),
        PointMass::new(DVec3::new(0.0, -2.0, 0.0), false),
    ];
    assert!(relax_spring(&mut masses, &spring(0, 1, 1.0)));
    assert_eq!(masses[0].position, DVec3::ZERO);
    assert!((masses[1].position - DVec3::new(0.0, -max_length(1.0), 0.0)).length() < 1e-12);
}

#[test]
fn relax_free_pinned_moves_first_end_only() {
    let mut masses = vec![
        PointMass::new(DVec3::new(3.0, 0.0, 0.0), false),
        PointMass::new(DVec3::ZERO, true),
    ];
    assert!(relax_spring(&mut masses, &spring(0, 1, 2.0)));
    assert_eq!(masses[1].position, DVec3::ZERO);
    assert!((masses[0].position.x - 2.2).abs() < 1e-12);
}

#[test]
fn relax_free_free_splits_correction() {
    let mut masses = vec![
        PointMass::new(DVec3::new(-1.0, 0.0, 0.0), false),
        PointMass::new(DVec3::new(1.0, 0.0, 0.0), false),
    ];
    assert!(relax_spring(&mut masses, &spring(0, 1, 1.0)));
    let (a, b) = (masses[0].position, masses[1].position);
    assert!(((b - a).length() - 1.1).abs() < 1e-12);
    assert!(((a + b) * 0.5).length() < 1e-12);
}

#[test]
fn relax_leaves_short_and_pinned_pairs_alone() {
    let mut masses = vec![
        PointMass::new(DVec3::ZERO, true),
        PointMass::new(DVec3::new(1.05, 0.0, 0.0), false),
        PointMass::new(DVec3::new(9.0, 0.0, 0.0), true),
    ];
    assert!(!relax_spring(&mut masses, &spring(0, 1, 1.0)));
    assert!(!relax_spring(&mut masses, &spring(0, 2, 1.0)));
    assert_eq!(masses[1].position.x, 1.05);
    assert_eq!(masses[2].position.x, 9.0);
}

// ─── Pipeline Tests ───────────────────────────────────────────

#[test]
fn free_fall_matches_discrete_verlet() {
    let cfg = SimulationConfig::free_fall();
    let timing = StepTiming::new(24.0, 10).unwrap();
    let mut strand = Strand::build(horizontal(3, 2.0), cfg.ab, cfg.ac).unwrap();
    let start: Vec<DVec3> = strand.positions().collect();

    let steps = 10;
    for _ in 0..steps {
        let report = step_strand(&mut strand, &cfg, &timing, GRAVITY);
        assert_eq!(report.relaxations, 0);
    }

    let drop = GRAVITY * timing.dt_squared() * (steps * (steps + 1) / 2) as f64;
    let now: Vec<DVec3> = strand.positions().collect();
    assert_eq!(now[0], start[0]);
    for i in 1..3 {
        assert!((now[i] - (start[i] + drop)).length() < 1e-12, "mass {i}");
    }
}

#[test]
fn rest_configuration_is_an_equilibrium() {
    let cfg = SimulationConfig {
        forces: ForceToggles::all(),
        ..Default::default()
    };
    let timing = StepTiming::new(24.0, 15).unwrap();
    let params = StrandParams::new(8, 4.0).with_shape(StrandShape::Zigzag { seed: 5 });
    let mut strand = Strand::build(params, cfg.ab, cfg.ac).unwrap();
    let start: Vec<DVec3> = strand.positions().collect();

    let report = step_strand(&mut strand, &cfg, &timing, DVec3::ZERO);
    assert_eq!(report, Default::default());
    for pm in strand.point_masses() {
        assert!(pm.forces.length() < 1e-9, "residual force {:?}", pm.forces);
    }
    for (pm, s) in strand.point_masses().iter().zip(&start) {
        assert!((pm.position - *s).length() < 1e-12);
    }
}

#[test]
fn bend_pass_records_frames_and_targets() {
    let cfg = SimulationConfig {
        forces: ForceToggles {
            bend: true,
            ..ForceToggles::none()
        },
        ..Default::default()
    };
    let timing = StepTiming::new(24.0, 15).unwrap();
    let params = StrandParams::new(6, 3.0).with_shape(StrandShape::Zigzag { seed: 2 });
    let mut strand = Strand::build(params, cfg.ab, cfg.ac).unwrap();
    let start: Vec<DVec3> = strand.positions().collect();

    step_strand(&mut strand, &cfg, &timing, DVec3::ZERO);

    let masses = strand.point_masses();
    assert!(masses[0].bend_target.is_none());
    assert!(masses[5].bend_target.is_none());
    for i in 1..5 {
        assert!(masses[i].frame.is_some());
        let target = masses[i].bend_target.unwrap();
        assert!((target - start[i + 1]).length() < 1e-9, "mass {i}");
    }
}

#[test]
fn smoothed_curve_uses_core_amount_after_bend() {
    let cfg = SimulationConfig {
        ab: 2.0,
        ac: 0.2,
        forces: ForceToggles::all(),
        ..Default::default()
    };
    let timing = StepTiming::new(24.0, 15).unwrap();
    let params = StrandParams::new(8, 4.0).with_shape(StrandShape::Zigzag { seed: 8 });
    let mut strand = Strand::build(params, cfg.ab, cfg.ac).unwrap();
    step_strand(&mut strand, &cfg, &timing, DVec3::ZERO);

    // At rest the core-smoothed curve equals the rest core curve.
    for pm in strand.point_masses() {
        assert!((pm.smoothed_position - pm.rest_smoothed_position()).length() < 1e-9);
    }
}

#[test]
fn zero_length_edge_does_not_poison_the_strand() {
    let cfg = SimulationConfig {
        forces: ForceToggles::all(),
        ..Default::default()
    };
    let timing = StepTiming::new(24.0, 15).unwrap();
    let mut strand = Strand::build(hanging(5, 4.0), cfg.ab, cfg.ac).unwrap();
    {
        let masses = strand.point_masses_mut();
        let p = masses[2].position;
        masses[3].position = p;
        masses[3].last_position = p;
    }
    for _ in 0..30 {
        step_strand(&mut strand, &cfg, &timing, GRAVITY);
    }
    assert!(strand.positions().all(|p| p.is_finite()));
}

#[test]
fn toggles_leave_no_stale_forces() {
    let mut group = StrandGroup::from_params(SimulationConfig::stiff(), [horizontal(6, 3.0)]).unwrap();
    let timing = StepTiming::new(24.0, 15).unwrap();
    group.simulate_with(&timing, &[GRAVITY]).unwrap();

    group.config_mut().forces = ForceToggles::none();
    group.substep(&timing, &[GRAVITY]).unwrap();
    let density = group.config().density;
    let strand = group.strand(StrandId(0)).unwrap();
    let seed = GRAVITY * strand.mass(density);
    assert!(strand.point_masses().iter().all(|pm| pm.forces == seed));

    group.config_mut().forces = ForceToggles::all();
    group.substep(&timing, &[GRAVITY]).unwrap();
    let strand = group.strand(StrandId(0)).unwrap();
    assert!(strand.point_masses().iter().any(|pm| pm.forces != seed));
}

// ─── Group Tests ──────────────────────────────────────────────

#[test]
fn group_add_and_lookup() {
    let mut group = StrandGroup::new(SimulationConfig::default()).unwrap();
    assert!(group.is_empty());
    let a = group.add_strand(hanging(4, 2.0)).unwrap();
    let b = group.add_strand(hanging(6, 3.0).with_offset(DVec3::X)).unwrap();
    assert_eq!(a, StrandId(0));
    assert_eq!(b, StrandId(1));
    assert_eq!(group.len(), 2);
    assert_eq!(group.point_mass_count(), 10);
    assert_eq!(group.strand(b).unwrap().offset(), DVec3::X);
    assert!(matches!(
        group.strand(StrandId(7)),
        Err(WispError::UnknownId { kind: "strand", id: 7 })
    ));
}

#[test]
fn group_rejects_bad_strand_without_side_effects() {
    let mut group = StrandGroup::new(SimulationConfig::default()).unwrap();
    assert!(group.add_strand(StrandParams::new(1, 1.0)).is_err());
    assert!(group.is_empty());
}

#[test]
fn group_rejects_invalid_config() {
    let bad = SimulationConfig {
        density: -1.0,
        ..Default::default()
    };
    assert!(StrandGroup::new(bad.clone()).is_err());

    let mut group = StrandGroup::new(SimulationConfig::default()).unwrap();
    assert!(group.set_config(bad).is_err());
    assert_eq!(group.config(), &SimulationConfig::default());
}

#[test]
fn simulate_rejects_bad_input_without_stepping() {
    let mut group = StrandGroup::from_params(SimulationConfig::default(), [hanging(4, 2.0)]).unwrap();
    let before: Vec<DVec3> = group.strands()[0].positions().collect();

    assert!(group.simulate(0.0, 10, &[GRAVITY]).is_err());
    assert!(group.simulate(24.0, 0, &[GRAVITY]).is_err());
    group.config_mut().damping = 2.0;
    assert!(group.simulate(24.0, 10, &[GRAVITY]).is_err());

    assert_eq!(group.substeps_run(), 0);
    let after: Vec<DVec3> = group.strands()[0].positions().collect();
    assert_eq!(before, after);
}

#[test]
fn simulate_reports_frame() {
    let mut group = StrandGroup::from_params(SimulationConfig::default(), [hanging(5, 2.0)]).unwrap();
    let report = group.simulate(24.0, 15, &[GRAVITY]).unwrap();
    assert_eq!(report.substeps, 15);
    assert!((report.dt - 1.0 / 360.0).abs() < 1e-15);
    assert!(report.wall_time >= 0.0);
    assert!(report.kinetic_energy >= 0.0);
    assert!(report.max_stretch_ratio > 0.0);
    assert_eq!(group.substeps_run(), 15);
}

#[test]
fn pinned_root_never_moves() {
    let mut group = StrandGroup::from_params(
        SimulationConfig::stiff(),
        [
            StrandParams::new(10, 5.0).with_offset(DVec3::new(1.0, 2.0, 3.0)),
            horizontal(6, 3.0),
        ],
    )
    .unwrap();
    let roots: Vec<DVec3> = group.strands().iter().map(|s| s.root().position).collect();
    for _ in 0..20 {
        group.simulate(24.0, 15, &[GRAVITY]).unwrap();
    }
    for (strand, root) in group.strands().iter().zip(&roots) {
        assert_eq!(strand.root().position, *root);
        assert_eq!(strand.root().start_position(), *root);
    }
}

#[test]
fn dragged_roots_stay_where_placed() {
    let mut group = StrandGroup::from_params(SimulationConfig::default(), [hanging(5, 2.0)]).unwrap();
    let delta = DVec3::new(0.3, 0.0, 0.0);
    group.translate_roots(delta).unwrap();
    group.simulate(24.0, 15, &[GRAVITY]).unwrap();
    let root = group.strands()[0].root();
    assert_eq!(root.position, delta);
    assert_eq!(root.last_position, delta);
}

#[test]
fn changing_core_amount_refreshes_rest_curve() {
    let mut group = StrandGroup::from_params(SimulationConfig::default(), [hanging(5, 2.0)]).unwrap();
    let mut cfg = group.config().clone();
    cfg.ac = 1.5;
    group.set_config(cfg).unwrap();
    group.simulate(24.0, 1, &[]).unwrap();
    assert_eq!(group.strands()[0].rest_smoothing_tau(), 1.5);
}

#[test]
fn two_masses_settle_at_static_sag() {
    let cfg = SimulationConfig {
        damping: 0.01,
        ..SimulationConfig::stretch_only(1000.0, 1.0)
    };
    let mut group = StrandGroup::from_params(cfg, [hanging(2, 1.0)]).unwrap();
    for _ in 0..120 {
        group.simulate(24.0, 15, &[GRAVITY]).unwrap();
    }
    let strand = &group.strands()[0];
    let mass = strand.mass(group.config().density);
    let expected = 1.0 + mass * 9.8 / 1000.0;
    let tip = strand.point_masses()[1].position;
    assert!(((tip - strand.root().position).length() - expected).abs() < 1e-4);
    assert!(tip.x.abs() < 1e-12);
}

#[test]
fn weak_spring_is_capped_by_relaxation() {
    let cfg = SimulationConfig::stretch_only(1.0, 0.0);
    let mut group = StrandGroup::from_params(cfg, [hanging(2, 1.0)]).unwrap();
    let mut relaxed = 0;
    for _ in 0..48 {
        let report = group.simulate(24.0, 15, &[GRAVITY]).unwrap();
        relaxed += report.relaxations;
        assert!(report.max_stretch_ratio <= 1.1 + 1e-9);
    }
    assert!(relaxed > 0);
    assert!(group.max_stretch_ratio() > 1.09);
}

#[test]
fn horizontal_strand_swings_down() {
    let cfg = SimulationConfig {
        density: 0.1,
        ..SimulationConfig::stretch_only(1000.0, 1.0)
    };
    let mut group = StrandGroup::from_params(cfg, [horizontal(5, 4.0)]).unwrap();
    let lowest = |g: &StrandGroup| g.strands()[0].positions().map(|p| p.y).fold(0.0, f64::min);

    let mut previous = lowest(&group);
    assert_eq!(previous, 0.0);
    for _ in 0..7 {
        let report = group.simulate(24.0, 15, &[GRAVITY]).unwrap();
        assert!(report.max_stretch_ratio <= 1.1 + 1e-6);
        let strand = &group.strands()[0];
        assert_eq!(strand.root().position, DVec3::ZERO);
        assert!(strand.positions().all(|p| p.is_finite()));
        assert!(max_ratio(strand) <= 1.1 + 1e-6);

        let now = lowest(&group);
        assert!(now <= previous + 1e-9);
        previous = now;
    }
    assert!(previous < -0.1);
    assert!(previous > -4.0 - 1e-9);
}

#[test]
fn non_finite_acceleration_is_rejected() {
    let mut group = StrandGroup::from_params(SimulationConfig::default(), [hanging(4, 2.0)]).unwrap();
    let timing = StepTiming::new(24.0, 15).unwrap();
    let wind = DVec3::new(f64::NAN, 0.0, 0.0);
    assert!(group.substep(&timing, &[GRAVITY, wind]).is_err());
    assert!(group.simulate_with(&timing, &[wind]).is_err());
    assert_eq!(group.substeps_run(), 0);
}

#[test]
fn steering_spreads_root_shift_over_substeps() {
    let mut group = StrandGroup::from_params(SimulationConfig::default(), [hanging(5, 2.0)]).unwrap();
    let timing = StepTiming::new(24.0, 10).unwrap();
    let shift = DVec3::new(0.5, 0.0, 0.0);
    group.simulate_steered(&timing, &[GRAVITY], shift).unwrap();
    let root = group.strands()[0].root();
    assert!((root.position - shift).length() < 1e-12);
    assert_eq!(root.position, root.last_position);
    assert!(group.strands()[0].point_masses()[1].position.x > 0.0);
}

#[test]
fn non_finite_root_shift_is_rejected_before_moving() {
    let mut group = StrandGroup::from_params(SimulationConfig::default(), [hanging(4, 2.0)]).unwrap();
    let timing = StepTiming::new(24.0, 10).unwrap();
    let before: Vec<DVec3> = group.strands()[0].positions().collect();
    let bad = DVec3::new(f64::INFINITY, 0.0, 0.0);

    assert!(matches!(group.translate_roots(bad), Err(WispError::InvalidConfig(_))));
    assert!(group.simulate_steered(&timing, &[GRAVITY], bad).is_err());
    assert!(group
        .simulate_steered(&timing, &[DVec3::splat(f64::NAN)], DVec3::X)
        .is_err());

    assert_eq!(group.substeps_run(), 0);
    let after: Vec<DVec3> = group.strands()[0].positions().collect();
    assert_eq!(before, after);
}

#[test]
fn observer_sees_every_substep() {
    let mut group = StrandGroup::from_params(SimulationConfig::default(), [hanging(5, 2.0)]).unwrap();
    let timing = StepTiming::new(24.0, 6).unwrap();
    let mut seen = Vec::new();
    group
        .simulate_observed(&timing, &[GRAVITY], DVec3::ZERO, |index, _, g| {
            seen.push((index, g.substeps_run()));
        })
        .unwrap();
    assert_eq!(seen, (0..6).map(|i| (i, i as u64 + 1)).collect::<Vec<_>>());
}

#[test]
fn ref_vectors_survive_simulation() {
    let cfg = SimulationConfig {
        forces: ForceToggles::all(),
        ..Default::default()
    };
    let mut group = StrandGroup::from_params(
        cfg,
        [
            StrandParams::new(8, 4.0),
            horizontal(6, 3.0).with_offset(DVec3::new(2.0, 0.0, 0.0)),
        ],
    )
    .unwrap();
    let refs = |g: &StrandGroup| -> Vec<Option<DVec3>> {
        g.strands()
            .iter()
            .flat_map(|s| s.point_masses().iter().map(|pm| pm.ref_vector()))
            .collect()
    };
    let before = refs(&group);
    assert!(before.iter().any(|r| r.is_some()));

    let timing = StepTiming::new(24.0, 15).unwrap();
    for frame in 0..20 {
        let shift = if frame < 10 { DVec3::new(0.05, 0.0, 0.0) } else { DVec3::ZERO };
        group.simulate_steered(&timing, &[GRAVITY], shift).unwrap();
    }
    assert_eq!(refs(&group), before);
}

#[test]
fn released_pair_stays_capped_and_returns_to_rest() {
    let cfg = SimulationConfig {
        damping: 0.01,
        ..SimulationConfig::stretch_only(1000.0, 1.0)
    };
    let mut group = StrandGroup::from_params(cfg, [hanging(2, 1.0)]).unwrap();
    {
        let tip = &mut group.strand_mut(StrandId(0)).unwrap().point_masses_mut()[1];
        tip.position = DVec3::new(0.0, -1.5, 0.0);
        tip.last_position = tip.position;
    }
    let edge = |g: &StrandGroup| {
        let masses = g.strands()[0].point_masses();
        (masses[1].position - masses[0].position).length()
    };
    assert!((edge(&group) - 1.5).abs() < 1e-12);

    let timing = StepTiming::new(24.0, 15).unwrap();
    for _ in 0..120 * 15 {
        group.substep(&timing, &[]).unwrap();
        assert!(edge(&group) <= INEXTENSIBILITY_TOLERANCE + 1e-9);
    }
    assert!((edge(&group) - 1.0).abs() < 1e-3);
}

//! CLI command implementations.

use wisp_bench::{BenchmarkMetrics, BenchmarkRunner, Scenario, ScenarioKind};
use wisp_debug::{drive_frame, InspectionHook, InvariantHook, StateSnapshot, TelemetryHook};
use wisp_io::{validate_scene, HairDescriptor, Scene};
use wisp_math::DVec3;
use wisp_solver::SimulationConfig;
use wisp_telemetry::{EventBus, EventKind, TracingSink, VecSink};

/// Run a scene and report per-frame diagnostics.
pub fn simulate(
    scene_path: Option<&str>,
    config_path: Option<&str>,
    frames: u32,
    snapshot_path: Option<&str>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Wisp Simulation");
    println!("───────────────");

    let scene = match scene_path {
        Some(path) => {
            println!("Scene:     {path}");
            Scene::load(path)?
        }
        None => {
            println!("Scene:     built-in (one curly hair)");
            Scene::single(HairDescriptor::new(20, 4.0))
        }
    };
    let mut group = scene.to_group()?;

    if let Some(path) = config_path {
        let config: SimulationConfig = toml::from_str(&std::fs::read_to_string(path)?)?;
        group.set_config(config)?;
        println!("Config:    {path}");
    }

    let timing = scene.frame.timing()?;
    let gravity = [scene.frame.gravity];
    println!(
        "Strands:   {} ({} masses)",
        group.len(),
        group.point_mass_count()
    );
    println!(
        "Timing:    {} fps × {} sub-steps (dt = {:.3e}s)",
        scene.frame.frames_per_sec, scene.frame.substeps_per_frame, timing.dt
    );
    println!();
    tracing::info!(frames, strands = group.len(), "Starting simulation");

    let mut bus = EventBus::new();
    let collected = VecSink::new();
    let summary = collected.share();
    bus.add_sink(Box::new(collected));
    if verbose {
        bus.add_sink(Box::new(TracingSink::new(tracing::Level::INFO)));
    }

    let mut telemetry = TelemetryHook::new();
    let mut invariants = InvariantHook::new();
    for frame in 0..frames {
        let frame = u64::from(frame);
        drive_frame(
            &mut group,
            &timing,
            &gravity,
            DVec3::ZERO,
            frame,
            &mut [&mut telemetry, &mut invariants],
        )?;
        for event in telemetry.drain_events() {
            bus.emit(event);
        }
        bus.flush();
    }
    invariants.on_simulation_end();
    bus.finalize();

    let events = summary.events();
    let relaxations: usize = events
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::Relaxation { corrections, .. } => Some(corrections),
            _ => None,
        })
        .sum();
    let max_stretch = events
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::Relaxation { max_stretch_ratio, .. } => Some(max_stretch_ratio),
            _ => None,
        })
        .fold(0.0, f64::max);
    let wall_time: f64 = events
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::FrameEnd { wall_time, .. } => Some(wall_time),
            _ => None,
        })
        .sum();

    println!("Frames:        {frames}");
    println!("Wall time:     {wall_time:.3}s");
    println!("Relaxations:   {relaxations}");
    println!("Max stretch:   {max_stretch:.4}");
    println!("Final KE:      {:.6e}", group.kinetic_energy(timing.dt));
    if verbose && invariants.overstretched_substeps() > 0 {
        println!("Overstretched: {} sub-steps", invariants.overstretched_substeps());
    }
    for violation in invariants.violations() {
        println!("❌ {violation}");
    }

    if let Some(path) = snapshot_path {
        let sim_time = f64::from(frames) * timing.frame_time();
        StateSnapshot::from_group(&group, u64::from(frames), sim_time).save(path)?;
        println!("Snapshot written to: {path}");
    }

    if invariants.is_clean() {
        Ok(())
    } else {
        Err("simulation produced invalid state".into())
    }
}

/// Run benchmark suite.
pub fn benchmark(
    scenario_name: &str,
    output_path: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Wisp Benchmark Suite");
    println!("════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        match ScenarioKind::from_name(scenario_name) {
            Some(kind) => vec![kind],
            None => {
                let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                eprintln!("Unknown scenario: {scenario_name}");
                eprintln!("Available: {}, all", available.join(", "));
                return Err("Unknown scenario".into());
            }
        }
    };

    let mut all_metrics = Vec::new();
    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind);
        println!(
            "Running: {} ({} strands, {} frames)",
            kind.name(),
            scenario.strands.len(),
            scenario.frames,
        );

        let metrics =
            BenchmarkRunner::run(&scenario).map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg frame:     {:.3}ms", metrics.avg_frame_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}", metrics.max_displacement);
        println!("  Max stretch:   {:.4}", metrics.max_stretch_ratio);
        println!();

        all_metrics.push(metrics);
    }

    let output = if json {
        serde_json::to_string_pretty(&all_metrics)?
    } else {
        BenchmarkMetrics::to_csv(&all_metrics)
    };
    if let Some(path) = output_path {
        std::fs::write(path, &output)?;
        println!("Results written to: {path}");
    } else {
        println!("{}", if json { "JSON Output:" } else { "CSV Output:" });
        println!("{output}");
    }

    Ok(())
}

/// Inspect a state snapshot.
pub fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Wisp Snapshot Inspector");
    println!("───────────────────────");
    println!();

    let snapshot = StateSnapshot::load(path)?;

    println!("Frame:        {}", snapshot.frame);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Strands:      {}", snapshot.strands.len());
    println!("Point masses: {}", snapshot.point_mass_count());

    for (i, strand) in snapshot.strands.iter().enumerate() {
        let (Some(root), Some(tip)) = (strand.positions.first(), strand.positions.last()) else {
            continue;
        };
        let min_y = strand.positions.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        println!(
            "  [{i}] root ({:.3}, {:.3}, {:.3})  tip ({:.3}, {:.3}, {:.3})  lowest y {:.4}",
            root.x, root.y, root.z, tip.x, tip.y, tip.z, min_y
        );
    }

    Ok(())
}

/// Validate a scene or config.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Wisp Validator");
    println!("──────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let content = std::fs::read_to_string(path)?;
        let config: SimulationConfig = toml::from_str(&content)?;
        match config.validate() {
            Ok(()) => println!("✅ Config is valid."),
            Err(e) => {
                println!("❌ Config validation failed: {e}");
                return Err(e.into());
            }
        }
    } else if path.ends_with(".json") {
        println!("Validating scene: {path}");
        let scene = Scene::load(path)?;
        match validate_scene(&scene) {
            Ok(()) => {
                let masses: usize = scene.hair.iter().map(|h| h.particle_count).sum();
                println!("✅ Scene is valid ({} hairs, {masses} masses).", scene.hair.len());
            }
            Err(e) => {
                println!("❌ Scene validation failed: {e}");
                return Err(e.into());
            }
        }
    } else {
        println!("Unsupported file format. Use .toml (config) or .json (scene).");
    }

    Ok(())
}

//! Simulation driver: build a baseline from a synthetic corpus, then
//! stream normal and attack telemetry through the pipeline and print
//! what the detectors caught.

use rand::rngs::StdRng;
use rand::SeedableRng;

use av_defense_core::baseline::BaselineModel;
use av_defense_core::config::{ConfigHandle, DetectionConfig};
use av_defense_core::corpus::generate_normal_corpus;
use av_defense_core::events::{LogEntry, LogSink, MemoryLogSink};
use av_defense_core::pipeline::process_and_record;
use av_defense_core::simulation;
use av_defense_core::store::{InMemoryThreatStore, ThreatStore};
use av_defense_core::TelemetryFrame;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting AV Defense Core v{} simulation...", av_defense_core::constants::CORE_VERSION);

    let mut rng = StdRng::seed_from_u64(2024);
    let handle = ConfigHandle::new(DetectionConfig::default());
    let store = InMemoryThreatStore::new();
    let sink = MemoryLogSink::new();

    // Train the baseline from synthetic normal operation.
    let corpus = generate_normal_corpus(&mut rng, 1000);
    match BaselineModel::build(&corpus) {
        Ok(model) => {
            let samples = model.sample_count;
            handle.install_baseline(model);
            let _ = sink.record(LogEntry::baseline_installed(samples));
        }
        Err(e) => {
            log::error!("Baseline build failed: {}", e);
            std::process::exit(1);
        }
    }

    // Tighten detection for the exercise.
    let tuned = DetectionConfig::high_sensitivity();
    let _ = sink.record(LogEntry::config_updated(&tuned));
    handle.update_config(tuned);

    // A day in the life: mostly normal traffic, a few injected attacks.
    let frames: Vec<(&str, TelemetryFrame)> = vec![
        ("normal", simulation::normal_frame(&mut rng, "drone-001")),
        ("normal", simulation::normal_frame(&mut rng, "drone-002")),
        ("gps spoofing", simulation::spoofed_gps_frame(&mut rng, "drone-001")),
        ("normal", simulation::normal_frame(&mut rng, "drone-003")),
        ("control hijacking", simulation::hijacked_control_frame(&mut rng, "drone-002")),
        ("sensor tampering", simulation::tampered_sensor_frame(&mut rng, "drone-003")),
        ("normal", simulation::normal_frame(&mut rng, "drone-001")),
    ];

    for (label, frame) in &frames {
        let snapshot = handle.snapshot();
        match process_and_record(frame, &snapshot, &store, &sink) {
            Ok(outcome) => {
                log::info!(
                    "{} frame from {}: {} threat(s)",
                    label,
                    frame.vehicle_id,
                    outcome.result.threats_detected
                );
            }
            Err(e) => log::error!("Frame from {} rejected: {}", frame.vehicle_id, e),
        }
    }

    // Inject one synthetic drill, then run recovery.
    let drill = simulation::simulate_attack(
        av_defense_core::ThreatKind::DataTampering,
        "drone-004",
    );
    let _ = sink.record(LogEntry::simulation_started(
        drill.kind.as_str(),
        drill.threat_id,
        &drill.vehicle_id,
    ));
    if let Err(e) = store.append(&drill) {
        log::error!("Failed to persist drill threat: {}", e);
    }

    match store.resolve_all() {
        Ok(resolved) => {
            log::info!("Recovery resolved {} active threats", resolved);
            if let Ok(list) = store.recent(100, Some(true)) {
                for threat in list {
                    let _ = sink.record(LogEntry::threat_resolved(threat.threat_id));
                }
            }
        }
        Err(e) => log::error!("Recovery failed: {}", e),
    }

    match store.stats() {
        Ok(stats) => log::info!(
            "Done. {} threats total ({} gps, {} hijacking, {} anomalies), {} active",
            stats.total,
            stats.gps_spoofing,
            stats.control_hijacking,
            stats.anomalies,
            stats.active
        ),
        Err(e) => log::error!("Stats unavailable: {}", e),
    }
}

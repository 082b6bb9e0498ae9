use anyhow::Result;
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::time::Instant;
use synapsis_lib::config::AnalyticsConfig;
use synapsis_lib::cosmology::CosmologyComparator;
use synapsis_lib::data::{Particle, Vec3};
use synapsis_lib::emergence::EmergenceDetector;
use synapsis_lib::export;
use synapsis_lib::feedback::FeedbackMonitor;
use synapsis_lib::genealogy::GenealogyTracker;
use synapsis_lib::memory;
use synapsis_lib::metrics::{self, AnalyticsMetrics};
use synapsis_lib::persistence;
use synapsis_lib::scheduler::BatchScheduler;
use synapsis_lib::tree::AncestryTree;
use uuid::Uuid;

/// Headless analytics driver: feeds a synthetic particle population through
/// the engines so the full pipeline can be exercised without the host
/// simulation.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of ticks to run
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Initial particle population
    #[arg(short, long, default_value_t = 64)]
    particles: usize,

    /// Seed for the synthetic feed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Write the full state export to this path on exit (.gz for gzip)
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write the genealogy CSV to this path on exit
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the lineage graph in DOT format to this path on exit
    #[arg(long)]
    dot: Option<PathBuf>,
}

const MAX_POPULATION: usize = 256;

fn main() -> Result<()> {
    metrics::init_logging();
    let args = Args::parse();
    let config = AnalyticsConfig::load(&args.config);

    let mut detector = EmergenceDetector::with_config(&config.emergence);
    let mut comparator = CosmologyComparator::with_config(&config.cosmology);
    let mut tracker = GenealogyTracker::with_config(&config.genealogy);
    let mut feedback = FeedbackMonitor::with_config(&config.feedback);
    let mut scheduler = BatchScheduler::with_config(&config.scheduler);
    let analytics_metrics = AnalyticsMetrics::new();

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut particles: Vec<Particle> = (0..args.particles.max(1))
        .map(|_| spawn_particle(&mut rng))
        .collect();
    for p in &particles {
        if let Err(error) = tracker.register_birth(p.id, None) {
            tracing::warn!(%error, "birth registration rejected");
        }
    }
    tracing::info!(
        population = particles.len(),
        ticks = args.ticks,
        seed = args.seed,
        "Synthetic feed started"
    );

    for tick in 0..args.ticks {
        let started = Instant::now();
        drift(&mut particles, &mut rng);

        // Occasional replication, reported the way a real simulation would.
        if particles.len() < MAX_POPULATION && rng.gen_bool(0.05) {
            let parent_idx = rng.gen_range(0..particles.len());
            let child = replicate(&particles[parent_idx], &mut rng);
            let (parent_id, parent_energy) =
                (particles[parent_idx].id, particles[parent_idx].ec);
            if let Err(error) = tracker.register_birth(child.id, Some(parent_id)) {
                tracing::warn!(%error, "birth registration rejected");
            }
            tracker.register_replication(parent_id, child.id, parent_energy, child.ec);
            particles.push(child);
        }

        let mut emergent = false;
        if tick % 10 == 0 {
            let result = detector.detect(&particles);
            emergent = result.is_emergent;
            let line = format!(
                "phi={:.3} depth={:.2} causal={:.4} score={:.3} emergent={}",
                result.phi,
                result.hierarchy.hierarchy_depth,
                result.causal_density,
                result.emergence_score,
                result.is_emergent
            );
            scheduler.schedule("emergence", move || {
                tracing::info!(panel = "emergence", "{line}");
                Ok(())
            });
        }

        if tick % 30 == 0 {
            match comparator.compare(&particles) {
                Some(record) => {
                    let line = format!(
                        "omega_m={:.3} omega_lambda={:.3} agreement={:.1}%",
                        record.derived.omega_m,
                        record.derived.omega_lambda,
                        record.agreement * 100.0
                    );
                    scheduler.schedule("cosmology", move || {
                        tracing::info!(panel = "cosmology", "{line}");
                        Ok(())
                    });
                }
                None => analytics_metrics.record_degraded(),
            }

            if let Some(summary) = memory::inspect(&particles) {
                let line = format!(
                    "top={} energy={:.2} mean={:.1}",
                    summary.id, summary.energy, summary.stats.mean
                );
                scheduler.schedule("memory", move || {
                    tracing::info!(panel = "memory", "{line}");
                    Ok(())
                });
            }
        }

        // Synthetic audio observation driving the feedback hints.
        let frequency = rng.gen_range(20.0..20_000.0);
        let magnitude = rng.gen_range(0.0..1.0);
        feedback.observe(frequency, magnitude, particles.len());

        scheduler.frame(Instant::now());
        analytics_metrics.record_tick(started.elapsed(), particles.len(), emergent);
    }

    scheduler.stop();

    let stats = tracker.statistics();
    tracing::info!(
        particles = stats.total_particles,
        max_generation = stats.max_generation,
        replications = stats.total_replications,
        emergent_frames = analytics_metrics.emergent_frames(),
        elapsed_ms = analytics_metrics.elapsed().as_millis() as u64,
        "Run finished"
    );

    if args.export.is_some() || args.csv.is_some() || args.dot.is_some() {
        let state = export::export_state(
            &particles,
            &detector,
            &comparator,
            &tracker,
            &feedback,
            &config,
        );

        if let Some(path) = &args.export {
            persistence::save_state(&state, path)?;
            let digest = export::checksum(&state)?;
            tracing::info!(path = %path.display(), checksum = %digest, "State exported");
        }
        if let Some(path) = &args.csv {
            std::fs::write(path, export::genealogy_csv(&state.genealogy))?;
            tracing::info!(path = %path.display(), "Genealogy CSV written");
        }
        if let Some(path) = &args.dot {
            std::fs::write(path, AncestryTree::build(&tracker).to_dot())?;
            tracing::info!(path = %path.display(), "Lineage graph written");
        }
    }

    Ok(())
}

fn spawn_particle(rng: &mut ChaCha8Rng) -> Particle {
    Particle {
        id: Uuid::new_v4(),
        position: Vec3::new(
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
        ),
        velocity: Vec3::new(
            rng.gen_range(-0.5..0.5),
            rng.gen_range(-0.5..0.5),
            rng.gen_range(-0.5..0.5),
        ),
        x12: rng.gen_range(-1.0..1.0),
        m12: rng.gen_range(0.0..1.0),
        ec: rng.gen_range(1.0..100.0),
        omega: rng.gen_range(0.0..1.0),
        theta: rng.gen_range(0.0..std::f64::consts::TAU),
        mass: rng.gen_range(0.5..2.0),
        frequency: rng.gen_range(20.0..20_000.0),
        memory: (0..10).map(|_| rng.gen_range(0.0..255.0)).collect(),
    }
}

fn drift(particles: &mut [Particle], rng: &mut ChaCha8Rng) {
    for p in particles {
        p.position.x += p.velocity.x * 0.1;
        p.position.y += p.velocity.y * 0.1;
        p.position.z += p.velocity.z * 0.1;
        p.x12 = (p.x12 + rng.gen_range(-0.05..0.05)).clamp(-2.0, 2.0);
        p.theta = (p.theta + 0.1) % std::f64::consts::TAU;
        p.ec = (p.ec * 0.999).max(0.1);
    }
}

fn replicate(parent: &Particle, rng: &mut ChaCha8Rng) -> Particle {
    let mut child = parent.clone();
    child.id = Uuid::new_v4();
    child.position.x += rng.gen_range(-1.0..1.0);
    child.position.y += rng.gen_range(-1.0..1.0);
    child.ec = parent.ec * 0.5;
    child
}

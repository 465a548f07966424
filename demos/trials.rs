//! Operator comparison trials
//!
//! Runs every binary crossover on the three benchmark functions (plain and
//! gray decoding) and every continuous crossover on the two minimization
//! problems, printing one summary per run.
//!
//! Set `RUST_LOG=sga_variation=debug` to follow individual generations.

use std::sync::Arc;

use sga_variation::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = GaConfig::default().with_seed(42);
    let functions: Vec<Arc<dyn FitnessFunction>> = vec![
        Arc::new(SineRipple::new()),
        Arc::new(Sphere::new()),
        Arc::new(Ackley::new()),
    ];

    println!("=== Binary crossover ===\n");
    for function in &functions {
        for gray_coding in [false, true] {
            let experiment = Experiment::new(Arc::clone(function))
                .with_config(config.clone().with_gray_coding(gray_coding));
            for kind in BinaryCrossoverKind::ALL {
                let report = experiment.run_binary(kind.id())?;
                println!("[gray coding: {}] {}\n", gray_coding, report);
            }
        }
    }

    println!("=== Continuous crossover ===\n");
    for function in functions.iter().filter(|f| !f.is_maximize()) {
        let experiment = Experiment::new(Arc::clone(function)).with_config(config.clone());
        for kind in ContinuousCrossoverKind::ALL {
            match experiment.run_continuous(kind.id()) {
                Ok(report) => println!("{}\n", report),
                Err(e) => println!("{} on {} failed: {}\n", kind.name(), function.name(), e),
            }
        }
    }

    Ok(())
}

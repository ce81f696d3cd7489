//! Quartets CLI - evolves 63-bit genomes towards the all-zero optimum.

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use u_evolve::ga::quartets::{random_population, QuartetProblem, GENOME_BITS, MAX_FITNESS};
use u_evolve::ga::{GaConfig, GaRunner};
use u_evolve::random::rng_from_seed;

/// Quartets - genetic algorithm demo on a deceptive bit-string landscape
#[derive(Parser, Debug)]
#[command(name = "quartets")]
#[command(author, version, about = "Genetic algorithm demo on 63-bit quartet genomes", long_about = None)]
struct Cli {
    /// Population size
    #[arg(short = 'n', long, default_value = "200")]
    population: usize,

    /// Maximum number of generations
    #[arg(short = 'g', long, default_value = "1000")]
    iterations: usize,

    /// Mutation probability per offspring
    #[arg(short, long, default_value = "0.1")]
    mutation: f64,

    /// Individuals drawn per tournament
    #[arg(long, default_value = "5")]
    tournament_size: usize,

    /// Success probability of each tournament trial
    #[arg(long, default_value = "0.5")]
    selection_probability: f64,

    /// Stop once a generation reaches this score
    #[arg(long, default_value_t = MAX_FITNESS)]
    good_enough: u32,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Score and breed on the calling thread only
    #[arg(long)]
    sequential: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = GaConfig::default()
        .with_tournament_size(cli.tournament_size)
        .with_selection_probability(cli.selection_probability)
        .with_mutation_probability(cli.mutation)
        .with_good_enough_fitness(cli.good_enough)
        .with_max_iterations(cli.iterations)
        .with_parallel(!cli.sequential);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    // Bootstrap from a generator independent of the engine's own.
    let mut rng = rng_from_seed(cli.seed.map(|s| s.wrapping_add(1)));
    let first_generation = random_population(cli.population, &mut rng);

    let started = Instant::now();
    let result = GaRunner::run(&QuartetProblem, &config, first_generation)
        .context("evolution failed")?;
    let elapsed = started.elapsed();

    println!(
        "best genome: {:0width$b}",
        result.best.individual,
        width = GENOME_BITS as usize
    );
    println!("score:       {} / {}", result.best.score, MAX_FITNESS);
    println!("generations: {} ({:?})", result.generations, result.reason);
    println!("evaluations: {}", result.evaluations);
    println!("elapsed:     {:.3?}", elapsed);

    Ok(())
}

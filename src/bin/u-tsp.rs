//! Command-line front end: load a triangular distance matrix, run the GA,
//! print the best tour. Ctrl-C stops the run at the next generation
//! boundary and still prints the best tour found so far.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use u_tsp::ga::{
    CancellationToken, GaConfig, GaRunner, GenerationStats, MutationConfig, ProgressObserver,
    RunReport, Succession,
};
use u_tsp::matrix::loading::load_lower_triangular;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    /// One mutation operator, 75% partial replacement, stagnation window 1000
    Simple,
    /// Swap + inversion mutation, full replacement, stagnation window 50
    Extended,
}

#[derive(Debug, Parser)]
#[command(name = "u-tsp", version, about = "Genetic-algorithm TSP optimizer")]
struct Cli {
    /// Distance matrix file (header line, then lower-triangular rows)
    dataset_file: PathBuf,

    /// Parameter preset the other options override
    #[arg(long, value_enum, default_value_t = Preset::Simple)]
    preset: Preset,

    #[arg(long)]
    population_size: Option<usize>,

    #[arg(long)]
    crossover_probability: Option<f64>,

    /// Probability of the swap-segment-reverse mutation
    #[arg(long, alias = "mutation-swap-probability")]
    mutation_probability: Option<f64>,

    /// Probability of the inversion mutation (enables the second operator)
    #[arg(long)]
    mutation_inversion_probability: Option<f64>,

    #[arg(long)]
    iterations: Option<usize>,

    #[arg(long)]
    tournament_size: Option<usize>,

    /// Share of the next population taken from offspring; omit for the preset's policy
    #[arg(long)]
    succession_ratio: Option<f64>,

    /// Generations without change before redrawing operator probabilities (0 disables)
    #[arg(long)]
    stagnation_threshold: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Print progress every N iterations (0 disables)
    #[arg(long, default_value_t = 1)]
    progress_every: usize,
}

impl Cli {
    fn config(&self) -> GaConfig {
        let mut config = match self.preset {
            Preset::Simple => GaConfig::simple(),
            Preset::Extended => GaConfig::extended(),
        };
        if let Some(n) = self.population_size {
            config = config.with_population_size(n);
        }
        if let Some(p) = self.crossover_probability {
            config.crossover_probability = p;
        }
        if let Some(p) = self.mutation_probability {
            config.mutation.swap_probability = p;
        }
        if let Some(p) = self.mutation_inversion_probability {
            config.mutation = MutationConfig {
                inversion_probability: Some(p),
                ..config.mutation
            };
        }
        if let Some(n) = self.iterations {
            config = config.with_iterations(n);
        }
        if let Some(k) = self.tournament_size {
            config = config.with_tournament_size(k);
        }
        if let Some(ratio) = self.succession_ratio {
            config = config.with_succession(Succession::Partial { ratio });
        }
        if let Some(t) = self.stagnation_threshold {
            config = config.with_stagnation_threshold(t);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

/// Prints `Iteration: n` on one rewritten stderr line.
struct ConsoleProgress {
    every: usize,
}

/// The iteration that was due to run when the run was interrupted.
fn interrupted_iteration(report: &RunReport) -> usize {
    report.last_iteration.map_or(0, |i| i + 1)
}

impl ProgressObserver for ConsoleProgress {
    fn on_generation(&mut self, stats: &GenerationStats) {
        if self.every > 0 && stats.iteration % self.every == 0 {
            let mut err = std::io::stderr().lock();
            let _ = write!(err, "Iteration: {}\r", stats.iteration);
            let _ = err.flush();
        }
    }

    fn on_finish(&mut self, report: &RunReport) {
        if report.interrupted {
            eprintln!();
            eprintln!("Break at iteration num: {}", interrupted_iteration(report));
        } else if self.every > 0 {
            eprintln!();
        }
    }
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(report: &RunReport) {
    println!("------------------------------------------------------");
    match &report.best {
        Some(best) => {
            println!("Best path found: {:?}", best.path.nodes());
            println!("The distance was: {}", best.distance);
            println!("{} {}", best.path.len(), best.path.is_permutation());
        }
        None => println!("No tour was evaluated."),
    }
    println!("------------------------------------------------------");
}

fn main() -> Result<()> {
    enable_tracing();

    let cli = Cli::parse();
    let config = cli.config();
    config.validate().context("invalid parameters")?;

    let matrix = load_lower_triangular(&cli.dataset_file)
        .with_context(|| format!("loading {}", cli.dataset_file.display()))?;
    info!(
        dataset = %cli.dataset_file.display(),
        nodes = matrix.size(),
        "dataset loaded"
    );

    let token = CancellationToken::new();
    let handler_token = token.clone();
    ctrlc::set_handler(move || handler_token.cancel()).context("installing Ctrl-C handler")?;

    let mut progress = ConsoleProgress {
        every: cli.progress_every,
    };
    let report = GaRunner::new(&matrix, &config).run_with_cancel(Some(&token), &mut progress);

    print_report(&report);
    Ok(())
}

//! Answer Scorer CLI

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use answer_scorer::{
    config::Config,
    exercises::{find_exercise, load_exercises, Exercise},
    reporting::{print_console_report, render_validation_report, JsonReport},
};

/// Output format for a scored answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable report
    Console,
    /// JSON report on stdout
    Json,
}

#[derive(Parser)]
#[command(name = "answer-scorer")]
#[command(about = "Score free-text answers against learning-exercise criteria")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one answer against one exercise
    Evaluate {
        /// Exercise file (.json or .toml) or directory
        #[arg(short, long)]
        exercise: PathBuf,

        /// Exercise id (required when the file holds several exercises)
        #[arg(long)]
        id: Option<String>,

        /// Answer text
        #[arg(short, long, conflicts_with = "answer_file", required_unless_present = "answer_file")]
        answer: Option<String>,

        /// Read the answer from a file
        #[arg(long)]
        answer_file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "console")]
        format: OutputFormat,

        /// Also write a JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that every exercise's reference solution passes its own criteria
    Validate {
        /// Exercise file or directory
        #[arg(short, long)]
        exercises: PathBuf,
    },

    /// List available exercises
    ListExercises {
        /// Exercise file or directory
        #[arg(short, long)]
        exercises: PathBuf,
    },

    /// Print the active concept table
    Concepts,

    /// Generate sample configuration
    InitConfig {
        /// Output path for configuration file
        #[arg(short, long, default_value = "config/scorer.toml")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("answer_scorer=debug,info")
    } else {
        EnvFilter::new("answer_scorer=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default(),
    };

    match cli.command {
        Commands::Evaluate {
            exercise,
            id,
            answer,
            answer_file,
            format,
            output,
        } => {
            let answer = match (answer, answer_file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(path)?,
                (None, None) => return Err("an answer is required".into()),
            };
            evaluate(&config, exercise, id.as_deref(), &answer, format, output)?;
        }

        Commands::Validate { exercises } => {
            if !validate(&config, exercises)? {
                std::process::exit(1);
            }
        }

        Commands::ListExercises { exercises } => {
            list_exercises(exercises)?;
        }

        Commands::Concepts => {
            print_concepts(&config)?;
        }

        Commands::InitConfig { output } => {
            init_config(output)?;
        }
    }

    Ok(())
}

fn evaluate(
    config: &Config,
    path: PathBuf,
    id: Option<&str>,
    answer: &str,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let evaluator = config.evaluator()?;
    let exercises = load_exercises(&path)?;
    let exercise = find_exercise(&exercises, id)?;

    let summary = evaluator.evaluate_exercise(exercise, answer);
    let report = JsonReport::new(exercise, answer, summary);

    match format {
        OutputFormat::Console => print_console_report(exercise, &report.summary),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if let Some(output) = output {
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        report.write_to_file(&output)?;
        tracing::info!("Report written to {}", output.display());
    }

    Ok(())
}

/// Returns true when every exercise passes its own solution check
fn validate(config: &Config, path: PathBuf) -> Result<bool, Box<dyn std::error::Error>> {
    let evaluator = config.evaluator()?;
    let exercises = load_exercises(&path)?;

    let checks: Vec<(&Exercise, _)> = exercises
        .iter()
        .map(|exercise| (exercise, evaluator.validate_exercise_solution(exercise)))
        .collect();

    print!("{}", render_validation_report(&checks));
    Ok(checks.iter().all(|(_, check)| check.is_valid))
}

fn list_exercises(path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let exercises = load_exercises(&path)?;

    println!("Available Exercises ({}):", exercises.len());
    println!("{:-<60}", "");

    for exercise in &exercises {
        println!(
            "  {} | {} | {} criteria | {}",
            exercise.id,
            exercise.display_name(),
            exercise.criteria.len(),
            if exercise.solution().is_some() { "solution" } else { "no solution" }
        );
    }

    Ok(())
}

fn print_concepts(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let table = config.concept_table()?;

    println!("Concept Groups ({}):", table.len());
    println!("{:-<60}", "");

    for group in table.iter() {
        println!("  {}: {}", group.name, group.keywords.join(", "));
    }

    Ok(())
}

fn init_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();

    // Ensure parent directory exists
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    config.save_toml(&output)?;
    println!("Configuration written to: {}", output.display());
    Ok(())
}

// src/main.rs
//
// Bootstrap binary: load the snapshot and print a report.
// Both reports are read-only, so the snapshot is never rewritten here;
// interactive front ends call the library directly and persist after mutating.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use campus_reviews::logger;
use campus_reviews::{Config, ProfessorRepository, Store};

#[derive(Debug, Parser)]
#[command(name = "campus-reviews")]
#[command(about = "Academic records and peer reviews for course evaluation")]
struct Cli {
    /// Snapshot file (overrides CAMPUS_REVIEWS_DB)
    #[arg(long)]
    db: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Record counts per collection
    Summary,
    /// Average star rating of every professor
    Averages,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    // 1. CONFIGURATION
    let config = Config::from_env().with_database_path(cli.db);
    log::debug!("Using database {}", config.database_path.display());

    // 2. LOAD
    let mut store = Store::open(&config.database_path)
        .with_context(|| format!("loading {}", config.database_path.display()))?;

    // 3. REPORT
    match cli.command {
        Command::Summary => print_summary(&store),
        Command::Averages => print_averages(&mut store),
    }

    Ok(())
}

fn print_summary(store: &Store) {
    let tables = store.tables();
    println!("students:   {}", tables.students.len());
    println!("professors: {}", tables.professors.len());
    println!("subjects:   {}", tables.subjects.len());
    println!("classes:    {}", tables.classes.len());
    println!("reviews:    {}", tables.reviews.len());
}

fn print_averages(store: &mut Store) {
    let repo = ProfessorRepository::new(store);
    for (id, average) in repo.review_averages() {
        let name = repo.retrieve(id).map(|p| p.name.as_str()).unwrap_or("?");
        println!("{:>4}  {:<40} {:.1}", id, name, average);
    }
}

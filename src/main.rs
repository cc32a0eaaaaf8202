use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kinship::population::{Population, PopulationFile};
use kinship::{Config, EntityId, PathTranslator};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kinship")]
#[command(about = "Query a population's relations and derived kinship")]
struct Args {
    /// Population file (overrides kinship.population from the config)
    #[arg(short, long, global = true)]
    population: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every relation an entity holds
    Relations {
        id: EntityId,
    },
    /// Resolve and label everyone reachable from a root entity
    Tree {
        root: EntityId,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Population statistics
    Stats,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    // Initialize logger from environment variable or default to configured level
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", config.kinship.log_level.as_str())
    ).init();

    let path = args
        .population
        .clone()
        .unwrap_or_else(|| config.population_path().to_path_buf());
    log::info!("Loading population from {}", path.display());

    let file = PopulationFile::load(&path)
        .with_context(|| format!("Failed to load population file: {}", path.display()))?;
    let population = Population::from_file(
        &file,
        config.store,
        config.rules.use_stock_rules,
        config.rules.second_order,
    )?;

    match args.command {
        Command::Relations { id } => print_relations(&population, id)?,
        Command::Tree { root, json } => {
            let translator = PathTranslator::with_overrides(config.labels.clone());
            print_tree(&population, &translator, root, json)?;
        }
        Command::Stats => print_stats(&population),
    }

    Ok(())
}

/// "a   is-the   b" lines, one per link
fn print_relations(population: &Population, id: EntityId) -> Result<()> {
    let triples = population.relation_triples(id)?;
    if triples.is_empty() {
        println!("No relations recorded for entity {}.", id);
        return Ok(());
    }

    for triple in &triples {
        println!("{:<12} {:<12} {}", triple.from, triple.kind, triple.to);
    }
    Ok(())
}

fn print_tree(population: &Population, translator: &PathTranslator, root: EntityId, json: bool) -> Result<()> {
    let entries = population.kinship(root, translator)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let root_name = population
        .registry()
        .get(root)
        .map_or(kinship::graph::UNKNOWN_NAME, |e| e.display_name());
    println!("\nKinship of {} ({}):\n", root_name, root);
    println!("{:-<50}", "");
    println!("{:<6} {:<14} {:<8} {}", "Id", "Name", "Path", "Relation");
    println!("{:-<50}", "");
    for entry in &entries {
        println!("{:<6} {:<14} {:<8} {}", entry.id, entry.name, entry.path, entry.label);
    }
    println!("{:-<50}", "");
    Ok(())
}

fn print_stats(population: &Population) {
    let registry = population.registry();
    println!("Entities:         {}", registry.size());
    println!("Relation kinds:   {}", registry.total_relations());
    println!("Rule kinds:       {}", population.rules().kind_count());
}

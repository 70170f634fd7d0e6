//! Solar System Statistics Tool
//!
//! This binary assembles the solar system from a directory of body records or
//! the live API, optionally scales it, and prints statistics for one attribute
//! over one kind of object.
//!
//! Usage:
//!   cargo run --bin system_stats -- [--data-dir DIR] [--config scale.json] [--scale] \
//!       [--kind planets] [--attribute meanRadius]

use std::path::PathBuf;
use std::time::Instant;

use clap::{ArgAction, Parser};
use orrery::{BodyCatalog, Loader, ObjectKind, ScaleOverrides};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Solar System Statistics Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Assembles the solar system and prints attribute statistics",
    long_about = None
)]
struct Args {
    /// Directory of `<id>.json` body records (defaults to the live API)
    #[arg(short = 'D', long)]
    data_dir: Option<PathBuf>,

    /// JSON file of scale overrides merged over the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scale the system before computing statistics
    #[arg(short, long, action = ArgAction::SetTrue)]
    scale: bool,

    /// Object kind: planets, moons, suns or objects
    #[arg(short, long, default_value = "planets")]
    kind: String,

    /// Attribute to report on
    #[arg(short, long, default_value = "semimajorAxis")]
    attribute: String,

    /// Save every planet and sun into this directory
    #[arg(long)]
    save_to: Option<PathBuf>,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

fn main() -> Result<()> {
    let args = Args::parse();
    let kind: ObjectKind = args.kind.parse()?;

    let overrides = match &args.config {
        Some(path) => Some(ScaleOverrides::from_file(path)?),
        None => None,
    };

    let mut loader = Loader::new();
    if let Some(dir) = &args.data_dir {
        loader = loader.with_data_dir(dir);
    }

    let start_time = Instant::now();
    let mut system = loader.load_system("Sol", overrides.as_ref())?;
    println!(
        "Assembled {} in {:.2?}: {} planets, {} moons",
        system.name,
        start_time.elapsed(),
        system.planets().len(),
        system.moons().len()
    );

    if args.scale {
        system.scale_system(None);
        println!("Scaled with {:?}", system.config());
    }

    let selection = system.select(kind);
    print_section_header(&format!("{} by {}", kind, args.attribute));
    match selection.query(&args.attribute) {
        Some(pairs) => {
            for (name, value) in pairs {
                println!("  {:<20} {}", name, value);
            }
        }
        None => {
            println!("  no {} has attribute {}", kind, args.attribute);
            return Ok(());
        }
    }

    print_section_header("Statistics");
    if let Some((lo, hi)) = selection.minmax(&args.attribute) {
        println!("  min:  {}", lo.english_name);
        println!("  max:  {}", hi.english_name);
    }
    match (selection.mean(&args.attribute), selection.std(&args.attribute)) {
        (Some(mean), Some(std)) => {
            println!("  mean: {:.6e}", mean);
            println!("  std:  {:.6e}", std);
        }
        _ => println!("  attribute is not numeric"),
    }

    if let Some(dir) = &args.save_to {
        let mut written = system.suns().save_all(dir)?;
        written.extend(system.planets().save_all(dir)?);
        println!("\nSaved {} bodies to {}", written.len(), dir.display());
    }

    Ok(())
}

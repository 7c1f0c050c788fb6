//! Varnomen CLI entry point
//!
//! Reformat variant-caller annotations into HGVS-style nomenclature.

use anyhow::Context;
use clap::{Parser, Subcommand};
use varnomen::formats::{self, reformat_record, ConvertOptions, CoordinateTable, VariantRecord};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "varnomen")]
#[command(about = "Reformat variant annotations into HGVS-style nomenclature")]
#[command(version)]
#[command(author = "Varnomen Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a single change descriptor
    Format {
        /// Raw change descriptor (e.g. 450S>450L)
        descriptor: String,
        /// Gene identifier; a trailing 'c' marks a minus-strand gene
        #[arg(short = 'g', long)]
        gene: String,
        /// Variant class tag (e.g. missense_variant)
        #[arg(short = 'y', long = "type")]
        vartype: String,
        /// Gene coordinate table, needed for frameshift variants
        #[arg(short = 'c', long)]
        coords: Option<PathBuf>,
    },
    /// Convert a tab-separated variant table
    Convert {
        /// Gene coordinate table (gene, chromosome position, gene position)
        coords: PathBuf,
        /// Input variant table with gene, change and type columns
        input: PathBuf,
        /// Output file (optional, output.tsv if not specified)
        output: Option<PathBuf>,
        /// Number of threads
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },
}

fn load_coords(path: &Path) -> anyhow::Result<CoordinateTable> {
    let start = Instant::now();
    eprintln!("Loading coordinate table: {:?}", path);

    let table = CoordinateTable::from_file(path)
        .with_context(|| format!("Failed to load coordinate table {:?}", path))?;

    eprintln!(
        "Coordinate table loaded in {:.2}s ({} genes)",
        start.elapsed().as_secs_f64(),
        table.len()
    );
    Ok(table)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Format { descriptor, gene, vartype, coords } => {
            let table = match coords.as_deref() {
                Some(path) => load_coords(path)?,
                None => CoordinateTable::new(),
            };

            let record = VariantRecord::new(gene, descriptor, vartype);
            let hgvs = reformat_record(&record, &table)
                .with_context(|| format!("Cannot format {} {}", record.gene, record.change))?
                .into_nomenclature(&record.change);
            println!("{}", hgvs);
        }

        Commands::Convert { coords, input, output, threads } => {
            let table = load_coords(&coords)?;
            let output_path = output.unwrap_or_else(|| PathBuf::from("output.tsv"));
            let mut unformatted_path = output_path.clone().into_os_string();
            unformatted_path.push(".unformatted");
            let unformatted_path = PathBuf::from(unformatted_path);

            eprintln!("Converting variant table: {:?} -> {:?}", input, output_path);
            let options = ConvertOptions { threads, ..ConvertOptions::default() };
            let stats = formats::convert_variants(
                &input,
                &output_path,
                &unformatted_path,
                &table,
                options,
            )?;

            eprintln!("\n=== Conversion Statistics ===");
            eprintln!("Total variants:  {}", stats.total);
            eprintln!("Formatted:       {}", stats.formatted);
            eprintln!("Unchanged:       {}", stats.unchanged);
            eprintln!("Failed:          {}", stats.failed);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}

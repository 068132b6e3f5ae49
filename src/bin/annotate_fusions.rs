use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::Level;
use simple_logger::init_with_level;

use fusion_annotator::cli;
use fusion_annotator::config::AnnotationConfig;
use fusion_annotator::contig::ContigMap;
use fusion_annotator::domains::load_protein_domains;
use fusion_annotator::fusions::{annotate_fusions, read_fusions, write_fusions};
use fusion_annotator::gff3::load_gene_annotation;
use fusion_annotator::io::open_path;
use fusion_annotator::peptide::FrameStatus;
use fusion_annotator::perf;
use fusion_annotator::sequence::Assembly;

#[derive(Parser)]
#[command(
    name = "annotate_fusions",
    about = "Annotate predicted gene fusions with retained protein domains and fusion peptides"
)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short = 'c', long = "config")]
    config: PathBuf,

    /// Fusion predictions (TSV)
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Annotated fusions (TSV)
    #[arg(short = 'o', long = "output")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();
    init_with_level(Level::Info)?;

    cli::banner("Annotate Fusions");

    // ── Configuration ────────────────────────────────────
    cli::section("Configuration");

    let config = AnnotationConfig::from_file(&cli_args.config)?;
    cli::kv("Config", &cli_args.config.display().to_string());
    for (name, path) in config.file_entries() {
        cli::kv(name, &path.display().to_string());
    }
    cli::kv("Input", &cli_args.input.display().to_string());
    cli::kv("Output", &cli_args.output.display().to_string());

    eprintln!();

    // ── Loading ──────────────────────────────────────────
    cli::section("Loading");

    let mut contigs = ContigMap::new();
    let assembly = Assembly::from_fasta(open_path(&config.assembly)?, &mut contigs)
        .with_context(|| format!("failed to load assembly: {}", config.assembly.display()))?;
    cli::kv("Contigs", &assembly.len().to_string());

    let annotation = load_gene_annotation(open_path(&config.gene_annotation)?, &contigs)
        .with_context(|| {
            format!(
                "failed to load gene annotation: {}",
                config.gene_annotation.display()
            )
        })?;
    cli::kv("Genes", &annotation.gene_count().to_string());
    cli::kv("Transcripts", &annotation.transcript_count().to_string());

    let domains_source = config.protein_domains.display().to_string();
    let domains = load_protein_domains(
        open_path(&config.protein_domains)?,
        &domains_source,
        &contigs,
        &annotation,
    )?;
    cli::kv("Protein domains", &domains.len().to_string());

    eprintln!();

    // ── Annotation ───────────────────────────────────────
    cli::section("Annotation");

    let annotation_start = Instant::now();
    let table = read_fusions(open_path(&cli_args.input)?)
        .with_context(|| format!("failed to read fusions: {}", cli_args.input.display()))?;
    if table.is_empty() {
        cli::warning("no fusions in input");
    }

    let annotations = annotate_fusions(&table, &contigs, &annotation, &assembly, &domains);

    let count = |status: FrameStatus| annotations.iter().filter(|a| a.frame == status).count();
    let total = annotations.len();
    cli::kv("Fusions", &total.to_string());
    for status in [
        FrameStatus::InFrame,
        FrameStatus::OutOfFrame,
        FrameStatus::StopCodon,
        FrameStatus::Unknown,
    ] {
        let n = count(status);
        cli::kv(status.as_str(), &format!("{n} ({})", cli::percent(n, total)));
    }
    cli::kv(
        "Throughput",
        &perf::format_rate(total, annotation_start.elapsed(), "fusions"),
    );

    let output = File::create(&cli_args.output)
        .with_context(|| format!("failed to create {}", cli_args.output.display()))?;
    write_fusions(BufWriter::new(output), &table, &annotations)?;
    cli::success(&format!("wrote {}", cli_args.output.display()));

    cli::print_summary(start);
    Ok(())
}

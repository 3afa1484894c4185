mod display;
mod pipeline;
mod plots;
mod visualize;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use clausewise_ai::{HashingEmbedder, TextEmbedder};
use clausewise_core::TableLayout;
use clausewise_pdf::{ContractGenerator, GenerateOptions};
use clausewise_store::{MANIFEST_FILE, read_clause_csv, write_clause_csv, write_manifest};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::pipeline::Analysis;

const DEFAULT_MODEL_DIR: &str = "models/legal-bert-base-uncased";
const ANALYSIS_CSV: &str = "outputs/results/contract_analysis_results.csv";
const VALIDATED_CSV: &str = "outputs/results/validated_clauses_with_tones.csv";

#[derive(Parser, Debug)]
#[command(name = "clausewise", version, about = "Contract clause extraction, embedding and tone analysis")]
struct Cli {
    /// Directory holding `model.onnx` and `tokenizer.json`.
    #[arg(long, global = true, env = "CLAUSEWISE_MODEL_DIR", default_value = DEFAULT_MODEL_DIR)]
    model_dir: PathBuf,

    #[arg(long, global = true, value_enum, default_value_t = EmbedderKind::default())]
    embedder: EmbedderKind,

    /// Token limit per clause for the ONNX encoder.
    #[arg(long, global = true, default_value_t = 512)]
    max_length: usize,

    /// Vector size for the hashing embedder.
    #[arg(long, global = true, default_value_t = 768)]
    hash_dim: usize,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate synthetic contract PDFs
    Generate {
        #[arg(long, default_value = "generated_contracts")]
        out: PathBuf,
        /// Number of companies (prompted for when omitted)
        #[arg(long)]
        companies: Option<usize>,
        /// Minimum contracts per company (prompted for when omitted)
        #[arg(long)]
        min: Option<usize>,
        /// Maximum contracts per company (prompted for when omitted)
        #[arg(long)]
        max: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the beginning of a PDF's text
    Extract {
        pdf: PathBuf,
        #[arg(long, default_value_t = 500)]
        chars: usize,
    },
    /// Find and embed key clauses in a single PDF
    Analyze { pdf: PathBuf },
    /// Extract clauses from every contract in a folder tree
    Scan {
        #[arg(long, default_value = "generated_contracts")]
        input: PathBuf,
        #[arg(long, default_value = ANALYSIS_CSV)]
        output: PathBuf,
        /// Attach an extractive summary to each clause
        #[arg(long)]
        summarize: bool,
    },
    /// Embed clause content and label its tone
    Validate {
        #[arg(long, default_value = ANALYSIS_CSV)]
        input: PathBuf,
        #[arg(long, default_value = VALIDATED_CSV)]
        output: PathBuf,
    },
    /// Render heatmaps, PCA scatter, ROC and precision-recall curves
    Visualize {
        #[arg(long, default_value = VALIDATED_CSV)]
        input: PathBuf,
        #[arg(long, default_value = "outputs/visualizations")]
        out_dir: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the tone label for a piece of text
    Tone { text: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum EmbedderKind {
    /// ONNX Runtime encoder loaded from --model-dir
    Onnx,
    /// Model-free feature hashing
    Hash,
}

impl Default for EmbedderKind {
    fn default() -> Self {
        if cfg!(feature = "onnx") { Self::Onnx } else { Self::Hash }
    }
}

impl std::fmt::Display for EmbedderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Onnx => "onnx",
            Self::Hash => "hash",
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();
    info!("clausewise v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Command::Generate {
            out,
            companies,
            min,
            max,
            seed,
        } => cmd_generate(out, *companies, *min, *max, *seed),
        Command::Extract { pdf, chars } => cmd_extract(pdf, *chars),
        Command::Analyze { pdf } => cmd_analyze(&cli, pdf),
        Command::Scan {
            input,
            output,
            summarize,
        } => cmd_scan(&cli, input, output, *summarize),
        Command::Validate { input, output } => cmd_validate(&cli, input, output),
        Command::Visualize {
            input,
            out_dir,
            seed,
        } => cmd_visualize(input, out_dir, *seed),
        Command::Tone { text } => {
            println!("{}", clausewise_core::label_tone(text));
            Ok(())
        }
    }
}

// ── Subcommands ──

fn cmd_generate(
    out: &Path,
    companies: Option<usize>,
    min: Option<usize>,
    max: Option<usize>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let opts = GenerateOptions {
        out_dir: out.to_path_buf(),
        companies: prompt_or("Enter the number of companies to create: ", companies)?,
        min_contracts: prompt_or("Enter the minimum number of contracts per company: ", min)?,
        max_contracts: prompt_or("Enter the maximum number of contracts per company: ", max)?,
        date: chrono::Local::now().date_naive(),
    };

    let mut generator = ContractGenerator::new(rng_from(seed));
    let contracts = generator.generate_batch(&opts)?;

    let manifest = out.join(MANIFEST_FILE);
    write_manifest(&manifest, &contracts)?;

    println!(
        "{} contracts written under {} (manifest: {})",
        contracts.len(),
        out.display(),
        manifest.display()
    );
    Ok(())
}

fn cmd_extract(pdf: &Path, chars: usize) -> anyhow::Result<()> {
    let text = clausewise_pdf::extract_text(pdf)?;
    let head: String = text.chars().take(chars).collect();
    println!("{head}");
    Ok(())
}

fn cmd_analyze(cli: &Cli, pdf: &Path) -> anyhow::Result<()> {
    match pipeline::analyze_pdf(pdf, || load_embedder(cli))? {
        Analysis::Missing => println!("Error: The file '{}' does not exist.", pdf.display()),
        Analysis::EmptyText => println!("Error: No text extracted from '{}'.", pdf.display()),
        Analysis::NoClauses => println!("No relevant clauses found in '{}'.", pdf.display()),
        Analysis::Clauses(records) => display::print_clause_table(&records)?,
    }
    Ok(())
}

fn cmd_scan(cli: &Cli, input: &Path, output: &Path, summarize: bool) -> anyhow::Result<()> {
    let mut embedder = load_embedder(cli)?;
    let (records, stats) = pipeline::scan_contracts(input, embedder.as_mut(), summarize)?;
    write_clause_csv(output, &records, TableLayout::Analysis)?;

    eprintln!(
        "  {} clauses from {} contracts in {:.1}s",
        stats.clauses, stats.files, stats.elapsed_secs
    );
    println!("Results saved to {}", output.display());
    Ok(())
}

fn cmd_validate(cli: &Cli, input: &Path, output: &Path) -> anyhow::Result<()> {
    let records = read_clause_csv(input).with_context(|| format!("loading {}", input.display()))?;
    info!(rows = records.len(), input = %input.display(), "loaded clause table");

    let mut embedder = load_embedder(cli)?;
    let validated = pipeline::validate_clauses(records, embedder.as_mut())?;
    write_clause_csv(output, &validated, TableLayout::Validated)?;

    display::print_tone_summary(&validated);
    println!("Updated data saved to: {}", output.display());
    Ok(())
}

fn cmd_visualize(input: &Path, out_dir: &Path, seed: Option<u64>) -> anyhow::Result<()> {
    let records = read_clause_csv(input).with_context(|| format!("loading {}", input.display()))?;
    let report = visualize::run(&records, out_dir, &mut rng_from(seed))?;

    for path in &report.written {
        println!("Saved {}", path.display());
    }
    for name in &report.skipped {
        println!("Skipped {name}");
    }
    Ok(())
}

// ── Helpers ──

fn load_embedder(cli: &Cli) -> anyhow::Result<Box<dyn TextEmbedder>> {
    match cli.embedder {
        EmbedderKind::Hash => {
            info!(dim = cli.hash_dim, "using hashing embedder");
            Ok(Box::new(HashingEmbedder::new(cli.hash_dim)))
        }
        EmbedderKind::Onnx => load_onnx(cli),
    }
}

#[cfg(feature = "onnx")]
fn load_onnx(cli: &Cli) -> anyhow::Result<Box<dyn TextEmbedder>> {
    let embedder = clausewise_ai::OnnxEmbedder::load(&cli.model_dir, cli.max_length, false)
        .with_context(|| format!("loading model from {}", cli.model_dir.display()))?;
    Ok(Box::new(embedder))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(_cli: &Cli) -> anyhow::Result<Box<dyn TextEmbedder>> {
    anyhow::bail!("built without the `onnx` feature; use --embedder hash")
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Use `value` if given, otherwise ask on stdin until a number is entered.
fn prompt_or(question: &str, value: Option<usize>) -> anyhow::Result<usize> {
    if let Some(v) = value {
        return Ok(v);
    }
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("{question}");
        std::io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            anyhow::bail!("no input for: {}", question.trim_end_matches(": "));
        }
        match line.trim().parse() {
            Ok(n) => return Ok(n),
            Err(_) => eprintln!("  please enter a whole number"),
        }
    }
}

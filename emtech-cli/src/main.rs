use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;
use emtech_core::analysis::{WordList, analyze};
use emtech_core::export::write_csv;
use emtech_core::io::{build_output_path, read_text, write_atomic};
use emtech_core::normalizer::{Markers, Normalizer, NormalizerConfig};
use emtech_core::{FrequencyTable, GenerationInput, Generator};
use emtech_qubit::{Matrix, StateVector, apply_unitary, is_valid_qubit, tensor_product};
use log::{info, warn};
use num_complex::Complex;

mod cli;

use cli::{AnalyzeArgs, BuildArgs, Cli, Command, ExportArgs, GenerateArgs};

/// Initialize env_logger; RUST_LOG still wins over the -v flags
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Ask a question on stdout and read one trimmed line from stdin
fn prompt(question: &str) -> Result<String> {
    print!("{question}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        bail!("no answer given for '{question}'");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

fn build(args: &BuildArgs) -> Result<()> {
    let defaults = Markers::default();
    let config = NormalizerConfig {
        markers: Markers {
            start: args.start_marker.clone().unwrap_or(defaults.start),
            end: args.end_marker.clone().unwrap_or(defaults.end),
        },
        collapse_spaces: args.collapse_spaces,
    };
    let corpus = Normalizer::new(config)
        .normalize_files(args.sources.as_slice())
        .context("failed to read sources")?;
    info!("corpus: {} characters from {} sources", corpus.len(), args.sources.len());

    let granularity = args.granularity.into();
    let table = if args.parallel {
        FrequencyTable::build_parallel(&corpus, args.order(), granularity)?
    } else {
        FrequencyTable::build(&corpus, args.order(), granularity)?
    };
    if table.is_empty() {
        warn!("the saved table is empty and cannot be used for generation");
    }

    table
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("{} contexts written to {}", table.len(), args.output.display());

    if args.csv {
        let csv_path = build_output_path(&args.output, "csv")?;
        write_csv(&table, &csv_path).with_context(|| format!("failed to write {}", csv_path.display()))?;
        println!("CSV written to {}", csv_path.display());
    }
    Ok(())
}

fn generate(args: &GenerateArgs) -> Result<()> {
    let table = FrequencyTable::load(&args.table)
        .with_context(|| format!("failed to load table {}", args.table.display()))?;
    // An empty table is refused before asking anything or touching the output file
    let generator = Generator::new(&table)?;

    let seed = match &args.seed {
        Some(seed) => seed.clone(),
        None => prompt(&format!("Starting context ({} symbols)", table.order() - 1))?,
    };
    let length = match args.length {
        Some(length) => length,
        None => prompt("Length")?
            .trim()
            .parse::<usize>()
            .context("length must be a positive integer")?,
    };

    let mut input = GenerationInput::new(&seed, length)?;
    input.recovery = args.recovery.into();
    input.rng_seed = args.rng_seed;

    let report = generator.generate(&input)?;
    println!("{}", report.sequence);

    write_atomic(&args.output, report.sequence.as_bytes())
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("{} symbols written to {}", report.symbols.len(), args.output.display());
    Ok(())
}

fn analyze_file(args: &AnalyzeArgs) -> Result<()> {
    let text = read_text(&args.file).with_context(|| format!("failed to read {}", args.file.display()))?;
    let words = match &args.words {
        Some(path) => Some(WordList::load(path).with_context(|| format!("failed to read {}", path.display()))?),
        None => None,
    };

    let analysis = analyze(&text, words.as_ref());
    println!("length count");
    print!("{}", analysis.histogram);
    match analysis.average {
        Some(average) => println!("average length: {average:.3}"),
        None => println!("average length: n/a"),
    }
    if let Some(ratio) = analysis.known_ratio {
        println!("known words: {:.2}%", ratio * 100.0);
    }
    Ok(())
}

fn export(args: &ExportArgs) -> Result<()> {
    let table = FrequencyTable::load(&args.table)
        .with_context(|| format!("failed to load table {}", args.table.display()))?;
    write_csv(&table, &args.csv).with_context(|| format!("failed to write {}", args.csv.display()))?;
    println!("CSV written to {}", args.csv.display());
    Ok(())
}

fn qubit_demo() -> Result<()> {
    let amplitude = std::f64::consts::FRAC_1_SQRT_2;
    let alpha = Complex::new(amplitude, 0.0);
    let beta = Complex::new(0.0, amplitude);
    println!("Is valid qubit: {}", is_valid_qubit(alpha, beta));

    let product = tensor_product(&[StateVector::zero(), StateVector::one()])?;
    println!("Tensor product of |0> and |1>: {product}");

    let h = Matrix::hadamard();
    println!("Is Hadamard gate unitary: {}", h.is_unitary());

    let applied = apply_unitary(&h, &StateVector::zero())?;
    println!("Result of applying Hadamard gate to |0>: {applied}");
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    match &args.command {
        Command::Build(build_args) => build(build_args),
        Command::Generate(generate_args) => generate(generate_args),
        Command::Analyze(analyze_args) => analyze_file(analyze_args),
        Command::Export(export_args) => export(export_args),
        Command::Qubit => qubit_demo(),
    }
}

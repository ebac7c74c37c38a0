use anyhow::Context;
use clap::Parser;
use health_tracker::adapters::catalog::{parse_catalog, CatalogFormat};
use health_tracker::core::tokenizer::tokenize;
use health_tracker::utils::logger;
use health_tracker::core::symptom_checker::check_tokens;
use health_tracker::{Advice, FALLBACK_ADVICE};

#[derive(Parser)]
#[command(name = "symptom-check")]
#[command(about = "Run the symptom matcher against a catalog file without starting the server")]
struct Args {
    /// Path to a catalog file (.json, .csv or .tsv)
    #[arg(short, long, default_value = "data/symptoms.json")]
    catalog: String,

    /// Free-text symptoms, e.g. "headache and fever"
    symptoms: String,

    /// Print the normalized tokens as well
    #[arg(long)]
    show_tokens: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let format = CatalogFormat::from_path(&args.catalog)
        .with_context(|| format!("unsupported catalog file extension: {}", args.catalog))?;
    let data = std::fs::read(&args.catalog)
        .with_context(|| format!("failed to read catalog file {}", args.catalog))?;
    let catalog = parse_catalog(&data, format).context("failed to parse catalog")?;

    tracing::info!("📋 Loaded {} catalog phrases from {}", catalog.len(), args.catalog);

    let tokens = tokenize(&args.symptoms)?;
    if args.show_tokens {
        println!("🔍 Tokens: {:?}", tokens.as_slice());
    }

    match check_tokens(&tokens, &catalog) {
        Advice::Matched(items) => {
            for item in items {
                println!("• {}", item);
            }
        }
        Advice::Fallback => println!("{}", FALLBACK_ADVICE),
    }

    Ok(())
}

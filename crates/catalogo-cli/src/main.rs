use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use catalogo_core::{
    builtin_categories, load_app_config, load_categories, AppConfig, CategoriesFile,
};
use catalogo_etl::{convert_catalog, prepare_catalog, ConversionSummary};

#[derive(Debug, Parser)]
#[command(name = "catalogo")]
#[command(about = "Convert the product catalog workbook into storefront JSON")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert the workbook and write the storefront JSON (the default).
    Convert(ConvertArgs),
    /// Print the configured category definitions.
    Categories {
        /// YAML file with category definitions (defaults to the built-in set).
        #[arg(long)]
        categories: Option<PathBuf>,
    },
}

#[derive(Debug, Default, PartialEq, Eq, Args)]
struct ConvertArgs {
    /// Workbook to read (overrides `CATALOGO_WORKBOOK_PATH`).
    #[arg(long)]
    workbook: Option<PathBuf>,
    /// JSON file to write (overrides `CATALOGO_OUTPUT_PATH`).
    #[arg(long)]
    output: Option<PathBuf>,
    /// YAML file with category definitions (overrides `CATALOGO_CATEGORIES_PATH`).
    #[arg(long)]
    categories: Option<PathBuf>,
    /// Validate and transform the workbook without writing output.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_app_config().context("failed to load configuration")?;
    init_tracing(&config)?;

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(config, &args),
        Some(Commands::Categories { categories }) => {
            run_categories(categories.as_deref().or(config.categories_path.as_deref()))
        }
        None => run_convert(config, &ConvertArgs::default()),
    }
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

/// Command-line flags take precedence over environment configuration.
fn apply_overrides(mut config: AppConfig, args: &ConvertArgs) -> AppConfig {
    if let Some(workbook) = &args.workbook {
        config.workbook_path.clone_from(workbook);
    }
    if let Some(output) = &args.output {
        config.output_path.clone_from(output);
    }
    if let Some(categories) = &args.categories {
        config.categories_path = Some(categories.clone());
    }
    config
}

fn resolve_categories(path: Option<&Path>) -> anyhow::Result<CategoriesFile> {
    match path {
        Some(path) => load_categories(path)
            .with_context(|| format!("failed to load categories from {}", path.display())),
        None => builtin_categories().context("built-in category definitions are invalid"),
    }
}

fn run_convert(config: AppConfig, args: &ConvertArgs) -> anyhow::Result<()> {
    let config = apply_overrides(config, args);
    let categories = resolve_categories(config.categories_path.as_deref())?;
    let workbook = config.workbook_path.display().to_string();

    if args.dry_run {
        let prepared = prepare_catalog(&config, &categories)
            .with_context(|| format!("failed to convert {workbook}"))?;
        println!(
            "dry run: {}; {} not written",
            describe(&prepared.summary),
            config.output_path.display()
        );
        return Ok(());
    }

    let summary = convert_catalog(&config, &categories)
        .with_context(|| format!("failed to convert {workbook}"))?;
    println!(
        "wrote {} to {}",
        describe(&summary),
        config.output_path.display()
    );
    Ok(())
}

fn describe(summary: &ConversionSummary) -> String {
    let mut text = format!(
        "{} products, {} variants, {} categories",
        summary.products, summary.variants, summary.categories
    );
    if summary.synthesized_categories > 0 {
        text.push_str(&format!(
            " ({} with generated text)",
            summary.synthesized_categories
        ));
    }
    if summary.orphan_variants > 0 {
        text.push_str(&format!(
            "; {} variants skipped (unknown product)",
            summary.orphan_variants
        ));
    }
    if summary.variants_missing_images > 0 {
        text.push_str(&format!(
            "; {} variants without images",
            summary.variants_missing_images
        ));
    }
    text
}

fn run_categories(path: Option<&Path>) -> anyhow::Result<()> {
    let categories = resolve_categories(path)?;
    for category in &categories.categories {
        println!(
            "{}\t{}\t{}",
            category.code, category.title, category.description
        );
    }
    Ok(())
}

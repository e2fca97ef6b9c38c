mod args;
mod reporter;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docuflow_core::{
    collect_sources, format_file_size, load_config_or_default, validate_config, BatchResult,
    CancelFlag, ConversionEngine, ConversionRequest, FormatCatalog, LogFormat, LoggingConfig,
    PandocTransformer,
};

use args::Args;
use reporter::BarReporter;

/// At least one file converted
const EXIT_OK: u8 = 0;
/// Nothing converted
const EXIT_ALL_FAILED: u8 = 1;
/// Could not start the batch at all
const EXIT_FATAL: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("Fatal error: {:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn run(args: Args) -> Result<u8> {
    let mut config = load_config_or_default(args.config.as_deref()).with_context(|| {
        match &args.config {
            Some(path) => format!("Failed to load config from {:?}", path),
            None => "Failed to load config from environment".to_string(),
        }
    })?;
    args.apply_to(&mut config);
    validate_config(&config).context("Configuration validation failed")?;

    init_logging(&config.logging);

    if args.list_formats {
        print_formats(FormatCatalog::builtin());
        return Ok(EXIT_OK);
    }

    let target = config
        .output
        .format
        .context("No target format, pass --format or set output.format")?;

    let transformer = PandocTransformer::new(config.transformer.clone());
    let engine = ConversionEngine::new(config.engine.clone(), transformer)
        .await
        .context("Cannot start conversion")?;

    let sources = collect_sources(&args.inputs, args.recursive, engine.catalog())
        .await
        .context("Failed to read inputs")?;

    let requests: Vec<_> = sources
        .into_iter()
        .map(|source| {
            let request =
                ConversionRequest::new(source, target).with_naming(config.output.naming);
            match &config.output.directory {
                Some(dir) => request.with_destination(dir),
                None => request,
            }
        })
        .collect();

    info!(files = requests.len(), target = %target, "Converting");

    let cancel = CancelFlag::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing files in progress");
            on_interrupt.cancel();
        }
    });

    let reporter = BarReporter::new(requests.len(), args.no_progress || args.json);
    let result = engine
        .convert_batch_with_cancel(&requests, &reporter, &cancel)
        .await;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialize result")?
        );
    } else {
        print_summary(&result);
    }

    Ok(if result.succeeded() > 0 {
        EXIT_OK
    } else {
        EXIT_ALL_FAILED
    })
}

fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout is reserved for results
    match config.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn print_formats(catalog: &FormatCatalog) {
    println!("Supported conversions:");
    for extension in catalog.extensions() {
        let Some(source) = catalog.classify_extension(&extension) else {
            continue;
        };
        let targets: Vec<_> = catalog
            .targets(source)
            .into_iter()
            .map(|t| t.short_name())
            .collect();
        println!(
            "  {:<10} {:<12} -> {}",
            extension,
            source.to_string(),
            targets.join(", ")
        );
    }
}

fn print_summary(result: &BatchResult) {
    for outcome in &result.outcomes {
        let source = outcome.request.source_path.display();
        match (&outcome.output_path, outcome.success) {
            (Some(output), true) => println!(
                "ok      {} -> {} ({})",
                source,
                output.display(),
                format_file_size(outcome.output_size_bytes.unwrap_or(0))
            ),
            _ => println!(
                "failed  {}: {}",
                source,
                outcome.diagnostic.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    println!(
        "{} of {} converted, {} failed{} ({:.1}s)",
        result.succeeded(),
        result.total(),
        result.failed(),
        match result.cancelled() {
            0 => String::new(),
            n => format!(", {} cancelled", n),
        },
        result.duration_ms as f64 / 1000.0
    );
}

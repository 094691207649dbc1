use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use ollama_describe::{
    discover_vision_models, plan_defaults, plan_interactive, BatchProcessor, Category,
    DescribeConfig, OllamaClient, PlanOverrides, Prompter, Reporter, TracingReporter,
};
use tracing_subscriber::EnvFilter;

/// Describe local images with an Ollama vision model and save a text report.
#[derive(Debug, Parser)]
#[command(name = "ollama-describe", version)]
struct Cli {
    /// Directory scanned for images (created if missing).
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// Directory receiving `<YYYYMMDD-HHMMSS>.txt` reports.
    #[arg(long, default_value = "outputs")]
    outputs_dir: PathBuf,
    /// Ollama server address.
    #[arg(long, env = "OLLAMA_HOST", default_value = "http://localhost:11434")]
    endpoint: String,
    /// Model to use instead of asking.
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    model: Option<String>,
    /// Prompt to use instead of asking.
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    prompt: Option<String>,
    /// Describe this single file instead of the data directory.
    #[arg(long, conflicts_with = "all")]
    image: Option<PathBuf>,
    /// Describe every image in the data directory without asking.
    #[arg(long)]
    all: bool,
    /// Never ask; use defaults for anything not given.
    #[arg(short, long)]
    yes: bool,
    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("ollama-describe error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = DescribeConfig::builder()
        .with_endpoint(with_scheme(&cli.endpoint))
        .with_timeout(Duration::from_secs(cli.timeout_secs))
        .with_data_dir(cli.data_dir)
        .with_outputs_dir(cli.outputs_dir)
        .build();
    let reporter = TracingReporter;

    if !config.data_dir.is_dir() {
        fs::create_dir_all(&config.data_dir)
            .with_context(|| format!("failed to create {}", config.data_dir.display()))?;
        reporter.emit(
            Category::Warning,
            &format!("Created directory: {}", config.data_dir.display()),
        );
    }
    reporter.emit(Category::Start, "Starting image processing application...");

    let client = OllamaClient::from_config(&config);
    let overrides = PlanOverrides {
        image: cli.image,
        all: cli.all,
        model: cli.model,
        prompt: cli.prompt,
    };
    let models = match overrides.model {
        Some(_) => Vec::new(),
        None => discover_vision_models(&client, &reporter).await,
    };

    let plan = if !cli.yes && io::stdin().is_terminal() {
        println!("\nImage Analysis Configuration");
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        match plan_interactive(
            &mut prompter,
            &config.data_dir,
            &overrides,
            &models,
            &reporter,
        )? {
            Some(plan) => plan,
            None => return Ok(()),
        }
    } else {
        if !cli.yes {
            reporter.emit(
                Category::Warning,
                "No interactive terminal detected. Using defaults.",
            );
        }
        plan_defaults(&config.data_dir, &overrides, &models)
    };

    let processor = BatchProcessor::new(client, reporter, &config.outputs_dir);
    if let Some(outcome) = processor
        .process(&plan.target, &plan.prompt, &plan.model)
        .await?
    {
        if outcome.failed > 0 {
            reporter.emit(
                Category::Warning,
                &format!("{} of {} images failed", outcome.failed, outcome.total),
            );
        }
        reporter.emit(
            Category::Completion,
            "Image processing completed successfully!",
        );
    }

    reporter.emit(Category::Completion, "All tasks completed!");
    Ok(())
}

/// `OLLAMA_HOST` is often given as bare `host:port`.
fn with_scheme(endpoint: &str) -> String {
    if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("http://{endpoint}")
    }
}

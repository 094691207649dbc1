use ollama_describe::{BatchProcessor, OllamaClient, TracingReporter, DEFAULT_PROMPT};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: describe_images <file-or-dir> [model]");
        std::process::exit(1);
    });

    let model = std::env::args()
        .nth(2)
        .unwrap_or("llava:latest".to_string());

    let client = OllamaClient::new("http://localhost:11434");
    let processor = BatchProcessor::new(client, TracingReporter, "outputs");

    println!("Describing {} with model '{}'...", path, model);

    match processor
        .process(Path::new(&path), DEFAULT_PROMPT, &model)
        .await?
    {
        Some(outcome) => println!(
            "\n{} described, {} failed -> {}",
            outcome.succeeded,
            outcome.failed,
            outcome.report_path.display()
        ),
        None => println!("\nNo images found."),
    }

    Ok(())
}

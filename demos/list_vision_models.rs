use ollama_describe::{discover_vision_models, OllamaClient, TracingReporter};

/// Lists the installed models that look vision-capable.
///
/// Matching is by name only (llava, llama3.2-vision, gemma3, ...), so a
/// model listed here can still answer HTTP 400 to an image request.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or("http://localhost:11434".to_string());

    let client = OllamaClient::new(&endpoint);
    let models = discover_vision_models(&client, &TracingReporter).await;

    println!("\nVision models at {} ({}):", endpoint, models.len());
    for model in &models {
        println!("  - {}", model);
    }
}

use crate::client::InferenceClient;
use crate::events::{Category, Reporter};

/// Substrings identifying vision-capable model families.
pub const VISION_MODEL_HINTS: &[&str] = &[
    "llava",
    "llava-phi3",
    "llama3.2-vision",
    "bakllava",
    "cogvlm",
    "qwen-vl",
    "gemma3:4b",
    "gemma3",
];

/// Keep the names matching any of [`VISION_MODEL_HINTS`] (case-insensitive),
/// in their original order.
pub fn filter_vision_models<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| {
            let lower = name.to_lowercase();
            VISION_MODEL_HINTS.iter().any(|hint| lower.contains(hint))
        })
        .map(str::to_string)
        .collect()
}

/// Ask the server for its models and keep the vision-capable ones.
///
/// Never fails: an unreachable server or an empty result is reported through
/// `reporter` and yields an empty list.
pub async fn discover_vision_models<C, R>(client: &C, reporter: &R) -> Vec<String>
where
    C: InferenceClient,
    R: Reporter,
{
    let all = match client.list_models().await {
        Ok(all) => all,
        Err(e) => {
            reporter.emit(
                Category::Error,
                &format!("Failed to fetch models from Ollama: {e}"),
            );
            return Vec::new();
        }
    };

    let vision = filter_vision_models(&all);
    if vision.is_empty() {
        reporter.emit(
            Category::Warning,
            "No vision-capable models found. Please install a vision model like llava:latest",
        );
    }
    vision
}

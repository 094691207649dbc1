//! # ollama-describe
//!
//! Batch image description with local Ollama vision models.
//!
//! Point it at a file or a directory, pick a vision-capable model and a
//! prompt, and every image is shrunk, re-encoded, sent to `/api/generate`
//! and written to a timestamped plain-text report.
//!
//! ## Features
//!
//! - **Allow-listed discovery** of png, jpg, jpeg, gif, bmp, webp, tiff, tif,
//!   heic and heif files (immediate children only)
//! - **Bounded payloads**: images are fit inside 800×800, flattened to RGB
//!   and sent as base64 JPEG
//! - **Failure isolation**: a broken image, a non-vision model (HTTP 400) or
//!   an unreachable server becomes an error block in the report, never an
//!   aborted batch
//! - **Injected reporting** through [`Reporter`], so progress can go to
//!   `tracing`, memory, or anywhere else
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ollama_describe::{BatchProcessor, OllamaClient, TracingReporter};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OllamaClient::new("http://localhost:11434");
//!     let processor = BatchProcessor::new(client, TracingReporter, "outputs");
//!
//!     if let Some(outcome) = processor
//!         .process(Path::new("data"), "Describe this image", "llava:latest")
//!         .await?
//!     {
//!         println!(
//!             "{} of {} described, report at {}",
//!             outcome.succeeded,
//!             outcome.total,
//!             outcome.report_path.display()
//!         );
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod encoder;
pub mod error;
pub mod events;
pub mod interactive;
pub mod models;
pub mod processor;
pub mod report;
pub mod scan;
pub mod types;

// Re-export main types at crate root
pub use client::{InferenceClient, OllamaClient};
pub use encoder::{encode_image, fit_within, MAX_DIMENSION};
pub use error::{DescribeError, EncodingError, InferenceError, Result};
pub use events::{Category, MemoryReporter, Reporter, TracingReporter};
pub use interactive::{plan_defaults, plan_interactive, PlanOverrides, Prompter, RunPlan};
pub use models::{discover_vision_models, filter_vision_models, VISION_MODEL_HINTS};
pub use processor::BatchProcessor;
pub use report::{report_file_name, ReportWriter};
pub use scan::{is_supported_image, list_images, resolve_images, SUPPORTED_EXTENSIONS};
pub use types::{
    BatchOutcome, DescribeConfig, DescribeConfigBuilder, GenerateRequest, GenerateResponse,
    DEFAULT_MODEL, DEFAULT_PROMPT, NO_RESPONSE_TEXT, VISION_UNSUPPORTED_MESSAGE,
};

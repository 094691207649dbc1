use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use crate::client::InferenceClient;
use crate::encoder::encode_image;
use crate::error::{DescribeError, InferenceError, Result};
use crate::events::{Category, Reporter};
use crate::report::ReportWriter;
use crate::scan::{display_name, resolve_images};
use crate::types::{BatchOutcome, GenerateRequest, VISION_UNSUPPORTED_MESSAGE};

/// Result of describing a single image.
#[derive(Debug)]
enum ItemOutcome {
    Described(String),
    Failed(String),
}

/// Runs one batch: resolve images, describe each in turn, write the report.
///
/// Images are handled strictly one at a time. A failing image becomes an
/// error block in the report; only an invalid input path or a filesystem
/// failure on the report side aborts the batch.
pub struct BatchProcessor<C, R> {
    client: C,
    reporter: R,
    outputs_dir: PathBuf,
}

impl<C, R> BatchProcessor<C, R>
where
    C: InferenceClient,
    R: Reporter,
{
    pub fn new(client: C, reporter: R, outputs_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            reporter,
            outputs_dir: outputs_dir.into(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn outputs_dir(&self) -> &Path {
        &self.outputs_dir
    }

    /// Describe every image at `path` with `model` and `prompt`.
    ///
    /// Returns `Ok(None)` when `path` holds no images (no report is written),
    /// otherwise the location and tallies of the finished report.
    ///
    /// # Errors
    ///
    /// - [`DescribeError::InvalidPath`] if `path` is neither file nor directory
    /// - [`DescribeError::Io`] if the output directory or report cannot be
    ///   created or written
    pub async fn process(
        &self,
        path: &Path,
        prompt: &str,
        model: &str,
    ) -> Result<Option<BatchOutcome>> {
        let started_at = Local::now();

        let images = resolve_images(path)?;

        let total = images.len();
        self.reporter.emit(
            Category::Start,
            &format!("Found {total} images to process."),
        );
        if total == 0 {
            self.reporter
                .emit(Category::Warning, "No valid images found. Exiting.");
            return Ok(None);
        }

        self.ensure_outputs_dir()?;
        let mut report = ReportWriter::create(&self.outputs_dir, &started_at)?;
        report.write_header(&started_at, model, prompt)?;

        let mut succeeded = 0;
        for (i, image) in images.iter().enumerate() {
            let index = i + 1;
            let name = display_name(image);
            self.reporter.emit(
                Category::Progress,
                &format!("Processing image {index}/{total}: {name}"),
            );

            let text = match self.describe(image, &name, prompt, model).await {
                ItemOutcome::Described(description) => {
                    succeeded += 1;
                    self.reporter
                        .emit(Category::Success, &format!("Description for {name}:"));
                    self.reporter.emit(Category::Description, &description);
                    description
                }
                ItemOutcome::Failed(message) => message,
            };

            report.write_result(index, &name, &text)?;
        }

        let report_path = report.finish()?;
        self.reporter.emit(
            Category::Completion,
            &format!("Results saved to {}", report_path.display()),
        );

        Ok(Some(BatchOutcome {
            report_path,
            total,
            succeeded,
            failed: total - succeeded,
        }))
    }

    async fn describe(&self, path: &Path, name: &str, prompt: &str, model: &str) -> ItemOutcome {
        let image_b64 = match encode_image(path) {
            Ok(b64) => b64,
            Err(e) => return self.failed(path, name, &e),
        };

        let request = GenerateRequest::new(model, prompt, image_b64);
        match self.client.generate(&request).await {
            Ok(description) => ItemOutcome::Described(description),
            Err(InferenceError::NotVisionCapable { .. }) => {
                self.reporter.emit(
                    Category::Error,
                    &format!(
                        "Model {model} doesn't support image analysis. Please use a vision-capable model."
                    ),
                );
                ItemOutcome::Failed(VISION_UNSUPPORTED_MESSAGE.to_string())
            }
            Err(e) => self.failed(path, name, &e),
        }
    }

    fn failed(&self, path: &Path, name: &str, err: &dyn std::error::Error) -> ItemOutcome {
        self.reporter.emit(
            Category::Error,
            &format!("Error processing {}: {err}", path.display()),
        );
        ItemOutcome::Failed(format!("Error processing {name}: {err}"))
    }

    fn ensure_outputs_dir(&self) -> Result<()> {
        if self.outputs_dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.outputs_dir).map_err(|e| {
            DescribeError::io(
                format!("Failed to create {}", self.outputs_dir.display()),
                e,
            )
        })?;
        self.reporter.emit(
            Category::Warning,
            &format!("Created directory: {}", self.outputs_dir.display()),
        );
        Ok(())
    }
}

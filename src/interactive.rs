//! Terminal questions that turn a bare invocation into a [`RunPlan`].
//!
//! Anything already given on the command line ([`PlanOverrides`]) skips the
//! matching question. Without a terminal, [`plan_defaults`] picks everything.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::{DescribeError, Result};
use crate::events::{Category, Reporter};
use crate::scan::{display_name, list_images};
use crate::types::{DEFAULT_MODEL, DEFAULT_PROMPT};

/// Line-oriented question/answer helper over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and return the trimmed answer.
    ///
    /// End of input is reported as [`io::ErrorKind::UnexpectedEof`].
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "\n{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_string())
    }

    /// Yes/no question; only `y` (any case) counts as yes.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{question} (y/n): "))?;
        Ok(answer.eq_ignore_ascii_case("y"))
    }

    /// Show a numbered list and return the zero-based index picked.
    /// Keeps asking until a listed number is entered.
    pub fn choose(&mut self, title: &str, items: &[String], question: &str) -> io::Result<usize> {
        writeln!(self.output, "\n{title}")?;
        for (idx, item) in items.iter().enumerate() {
            writeln!(self.output, "{}. {}", idx + 1, item)?;
        }

        loop {
            let answer = self.ask(question)?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=items.len()).contains(&n) => return Ok(n - 1),
                Ok(_) => writeln!(self.output, "Invalid selection. Please try again.")?,
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }
}

/// Choices taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct PlanOverrides {
    /// Describe just this file.
    pub image: Option<PathBuf>,
    /// Describe everything in the data directory without asking.
    pub all: bool,
    pub model: Option<String>,
    pub prompt: Option<String>,
}

/// What a run will do: one path, one model, one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub target: PathBuf,
    pub model: String,
    pub prompt: String,
}

/// Plan used when nobody is at the keyboard: every image in `data_dir`
/// (unless an image was named), the first vision model found (or
/// [`DEFAULT_MODEL`]), and [`DEFAULT_PROMPT`].
pub fn plan_defaults(data_dir: &Path, overrides: &PlanOverrides, models: &[String]) -> RunPlan {
    RunPlan {
        target: overrides
            .image
            .clone()
            .unwrap_or_else(|| data_dir.to_path_buf()),
        model: overrides
            .model
            .clone()
            .or_else(|| models.first().cloned())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        prompt: overrides
            .prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
    }
}

/// Ask whatever `overrides` leaves open.
///
/// Returns `Ok(None)` when a single image was requested but `data_dir` has
/// none to pick from.
pub fn plan_interactive<In, Out, Rep>(
    prompter: &mut Prompter<In, Out>,
    data_dir: &Path,
    overrides: &PlanOverrides,
    models: &[String],
    reporter: &Rep,
) -> Result<Option<RunPlan>>
where
    In: BufRead,
    Out: Write,
    Rep: Reporter,
{
    let console = |e| DescribeError::io("Failed to read from terminal", e);

    let process_all = overrides.image.is_none()
        && (overrides.all
            || prompter
                .confirm("Do you want to analyze all images in the directory?")
                .map_err(console)?);

    let model = match &overrides.model {
        Some(model) => model.clone(),
        None if models.is_empty() => {
            reporter.emit(
                Category::Warning,
                &format!("Using default model '{DEFAULT_MODEL}'. Please ensure it's installed."),
            );
            DEFAULT_MODEL.to_string()
        }
        None => {
            let idx = prompter
                .choose(
                    "Available vision-capable models:",
                    models,
                    "Select model number: ",
                )
                .map_err(console)?;
            models[idx].clone()
        }
    };

    let prompt = match &overrides.prompt {
        Some(prompt) => prompt.clone(),
        None => {
            let custom = prompter
                .confirm("Do you want to use a custom prompt?")
                .map_err(console)?;
            let text = if custom {
                prompter
                    .ask("Enter your custom prompt: ")
                    .map_err(console)?
            } else {
                String::new()
            };
            if text.is_empty() {
                DEFAULT_PROMPT.to_string()
            } else {
                text
            }
        }
    };

    let target = if let Some(image) = &overrides.image {
        image.clone()
    } else if process_all {
        data_dir.to_path_buf()
    } else {
        let images = list_images(data_dir)?;
        if images.is_empty() {
            reporter.emit(Category::Error, "No images found in directory");
            return Ok(None);
        }
        let names: Vec<String> = images.iter().map(|p| display_name(p)).collect();
        let idx = prompter
            .choose("Available images:", &names, "Select image number: ")
            .map_err(console)?;
        images[idx].clone()
    };

    Ok(Some(RunPlan {
        target,
        model,
        prompt,
    }))
}

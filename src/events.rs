use std::sync::Mutex;

/// Kind of message emitted while a batch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Start,
    Progress,
    Success,
    Warning,
    Error,
    Completion,
    /// A model-generated description, echoed verbatim.
    Description,
}

impl Category {
    /// Console icon prefixed to messages of this category.
    pub fn icon(self) -> &'static str {
        match self {
            Category::Start => "🚀",
            Category::Progress => "🔄",
            Category::Success => "✅",
            Category::Warning => "⚠️",
            Category::Error => "❌",
            Category::Completion => "🎉",
            Category::Description => "",
        }
    }
}

/// Sink for user-facing progress messages.
///
/// The batch processor and model discovery only talk to the outside world
/// through this trait, so tests can record what would have been printed.
pub trait Reporter {
    fn emit(&self, category: Category, message: &str);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn emit(&self, category: Category, message: &str) {
        (**self).emit(category, message)
    }
}

/// Forwards messages to `tracing`, prefixed with the category icon.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn emit(&self, category: Category, message: &str) {
        let icon = category.icon();
        match category {
            Category::Error => tracing::error!("{icon} {message}"),
            Category::Warning => tracing::warn!("{icon} {message}"),
            Category::Description => tracing::info!("{message}"),
            _ => tracing::info!("{icon} {message}"),
        }
    }
}

/// Keeps every emitted message in memory, in order.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Mutex<Vec<(Category, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<(Category, String)> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Messages of a single category.
    pub fn messages(&self, category: Category) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn emit(&self, category: Category, message: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push((category, message.to_string()));
        }
    }
}

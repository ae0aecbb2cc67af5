use crate::model::Task;

/// Successful result of a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    /// Rendered task lines, e.g. `1.[T][ ] borrow book` for enumerations.
    pub entries: Vec<String>,
    pub task: Option<Task>,
    /// Total tasks after any mutating command.
    pub task_count: Option<usize>,
    /// Whether `render` prints the `Now you have N tasks` line.
    pub show_count: bool,
    /// Set when the change applied in memory but could not be saved.
    pub warning: Option<String>,
    pub exit: bool,
}

impl Outcome {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            entries: Vec::new(),
            task: None,
            task_count: None,
            show_count: false,
            warning: None,
            exit: false,
        }
    }

    pub(crate) fn exiting(mut self) -> Self {
        self.exit = true;
        self
    }

    pub(crate) fn with_entries(mut self, entries: Vec<String>) -> Self {
        self.entries = entries;
        self
    }

    pub(crate) fn with_task(mut self, task: Task) -> Self {
        self.entries = vec![task.status_text()];
        self.task = Some(task);
        self
    }

    pub(crate) fn with_count(mut self, count: usize) -> Self {
        self.task_count = Some(count);
        self
    }

    pub(crate) fn announcing_count(mut self) -> Self {
        self.show_count = true;
        self
    }

    pub(crate) fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.entries.len() + 3);
        lines.push(self.message.clone());
        lines.extend(self.entries.iter().cloned());
        if let Some(count) = self.task_count.filter(|_| self.show_count) {
            lines.push(format!("Now you have {count} tasks in the list."));
        }
        if let Some(warning) = self.warning.as_deref() {
            lines.push(format!("WARNING: {warning}"));
        }
        lines.join("\n")
    }
}

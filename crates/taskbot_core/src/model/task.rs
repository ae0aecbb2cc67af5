use crate::model::Timing;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline,
    Event,
}

impl TaskKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Todo => "T",
            Self::Deadline => "D",
            Self::Event => "E",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "T" => Some(Self::Todo),
            "D" => Some(Self::Deadline),
            "E" => Some(Self::Event),
            _ => None,
        }
    }
}

/// Kind-specific payload. Only deadlines and events carry a timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskDetail {
    Todo,
    Deadline { by: Timing },
    Event { at: Timing },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    detail: TaskDetail,
    done: bool,
}

impl Task {
    pub fn new(description: impl Into<String>, detail: TaskDetail) -> Self {
        Self {
            description: description.into(),
            detail,
            done: false,
        }
    }

    pub fn todo(description: impl Into<String>) -> Self {
        Self::new(description, TaskDetail::Todo)
    }

    pub fn deadline(description: impl Into<String>, by: Timing) -> Self {
        Self::new(description, TaskDetail::Deadline { by })
    }

    pub fn event(description: impl Into<String>, at: Timing) -> Self {
        Self::new(description, TaskDetail::Event { at })
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    pub fn kind(&self) -> TaskKind {
        match self.detail {
            TaskDetail::Todo => TaskKind::Todo,
            TaskDetail::Deadline { .. } => TaskKind::Deadline,
            TaskDetail::Event { .. } => TaskKind::Event,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn detail(&self) -> &TaskDetail {
        &self.detail
    }

    pub fn timing(&self) -> Option<&Timing> {
        match &self.detail {
            TaskDetail::Todo => None,
            TaskDetail::Deadline { by } => Some(by),
            TaskDetail::Event { at } => Some(at),
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    fn status_icon(&self) -> &'static str {
        if self.done { "X" } else { " " }
    }

    /// One-line rendering such as `[D][ ] read book (at: 2/12/2019 1800)`.
    ///
    /// Deadlines render with `at:` as well, which older transcripts rely on.
    pub fn status_text(&self) -> String {
        match self.timing() {
            Some(timing) => format!(
                "[{}][{}] {} (at: {})",
                self.kind().tag(),
                self.status_icon(),
                self.description,
                timing
            ),
            None => format!(
                "[{}][{}] {}",
                self.kind().tag(),
                self.status_icon(),
                self.description
            ),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_text())
    }
}

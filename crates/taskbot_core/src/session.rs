use crate::command::parse;
use crate::dispatch::{TaskSink, dispatch};
use crate::error::AppError;
use crate::model::TaskList;
use crate::storage::{LineStore, SkippedLine};
use std::borrow::Cow;
use std::collections::HashMap;

/// Text block handed to whatever displays it, plus how it went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub success: bool,
    pub exit: bool,
}

impl Response {
    fn failure(message: impl std::fmt::Display) -> Self {
        Self {
            text: format!("OOPS!!! {message}"),
            success: false,
            exit: false,
        }
    }
}

/// Owns the task list for the life of the process and routes each input
/// line through alias expansion, parsing, and dispatch.
pub struct Session {
    tasks: TaskList,
    sink: Box<dyn TaskSink>,
    aliases: HashMap<String, String>,
    skipped: Vec<SkippedLine>,
}

impl Session {
    pub fn new(tasks: TaskList, sink: Box<dyn TaskSink>) -> Self {
        Self {
            tasks,
            sink,
            aliases: HashMap::new(),
            skipped: Vec::new(),
        }
    }

    /// Loads `store` once; undecodable lines are kept aside for
    /// [`Session::load_warning`].
    pub fn open(store: LineStore) -> Result<Self, AppError> {
        let report = store.load()?;
        let mut session = Self::new(report.tasks, Box::new(store));
        session.skipped = report.skipped;
        Ok(session)
    }

    pub fn with_aliases(mut self, aliases: HashMap<String, String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    pub fn load_warning(&self) -> Option<String> {
        if self.skipped.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .skipped
            .iter()
            .map(|skipped| skipped.line_number.to_string())
            .collect();
        Some(format!(
            "skipped {} malformed line(s) while loading tasks (line {})",
            self.skipped.len(),
            lines.join(", ")
        ))
    }

    fn expand_alias<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let trimmed = line.trim_start();
        let (first, rest) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));
        match self.aliases.get(first) {
            Some(expansion) => Cow::Owned(format!("{expansion} {rest}")),
            None => Cow::Borrowed(line),
        }
    }

    pub fn handle_line(&mut self, line: &str) -> Response {
        let expanded = self.expand_alias(line);
        let command = match parse(&expanded) {
            Ok(command) => command,
            Err(err) => {
                tracing::debug!(error = %err, "rejected input line");
                return Response::failure(err);
            }
        };
        tracing::debug!(?command, mutating = command.is_mutating(), "parsed command");

        match dispatch(command, &mut self.tasks, self.sink.as_ref()) {
            Ok(outcome) => Response {
                text: outcome.render(),
                success: true,
                exit: outcome.exit,
            },
            Err(err) => {
                tracing::debug!(error = %err, "command rejected");
                Response::failure(err)
            }
        }
    }
}

mod parser;

pub use parser::{Verb, parse};

use crate::model::Timing;

/// A validated instruction. Each variant carries only the fields its verb
/// accepts; construction happens in [`parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    ListAll,
    Find { phrase: String },
    MarkDone { index: i64 },
    Delete { index: i64 },
    AddTodo { description: String },
    AddDeadline { description: String, by: Timing },
    AddEvent { description: String, at: Timing },
}

impl Command {
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::MarkDone { .. }
                | Self::Delete { .. }
                | Self::AddTodo { .. }
                | Self::AddDeadline { .. }
                | Self::AddEvent { .. }
        )
    }
}

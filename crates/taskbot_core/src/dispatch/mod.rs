mod outcome;

pub use outcome::Outcome;

use crate::command::Command;
use crate::error::{AppError, DispatchError};
use crate::model::{Task, TaskList};

pub const FAREWELL: &str = "Bye. Hope to see you again soon!";
const LIST_HEADER: &str = "Here are the tasks in your list:";
const FIND_HEADER: &str = "Here are the matching tasks in your list:";
const DONE_HEADER: &str = "Nice! I've marked this task as done:";
const DELETE_HEADER: &str = "Noted. I've removed this task:";
const ADD_HEADER: &str = "Got it. I've added this task:";

/// Where the list goes after every successful mutation.
pub trait TaskSink {
    fn save(&self, tasks: &TaskList) -> Result<(), AppError>;
}

pub struct NoopSink;

impl TaskSink for NoopSink {
    fn save(&self, _tasks: &TaskList) -> Result<(), AppError> {
        Ok(())
    }
}

/// Applies `command` to `tasks`, saving through `sink` after any mutation.
///
/// Errors leave the list untouched. A failed save does not undo the
/// in-memory change; it is reported as [`Outcome::warning`] instead.
pub fn dispatch(
    command: Command,
    tasks: &mut TaskList,
    sink: &dyn TaskSink,
) -> Result<Outcome, DispatchError> {
    match command {
        Command::Exit => Ok(Outcome::new(FAREWELL).exiting()),
        Command::ListAll => {
            let entries = enumerate(tasks.iter().enumerate().map(|(slot, task)| (slot + 1, task)));
            Ok(Outcome::new(LIST_HEADER).with_entries(entries))
        }
        Command::Find { phrase } => {
            let entries = enumerate(tasks.find(&phrase).into_iter());
            Ok(Outcome::new(FIND_HEADER).with_entries(entries))
        }
        Command::MarkDone { index } => {
            let task = tasks.mark_done(index)?.clone();
            let outcome = Outcome::new(DONE_HEADER)
                .with_task(task)
                .with_count(tasks.len());
            Ok(persist(outcome, tasks, sink))
        }
        Command::Delete { index } => {
            let removed = tasks.remove(index)?;
            let outcome = Outcome::new(DELETE_HEADER)
                .with_task(removed)
                .with_count(tasks.len())
                .announcing_count();
            Ok(persist(outcome, tasks, sink))
        }
        Command::AddTodo { description } => Ok(add(Task::todo(description), tasks, sink)),
        Command::AddDeadline { description, by } => {
            Ok(add(Task::deadline(description, by), tasks, sink))
        }
        Command::AddEvent { description, at } => {
            Ok(add(Task::event(description, at), tasks, sink))
        }
    }
}

fn add(task: Task, tasks: &mut TaskList, sink: &dyn TaskSink) -> Outcome {
    tasks.push(task.clone());
    let outcome = Outcome::new(ADD_HEADER)
        .with_task(task)
        .with_count(tasks.len())
        .announcing_count();
    persist(outcome, tasks, sink)
}

fn persist(outcome: Outcome, tasks: &TaskList, sink: &dyn TaskSink) -> Outcome {
    match sink.save(tasks) {
        Ok(()) => outcome,
        Err(err) => {
            tracing::warn!(error = %err, "failed to save tasks; keeping in-memory change");
            outcome.with_warning(format!("your change was not saved ({err})"))
        }
    }
}

fn enumerate<'a>(tasks: impl Iterator<Item = (usize, &'a Task)>) -> Vec<String> {
    tasks
        .map(|(position, task)| format!("{position}.{}", task.status_text()))
        .collect()
}

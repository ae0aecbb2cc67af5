use crate::error::DispatchError;
use crate::model::Task;

/// Ordered tasks addressed by 1-based position. Removing a task shifts every
/// later position down by one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    /// Maps a 1-based index onto a slot, rejecting anything outside `[1, len]`.
    pub fn resolve(&self, index: i64) -> Result<usize, DispatchError> {
        let out_of_range = DispatchError::IndexOutOfRange {
            index,
            len: self.tasks.len(),
        };
        if index < 1 {
            return Err(out_of_range);
        }
        let slot = usize::try_from(index - 1).map_err(|_| out_of_range.clone())?;
        if slot >= self.tasks.len() {
            return Err(out_of_range);
        }
        Ok(slot)
    }

    pub fn get(&self, index: i64) -> Result<&Task, DispatchError> {
        let slot = self.resolve(index)?;
        Ok(&self.tasks[slot])
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn remove(&mut self, index: i64) -> Result<Task, DispatchError> {
        let slot = self.resolve(index)?;
        Ok(self.tasks.remove(slot))
    }

    pub fn mark_done(&mut self, index: i64) -> Result<&Task, DispatchError> {
        let slot = self.resolve(index)?;
        let task = &mut self.tasks[slot];
        if task.is_done() {
            return Err(DispatchError::AlreadyDone { index });
        }
        task.mark_done();
        Ok(task)
    }

    /// Case-sensitive substring search; positions are 1-based list positions.
    pub fn find(&self, phrase: &str) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.description().contains(phrase))
            .map(|(slot, task)| (slot + 1, task))
            .collect()
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

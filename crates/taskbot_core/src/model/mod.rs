mod list;
mod task;
mod timing;

pub use list::TaskList;
pub use task::{Task, TaskDetail, TaskKind};
pub use timing::Timing;

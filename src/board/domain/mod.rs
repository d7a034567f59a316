//! Domain model for lists and tasks.
//!
//! A list is owned either by one user or by a family, and every task lives
//! in exactly one list. Assignment rules are pure functions over the list
//! owner and the owning family's roster.

mod assignment;
mod color;
mod error;
mod ids;
mod list;
mod task;

pub use assignment::{AssignmentError, FamilyRoster, authorize_assignment};
pub use color::ListColor;
pub use error::BoardDomainError;
pub use ids::{ListId, ListName, TaskId, TaskNotes, TaskTitle};
pub use list::{ListOwner, ListSummary, PersistedListData, TaskList};
pub use task::{PersistedTaskData, Task, TaskEdit, TaskStatus};

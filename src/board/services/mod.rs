//! Service layer for lists and tasks.

mod access;
mod lists;
mod tasks;

pub use lists::{
    CreateListRequest, ListRegistryError, ListRegistryResult, ListRegistryService,
    UpdateListRequest,
};
pub use tasks::{
    CreateTaskRequest, TaskEngineError, TaskEngineResult, TaskEngineService, UpdateTaskRequest,
};

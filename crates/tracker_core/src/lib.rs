pub mod clock;
pub mod config;
pub mod deadline;
pub mod error;
pub mod model;
pub mod storage;
pub mod task_api;

pub use task_api::{Listing, TaskStore};

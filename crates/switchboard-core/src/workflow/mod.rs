//! Workflow engine and per-run state

mod engine;
mod state;

pub use engine::{route, NodeId, WorkflowEngine, NO_CITY_MESSAGE, WEATHER_ERROR_PREFIX};
pub use state::{Intent, WorkflowState};

//! PlanStore - in-memory step plan tracking for agent loops
//!
//! A session's agent keeps one live plan: an ordered list of steps with
//! stable 1-based indices and pending/complete status. The plan is exposed
//! to the model as three tools (`plan_create`, `plan_mark_step_complete`,
//! `plan_show_progress`) that always answer in plain text, and the
//! transcript the loop accumulates can be rewritten with
//! [`compact_history`] so only the freshest planning snapshot survives.
//!
//! # Example
//!
//! ```ignore
//! use planstore::{compact_history, new_step_store, planning_tools};
//! use toolbase::ToolExecutor;
//!
//! let store = new_step_store();
//! let mut executor = ToolExecutor::new();
//! executor.add_tools(planning_tools(store));
//!
//! // ... run the loop, accumulating `history: Vec<Message>` ...
//! let history = compact_history(&history);
//! ```

mod compact;
mod error;
mod step;
mod store;
mod tools;

pub use compact::{PLAN_TOOL_NAMES, compact_history, is_plan_tool};
pub use error::PlanError;
pub use step::{Step, StepStatus};
pub use store::{Plan, StepStore};
pub use tools::{
    PLAN_CREATE, PLAN_MARK_STEP_COMPLETE, PLAN_SHOW_PROGRESS, PLANNING_INSTRUCTIONS, PlanCreateTool,
    PlanMarkStepCompleteTool, PlanShowProgressTool, SharedStepStore, new_step_store, planning_tools,
};

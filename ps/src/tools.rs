//! Plan tools - the LLM-facing surface over StepStore
//!
//! Three tools share one store per session. Every outcome, including
//! validation failures, is returned as descriptive text in a `ToolResult`;
//! nothing here ever aborts the turn.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use toolbase::{Tool, ToolResult};

use crate::error::PlanError;
use crate::store::StepStore;

/// Tool name for creating a plan
pub const PLAN_CREATE: &str = "plan_create";

/// Tool name for marking a step complete
pub const PLAN_MARK_STEP_COMPLETE: &str = "plan_mark_step_complete";

/// Tool name for showing plan progress
pub const PLAN_SHOW_PROGRESS: &str = "plan_show_progress";

/// System instructions embedded in the plan_create tool description
pub const PLANNING_INSTRUCTIONS: &str = "Planning System Instructions:
1. Before processing any request, you MUST call 'plan_create' to generate a step-by-step plan.
2. Execute the plan step by step.
3. After completing each step, you MUST call 'plan_mark_step_complete' to mark it as done.
4. You can check your progress using 'plan_show_progress'.
5. Follow the plan strictly.";

/// Shared plan state, one per session
pub type SharedStepStore = Arc<Mutex<StepStore>>;

/// Create a new shared step store
pub fn new_step_store() -> SharedStepStore {
    Arc::new(Mutex::new(StepStore::new()))
}

/// The three plan tools wired to one shared store, ready for registration
pub fn planning_tools(store: SharedStepStore) -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(PlanCreateTool::with_store(store.clone())),
        Box::new(PlanMarkStepCompleteTool::with_store(store.clone())),
        Box::new(PlanShowProgressTool::with_store(store)),
    ]
}

fn render_plan(store: &StepStore) -> String {
    match store.plan() {
        Some(plan) => plan.to_string(),
        None => "No plan created yet. Use plan_create to initialize one.".to_string(),
    }
}

/// Create a new plan, replacing any existing one
pub struct PlanCreateTool {
    store: SharedStepStore,
}

impl PlanCreateTool {
    /// Create the tool over a shared store
    pub fn with_store(store: SharedStepStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for PlanCreateTool {
    fn name(&self) -> &'static str {
        PLAN_CREATE
    }

    fn description(&self) -> String {
        format!(
            "Create a new plan with the given steps. Replaces any existing plan.\n\n{}",
            PLANNING_INSTRUCTIONS
        )
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "steps": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Ordered step descriptions, one per step"
                }
            },
            "required": ["steps"]
        })
    }

    async fn execute(&self, input: Value) -> ToolResult {
        let steps = match input["steps"].as_array() {
            Some(s) => s,
            None => return ToolResult::error("steps is required and must be an array of strings"),
        };

        let mut descriptions = Vec::with_capacity(steps.len());
        for value in steps {
            match value.as_str() {
                Some(s) => descriptions.push(s.to_string()),
                None => return ToolResult::error("steps must contain only strings"),
            }
        }

        let mut store = self.store.lock().await;
        match store.create(&descriptions) {
            Ok(plan) => ToolResult::success(plan.to_string()),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

/// Mark a plan step complete by its 1-based index
pub struct PlanMarkStepCompleteTool {
    store: SharedStepStore,
}

impl PlanMarkStepCompleteTool {
    /// Create the tool over a shared store
    pub fn with_store(store: SharedStepStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for PlanMarkStepCompleteTool {
    fn name(&self) -> &'static str {
        PLAN_MARK_STEP_COMPLETE
    }

    fn description(&self) -> String {
        "Mark a plan step as complete by its 1-based step number.".to_string()
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "step": {
                    "type": "integer",
                    "description": "1-based number of the step to mark complete"
                }
            },
            "required": ["step"]
        })
    }

    async fn execute(&self, input: Value) -> ToolResult {
        let index = match input["step"].as_u64() {
            Some(n) => n as usize,
            None => return ToolResult::error("step is required and must be a positive integer"),
        };

        let mut store = self.store.lock().await;
        match store.mark_complete(index) {
            Ok(step) => ToolResult::success(format!("Marked step {} complete.\n{}", step.index, render_plan(&store))),
            // Repeated completion calls are expected from a model; report,
            // don't fail the turn.
            Err(PlanError::AlreadyComplete { index }) => {
                ToolResult::success(format!("Step {} is already complete.", index))
            }
            Err(PlanError::NoPlan) => ToolResult::error("No plan created yet. Use plan_create to initialize one."),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

/// Show the current plan with per-step status and a completion count
pub struct PlanShowProgressTool {
    store: SharedStepStore,
}

impl PlanShowProgressTool {
    /// Create the tool over a shared store
    pub fn with_store(store: SharedStepStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for PlanShowProgressTool {
    fn name(&self) -> &'static str {
        PLAN_SHOW_PROGRESS
    }

    fn description(&self) -> String {
        "Show the current progress of the plan.".to_string()
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _input: Value) -> ToolResult {
        let store = self.store.lock().await;
        ToolResult::success(render_plan(&store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tools() -> (SharedStepStore, PlanCreateTool, PlanMarkStepCompleteTool, PlanShowProgressTool) {
        let store = new_step_store();
        (
            store.clone(),
            PlanCreateTool::with_store(store.clone()),
            PlanMarkStepCompleteTool::with_store(store.clone()),
            PlanShowProgressTool::with_store(store.clone()),
        )
    }

    #[tokio::test]
    async fn test_plan_create_lists_pending_steps() {
        let (_store, create, _mark, _show) = tools();

        let result = create
            .execute(serde_json::json!({"steps": ["Step 1", "Step 2"]}))
            .await;

        assert!(!result.is_error);
        assert!(result.content.contains("Current Plan (0/2 complete):"));
        assert!(result.content.contains("[ ] 1. Step 1"));
        assert!(result.content.contains("[ ] 2. Step 2"));
    }

    #[tokio::test]
    async fn test_plan_create_rejects_empty_list() {
        let (_store, create, _mark, _show) = tools();

        let result = create.execute(serde_json::json!({"steps": []})).await;
        assert!(result.is_error);
        assert!(result.content.contains("at least one step"));
    }

    #[tokio::test]
    async fn test_plan_create_rejects_blank_description() {
        let (_store, create, _mark, _show) = tools();

        let result = create.execute(serde_json::json!({"steps": ["ok", "  "]})).await;
        assert!(result.is_error);
        assert!(result.content.contains("Step 2"));
    }

    #[tokio::test]
    async fn test_plan_create_requires_steps_argument() {
        let (_store, create, _mark, _show) = tools();

        let result = create.execute(serde_json::json!({})).await;
        assert!(result.is_error);
        assert!(result.content.contains("steps is required"));

        let result = create.execute(serde_json::json!({"steps": ["ok", 7]})).await;
        assert!(result.is_error);
        assert!(result.content.contains("only strings"));
    }

    #[tokio::test]
    async fn test_plan_create_replaces_previous_plan() {
        let (_store, create, _mark, show) = tools();

        create.execute(serde_json::json!({"steps": ["Old 1", "Old 2"]})).await;
        create.execute(serde_json::json!({"steps": ["New 1"]})).await;

        let result = show.execute(serde_json::json!({})).await;
        assert!(result.content.contains("New 1"));
        assert!(!result.content.contains("Old 1"));
        assert!(result.content.contains("(0/1 complete)"));
    }

    #[tokio::test]
    async fn test_mark_step_complete_updates_progress() {
        let (_store, create, mark, show) = tools();

        create.execute(serde_json::json!({"steps": ["Do X", "Do Y"]})).await;
        let result = mark.execute(serde_json::json!({"step": 1})).await;

        assert!(!result.is_error);
        assert!(result.content.contains("Marked step 1 complete."));
        assert!(result.content.contains("[x] 1. Do X"));
        assert!(result.content.contains("[ ] 2. Do Y"));

        let result = show.execute(serde_json::json!({})).await;
        assert!(result.content.contains("(1/2 complete)"));
    }

    #[tokio::test]
    async fn test_mark_step_complete_is_idempotent_signal() {
        let (_store, create, mark, _show) = tools();

        create.execute(serde_json::json!({"steps": ["Only"]})).await;
        mark.execute(serde_json::json!({"step": 1})).await;

        let result = mark.execute(serde_json::json!({"step": 1})).await;
        // Informational, not an error - the turn must not abort
        assert!(!result.is_error);
        assert!(result.content.contains("Step 1 is already complete."));
    }

    #[tokio::test]
    async fn test_mark_step_complete_out_of_range() {
        let (_store, create, mark, show) = tools();

        create.execute(serde_json::json!({"steps": ["A", "B", "C"]})).await;
        let result = mark.execute(serde_json::json!({"step": 99})).await;

        assert!(result.is_error);
        assert!(result.content.contains("Step 99 not found"));
        assert!(result.content.contains("1 to 3"));

        let result = show.execute(serde_json::json!({})).await;
        assert!(result.content.contains("(0/3 complete)"));
    }

    #[tokio::test]
    async fn test_mark_step_complete_without_plan() {
        let (_store, _create, mark, _show) = tools();

        let result = mark.execute(serde_json::json!({"step": 1})).await;
        assert!(result.is_error);
        assert!(result.content.contains("plan_create"));
    }

    #[tokio::test]
    async fn test_mark_step_complete_requires_integer() {
        let (_store, create, mark, _show) = tools();

        create.execute(serde_json::json!({"steps": ["A"]})).await;
        let result = mark.execute(serde_json::json!({"step": "one"})).await;
        assert!(result.is_error);
        assert!(result.content.contains("positive integer"));
    }

    #[tokio::test]
    async fn test_show_progress_before_create_instructs() {
        let (_store, _create, _mark, show) = tools();

        let result = show.execute(serde_json::json!({})).await;
        assert!(!result.is_error);
        assert!(result.content.contains("No plan created yet"));
        assert!(result.content.contains("plan_create"));
    }

    #[tokio::test]
    async fn test_planning_tools_share_one_store() {
        let store = new_step_store();
        let tools = planning_tools(store);
        assert_eq!(tools.len(), 3);

        let create = tools.iter().find(|t| t.name() == PLAN_CREATE).unwrap();
        let show = tools.iter().find(|t| t.name() == PLAN_SHOW_PROGRESS).unwrap();

        create.execute(serde_json::json!({"steps": ["Shared"]})).await;
        let result = show.execute(serde_json::json!({})).await;
        assert!(result.content.contains("Shared"));
    }

    #[test]
    fn test_plan_create_description_embeds_instructions() {
        let store = new_step_store();
        let create = PlanCreateTool::with_store(store);

        let description = create.description();
        assert!(description.contains("Planning System Instructions"));
        assert!(description.contains("you MUST call 'plan_create'"));
    }
}

//! StepStore - the single live plan and its invariant-preserving mutators

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlanError;
use crate::step::{Step, StepStatus};

/// The single live ordered-step plan
///
/// The revision starts at 1 on creation and bumps on every successful
/// structural mutation. Within one transcript the owning [`StepStore`] is
/// the sole writer, so revisions increase in transcript order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<Step>,
    pub revision: u64,
    pub created_at: i64,
}

impl Plan {
    /// Number of steps in the plan
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan has no steps (never true for a created plan)
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of completed steps
    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_complete()).count()
    }

    /// Whether every step is complete
    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(|s| s.is_complete())
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut lines = vec![format!(
            "Current Plan ({}/{} complete):",
            self.completed_count(),
            self.len()
        )];
        for step in &self.steps {
            lines.push(step.to_string());
        }
        write!(f, "{}", lines.join("\n"))
    }
}

/// Holds at most one live [`Plan`] and guards every mutation
///
/// One store per session; sessions must not share a store. Creating a new
/// plan replaces the previous one entirely.
#[derive(Debug, Default)]
pub struct StepStore {
    plan: Option<Plan>,
}

impl StepStore {
    /// Create an empty store (no plan yet)
    pub fn new() -> Self {
        Self { plan: None }
    }

    /// Create a new plan from the given step descriptions
    ///
    /// Replaces any existing plan and resets the revision to 1. Fails if the
    /// sequence is empty or any description is empty/whitespace-only.
    pub fn create(&mut self, descriptions: &[String]) -> Result<&Plan, PlanError> {
        debug!(step_count = descriptions.len(), "StepStore::create: called");
        if descriptions.is_empty() {
            return Err(PlanError::EmptyPlan);
        }

        for (i, description) in descriptions.iter().enumerate() {
            if description.trim().is_empty() {
                return Err(PlanError::EmptyStep { index: i + 1 });
            }
        }

        let steps = descriptions
            .iter()
            .enumerate()
            .map(|(i, d)| Step::pending(i + 1, d.clone()))
            .collect();

        let plan = self.plan.insert(Plan {
            steps,
            revision: 1,
            created_at: Utc::now().timestamp_millis(),
        });

        debug!("StepStore::create: plan replaced");
        Ok(plan)
    }

    /// Mark the step with the given 1-based index complete
    ///
    /// Bumps the plan revision and returns a copy of the updated step.
    /// Marking an already-complete step returns `AlreadyComplete` and
    /// leaves the plan untouched.
    pub fn mark_complete(&mut self, index: usize) -> Result<Step, PlanError> {
        debug!(%index, "StepStore::mark_complete: called");
        let plan = self.plan.as_mut().ok_or(PlanError::NoPlan)?;

        let len = plan.steps.len();
        let step = plan
            .steps
            .iter_mut()
            .find(|s| s.index == index)
            .ok_or(PlanError::StepNotFound { index, len })?;

        if step.is_complete() {
            debug!(%index, "StepStore::mark_complete: already complete");
            return Err(PlanError::AlreadyComplete { index });
        }

        step.status = StepStatus::Complete;
        let updated = step.clone();
        plan.revision += 1;

        debug!(revision = plan.revision, "StepStore::mark_complete: revision bumped");
        Ok(updated)
    }

    /// Read-only copy of the current steps
    ///
    /// Returns owned clones; the store cannot be mutated through the result.
    pub fn snapshot(&self) -> Result<Vec<Step>, PlanError> {
        let plan = self.plan.as_ref().ok_or(PlanError::NoPlan)?;
        Ok(plan.steps.clone())
    }

    /// The live plan, if one has been created
    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptions(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_create_assigns_contiguous_indices() {
        let mut store = StepStore::new();
        let plan = store.create(&descriptions(&["First", "Second", "Third"])).unwrap();

        assert_eq!(plan.len(), 3);
        assert_eq!(plan.revision, 1);
        for (i, step) in plan.steps.iter().enumerate() {
            assert_eq!(step.index, i + 1);
            assert_eq!(step.status, StepStatus::Pending);
        }
    }

    #[test]
    fn test_create_rejects_empty_plan() {
        let mut store = StepStore::new();
        assert_eq!(store.create(&[]), Err(PlanError::EmptyPlan));
        assert!(store.plan().is_none());
    }

    #[test]
    fn test_create_rejects_blank_description() {
        let mut store = StepStore::new();
        let result = store.create(&descriptions(&["Fine", "   ", "Also fine"]));
        assert_eq!(result.unwrap_err(), PlanError::EmptyStep { index: 2 });
        assert!(store.plan().is_none());
    }

    #[test]
    fn test_create_replaces_existing_plan() {
        let mut store = StepStore::new();
        store.create(&descriptions(&["Old 1", "Old 2"])).unwrap();
        store.mark_complete(1).unwrap();

        store.create(&descriptions(&["New 1"])).unwrap();
        let plan = store.plan().unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.revision, 1);
        assert_eq!(plan.steps[0].description, "New 1");
        assert_eq!(plan.completed_count(), 0);
    }

    #[test]
    fn test_mark_complete_flips_status_and_bumps_revision() {
        let mut store = StepStore::new();
        store.create(&descriptions(&["A", "B"])).unwrap();

        let step = store.mark_complete(1).unwrap();
        assert_eq!(step.index, 1);
        assert!(step.is_complete());

        let plan = store.plan().unwrap();
        assert_eq!(plan.revision, 2);
        assert_eq!(plan.completed_count(), 1);
        assert!(!plan.steps[1].is_complete());
    }

    #[test]
    fn test_mark_complete_twice_is_signalled_not_applied() {
        let mut store = StepStore::new();
        store.create(&descriptions(&["A"])).unwrap();
        store.mark_complete(1).unwrap();

        let result = store.mark_complete(1);
        assert_eq!(result, Err(PlanError::AlreadyComplete { index: 1 }));
        // Revision unchanged: nothing was mutated
        assert_eq!(store.plan().unwrap().revision, 2);
    }

    #[test]
    fn test_mark_complete_out_of_range() {
        let mut store = StepStore::new();
        store.create(&descriptions(&["A", "B", "C"])).unwrap();

        assert_eq!(store.mark_complete(0), Err(PlanError::StepNotFound { index: 0, len: 3 }));
        assert_eq!(
            store.mark_complete(99),
            Err(PlanError::StepNotFound { index: 99, len: 3 })
        );
        assert_eq!(store.plan().unwrap().completed_count(), 0);
    }

    #[test]
    fn test_mark_complete_without_plan() {
        let mut store = StepStore::new();
        assert_eq!(store.mark_complete(1), Err(PlanError::NoPlan));
    }

    #[test]
    fn test_snapshot_is_detached_copy() {
        let mut store = StepStore::new();
        store.create(&descriptions(&["A", "B"])).unwrap();

        let mut snapshot = store.snapshot().unwrap();
        snapshot[0].status = StepStatus::Complete;
        snapshot[0].description = "mutated".to_string();

        // The store is unaffected by mutation of the snapshot
        assert_eq!(store.plan().unwrap().completed_count(), 0);
        assert_eq!(store.plan().unwrap().steps[0].description, "A");
    }

    #[test]
    fn test_snapshot_without_plan() {
        let store = StepStore::new();
        assert_eq!(store.snapshot(), Err(PlanError::NoPlan));
    }

    #[test]
    fn test_plan_display() {
        let mut store = StepStore::new();
        store.create(&descriptions(&["Do X", "Do Y"])).unwrap();
        store.mark_complete(1).unwrap();

        let rendered = store.plan().unwrap().to_string();
        assert!(rendered.starts_with("Current Plan (1/2 complete):"));
        assert!(rendered.contains("[x] 1. Do X"));
        assert!(rendered.contains("[ ] 2. Do Y"));
    }

    #[test]
    fn test_plan_is_complete() {
        let mut store = StepStore::new();
        store.create(&descriptions(&["A", "B"])).unwrap();
        assert!(!store.plan().unwrap().is_complete());

        store.mark_complete(1).unwrap();
        store.mark_complete(2).unwrap();
        assert!(store.plan().unwrap().is_complete());
        assert_eq!(store.plan().unwrap().revision, 3);
    }
}

//! Transcript compaction for plan tool turns
//!
//! A loop that plans and re-plans leaves a trail of plan tool calls in the
//! transcript, each snapshot superseding the last. Before every model
//! invocation the embedding runtime can run [`compact_history`] to drop the
//! stale ones: only the most recent call/result pair per plan operation
//! survives, and a newer `plan_create` invalidates every plan pair before
//! it. Everything else passes through untouched, in order.
//!
//! Removal is pair-atomic by `tool_use_id`: a call is never dropped without
//! its result and vice versa, so the transcript's call/result contract is
//! preserved. A call whose result never arrived (truncated transcript) is
//! left in place and never synthesized around.

use std::collections::HashSet;

use tracing::debug;

use toolbase::{ContentBlock, Message, MessageContent};

use crate::tools::{PLAN_CREATE, PLAN_MARK_STEP_COMPLETE, PLAN_SHOW_PROGRESS};

/// The tool names the compactor treats as plan turns
pub const PLAN_TOOL_NAMES: [&str; 3] = [PLAN_CREATE, PLAN_MARK_STEP_COMPLETE, PLAN_SHOW_PROGRESS];

/// Whether a tool name belongs to the plan surface
pub fn is_plan_tool(name: &str) -> bool {
    PLAN_TOOL_NAMES.contains(&name)
}

/// Rewrite a message history so at most one live planning snapshot remains
/// per plan operation kind
///
/// Pure function: the input is never mutated; the result is a new sequence.
/// Idempotent: compacting a compacted history changes nothing.
pub fn compact_history(history: &[Message]) -> Vec<Message> {
    // Walk once collecting plan calls in transcript order, plus the set of
    // tool_use_ids that have a result anywhere in the history.
    let mut plan_calls: Vec<(String, String)> = Vec::new();
    let mut result_ids: HashSet<&str> = HashSet::new();

    for message in history {
        if let MessageContent::Blocks(blocks) = &message.content {
            for block in blocks {
                match block {
                    ContentBlock::ToolUse { id, name, .. } if is_plan_tool(name) => {
                        plan_calls.push((id.clone(), name.clone()));
                    }
                    ContentBlock::ToolResult { tool_use_id, .. } => {
                        result_ids.insert(tool_use_id.as_str());
                    }
                    _ => {}
                }
            }
        }
    }

    // Only complete call/result pairs participate in supersession. An
    // orphaned call stays in place; an orphaned result has no call entry
    // here and is equally untouchable.
    let paired: Vec<(String, String)> = plan_calls
        .into_iter()
        .filter(|(id, _)| result_ids.contains(id.as_str()))
        .collect();

    // Transcript order is revision order: the last pair of each kind is the
    // freshest, and any pair before the last plan_create belongs to a plan
    // that no longer exists.
    let last_create = paired.iter().rposition(|(_, name)| name == PLAN_CREATE);

    let mut keep: HashSet<&str> = HashSet::new();
    let mut seen_kinds: HashSet<&str> = HashSet::new();
    for (pos, (id, name)) in paired.iter().enumerate().rev() {
        let discarded_plan = last_create.map(|c| pos < c).unwrap_or(false);
        if !seen_kinds.contains(name.as_str()) && !discarded_plan {
            keep.insert(id.as_str());
        }
        seen_kinds.insert(name.as_str());
    }

    let remove: HashSet<&str> = paired
        .iter()
        .map(|(id, _)| id.as_str())
        .filter(|id| !keep.contains(id))
        .collect();

    if remove.is_empty() {
        return history.to_vec();
    }

    debug!(removed_pairs = remove.len(), "compact_history: dropping superseded plan turns");

    let mut compacted = Vec::with_capacity(history.len());
    for message in history {
        match &message.content {
            MessageContent::Text(_) => compacted.push(message.clone()),
            MessageContent::Blocks(blocks) => {
                let kept: Vec<ContentBlock> = blocks
                    .iter()
                    .filter(|block| !is_removed(block, &remove))
                    .cloned()
                    .collect();

                if kept.len() == blocks.len() {
                    compacted.push(message.clone());
                } else if !kept.is_empty() {
                    // Partially filtered message: rebuild with the survivors
                    compacted.push(Message {
                        role: message.role,
                        content: MessageContent::Blocks(kept),
                    });
                }
                // A message emptied entirely is dropped
            }
        }
    }

    compacted
}

fn is_removed(block: &ContentBlock, remove: &HashSet<&str>) -> bool {
    match block {
        ContentBlock::ToolUse { id, .. } => remove.contains(id.as_str()),
        ContentBlock::ToolResult { tool_use_id, .. } => remove.contains(tool_use_id.as_str()),
        ContentBlock::Text { .. } => false,
    }
}

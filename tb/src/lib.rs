//! ToolBase - shared tool and transcript primitives for agent loops
//!
//! Every tool an agent loop can call implements the [`Tool`] trait and
//! produces a [`ToolResult`] - plain text plus an error flag, never a Rust
//! error. The loop registers tools with a [`ToolExecutor`] and dispatches
//! model-requested [`ToolCall`]s through it.
//!
//! The [`transcript`] module models the conversation itself: ordered
//! [`Message`]s whose content is either plain text or structured
//! [`ContentBlock`]s (text, tool use, tool result). History processors such
//! as planstore's compactor pattern-match on these tagged variants rather
//! than sniffing message text.

mod executor;
mod traits;

pub mod transcript;

pub use executor::ToolExecutor;
pub use traits::{Tool, ToolResult};
pub use transcript::{ContentBlock, Message, MessageContent, Role, ToolCall, ToolDefinition};

//! Conversation truncation for when the context window is exhausted
//!
//! The cut point is fixed by the conversation length alone, so a history is
//! only rewritten when the caller decides it must be. Truncating on every turn
//! would move the cut each time and invalidate any prompt-prefix cache.

use tracing::{debug, warn};

use crate::message::{Message, roles_alternate};

/// Trait for implementing custom truncation strategies
pub trait Truncator: Send + Sync {
    /// Return a shortened copy of `messages`, keeping the task message first
    fn truncate(&self, messages: &[Message]) -> Vec<Message>;
}

/// Drops roughly the older half of the messages after the task message
#[derive(Debug, Clone, Copy, Default)]
pub struct HalveHistory;

impl Truncator for HalveHistory {
    fn truncate(&self, messages: &[Message]) -> Vec<Message> {
        truncate_conversation(messages)
    }
}

/// Conversations this short are never cut
const MIN_TRUNCATABLE_LEN: usize = 5;

/// Number of messages removed right after the task message.
///
/// Always even, so the first kept message has the same role the removed one
/// had and tool calls stay next to their results. Below five messages nothing
/// is removed, even though `(4 / 4) * 2` would drop one pair at four.
pub fn removal_count(len: usize) -> usize {
    if len < MIN_TRUNCATABLE_LEN {
        return 0;
    }
    (len / 4) * 2
}

/// Keep the task message and drop the `removal_count` messages that follow it.
///
/// Histories of up to four messages are returned unchanged. Calling this again
/// on the result cuts further; it does not converge.
pub fn truncate_conversation(messages: &[Message]) -> Vec<Message> {
    let Some((task, rest)) = messages.split_first() else {
        return Vec::new();
    };

    if !roles_alternate(messages) {
        warn!("Truncating a conversation whose roles do not alternate");
    }

    let remove = removal_count(messages.len());
    let mut truncated = Vec::with_capacity(messages.len() - remove);
    truncated.push(task.clone());
    truncated.extend_from_slice(&rest[remove..]);

    debug!(
        "Truncated conversation from {} to {} messages",
        messages.len(),
        truncated.len()
    );
    truncated
}

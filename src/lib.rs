//! # codey-context
//!
//! Message and context formatting for LLM coding assistants.
//!
//! This crate provides:
//! - Response templates for tool lifecycle events (denial, errors, nudges)
//! - Multimodal tool results built from text and image data URLs
//! - Directory-aware file listings and display-ready unified diffs
//! - Conversation truncation that keeps the task message and role pairing
//!
//! Everything here is pure: no I/O, no shared state, no token counting.
//! Deciding when to truncate is left to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use codey_context::{Message, MessageContent, templates, truncate_conversation};
//!
//! # fn example() -> codey_context::Result<()> {
//! let images = vec!["data:image/png;base64,iVBORw0KGgo=".to_string()];
//! let content = templates::tool_result("Screenshot taken", Some(images.as_slice()))?;
//! assert!(matches!(content, MessageContent::Blocks(ref blocks) if blocks.len() == 2));
//!
//! let mut history = vec![Message::user("Fix the failing test")];
//! for turn in 0..5 {
//!     history.push(Message::assistant(format!("step {turn}")));
//!     history.push(Message::user(content.clone()));
//! }
//!
//! // Only when the context window is actually exceeded
//! let shortened = truncate_conversation(&history);
//! assert_eq!(shortened[0], history[0]);
//! assert!(shortened.len() < history.len());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod error;
pub mod files;
pub mod image;
pub mod message;
pub mod patch;
pub mod templates;
pub mod truncation;

pub use error::{ContextError, Result};
pub use files::{NaturalOrder, SegmentOrder, format_files_list};
pub use image::format_images_into_blocks;
pub use message::{ContentBlock, ImageSource, Message, MessageContent, MessageRole};
pub use patch::create_pretty_patch;
pub use truncation::{HalveHistory, Truncator, truncate_conversation};

/// Formatting configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Unchanged lines shown around each change in a patch
    pub diff_context_lines: usize,
    /// Label used when a patch is created without a filename
    pub default_patch_filename: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            diff_context_lines: 3,
            default_patch_filename: "file".to_string(),
        }
    }
}

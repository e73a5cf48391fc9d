//! Fixed-shape responses fed back to the model after tool lifecycle events
//!
//! Optional arguments (feedback, error text, images) render as empty content
//! when absent; the surrounding tags are always emitted.

use crate::error::Result;
use crate::image::format_images_into_blocks;
use crate::message::{ContentBlock, MessageContent};

/// Appended to protocol nudges so the model re-reads the tool-call format
pub const TOOL_USE_REMINDER: &str = "# Reminder: Instructions for Tool Use

Tool uses are formatted using XML-style tags. The tool name is enclosed in opening and closing tags, and each parameter is similarly enclosed within its own set of tags. Here's the structure:

<tool_name>
<parameter1_name>value1</parameter1_name>
<parameter2_name>value2</parameter2_name>
...
</tool_name>

For example:

<attempt_completion>
<result>
I have completed the task...
</result>
</attempt_completion>

Always adhere to this format for all tool uses to ensure proper parsing and execution. Use exactly one tool per message.";

pub fn tool_denied() -> String {
    "The user denied this operation.".to_string()
}

pub fn tool_denied_with_feedback(feedback: Option<&str>) -> String {
    format!(
        "The user denied this operation and provided the following feedback:\n<feedback>\n{}\n</feedback>",
        feedback.unwrap_or_default()
    )
}

pub fn tool_error(error: Option<&str>) -> String {
    format!(
        "The tool execution failed with the following error:\n<error>\n{}\n</error>",
        error.unwrap_or_default()
    )
}

/// Nudge sent when the model answered without invoking any tool
pub fn no_tools_used() -> String {
    format!(
        "[ERROR] You did not use a tool in your previous response! Please retry with a tool use.

{TOOL_USE_REMINDER}

# Next Steps

If you have completed the user's task, use the attempt_completion tool.
If you require additional information from the user, use the ask_followup_question tool.
Otherwise, if you have not completed the task and do not need additional information, then proceed with the next step of the task.
(This is an automated message, so do not respond to it conversationally.)"
    )
}

pub fn too_many_mistakes(feedback: Option<&str>) -> String {
    format!(
        "You seem to be having trouble proceeding. The user has provided the following feedback to help guide you:\n<feedback>\n{}\n</feedback>",
        feedback.unwrap_or_default()
    )
}

pub fn missing_tool_parameter_error(param_name: &str) -> String {
    format!(
        "Missing value for required parameter '{param_name}'. Please retry with complete response.\n\n{TOOL_USE_REMINDER}"
    )
}

/// Tool output as message content.
///
/// Without images the text is returned bare. With images the text block comes
/// first, followed by one image block per URL in input order.
pub fn tool_result(text: &str, images: Option<&[String]>) -> Result<MessageContent> {
    match images {
        Some(images) if !images.is_empty() => {
            let mut blocks = Vec::with_capacity(images.len() + 1);
            blocks.push(ContentBlock::text(text));
            blocks.extend(format_images_into_blocks(Some(images))?);
            Ok(MessageContent::Blocks(blocks))
        }
        _ => Ok(MessageContent::Text(text.to_string())),
    }
}

pub fn image_blocks(images: Option<&[String]>) -> Result<Vec<ContentBlock>> {
    format_images_into_blocks(images)
}

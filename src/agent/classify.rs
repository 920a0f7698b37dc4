//! Map a structured response onto the task-state triple used by A2A task managers.

use serde::{Deserialize, Serialize};

use super::response::{ResponseStatus, StructuredResponse};

/// Reply used when no structured response is available.
pub const UNAVAILABLE_MESSAGE: &str =
    "We are unable to process your request at the moment. Please try again.";

/// What a caller needs to advance its task state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskStatusResult {
    pub is_task_complete: bool,
    pub require_user_input: bool,
    pub content: String,
}

/// Classify a turn's response.
///
/// `error` deliberately yields the same shape as `input_required`; only the
/// message tells them apart.
pub fn classify(response: Option<&StructuredResponse>) -> TaskStatusResult {
    let Some(response) = response else {
        return TaskStatusResult {
            is_task_complete: false,
            require_user_input: true,
            content: UNAVAILABLE_MESSAGE.to_string(),
        };
    };

    let is_task_complete = match response.status {
        ResponseStatus::InputRequired | ResponseStatus::Error => false,
        ResponseStatus::Completed => true,
    };
    TaskStatusResult {
        is_task_complete,
        require_user_input: !is_task_complete,
        content: response.message.clone(),
    }
}

//! The structured answer the model is asked to produce on every turn.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::generation::{strip_code_fences, OutputSchema};
use crate::tools::AgentToolParameters;

/// Name the output schema is registered under with the provider.
pub const RESPONSE_SCHEMA_NAME: &str = "ResponseFormat";

/// Task state reported by the model.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResponseStatus {
    /// The user must supply more information.
    #[default]
    InputRequired,
    Completed,
    Error,
}

/// Respond to the user in this format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructuredResponse {
    #[serde(default)]
    pub status: ResponseStatus,
    pub message: String,
}

/// Why a model answer could not be read as a [`StructuredResponse`].
#[derive(Debug, Error)]
pub enum StructuredOutputError {
    #[error("final output is empty")]
    Empty,
    #[error("final output does not match the response schema: {0}")]
    Schema(#[from] serde_json::Error),
}

impl StructuredResponse {
    pub fn new(status: ResponseStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ResponseStatus::Error, message)
    }

    /// Parse the model's final output, tolerating a Markdown code fence.
    ///
    /// Unknown status tags, a missing `message`, and free text all fail.
    pub fn parse(final_output: &str) -> Result<Self, StructuredOutputError> {
        let json = strip_code_fences(final_output);
        if json.is_empty() {
            return Err(StructuredOutputError::Empty);
        }
        Ok(serde_json::from_str(json)?)
    }

    /// JSON Schema handed to the runtime as the output contract.
    pub fn output_schema() -> OutputSchema {
        let params = AgentToolParameters::object()
            .string_enum(
                "status",
                "input_required if the user needs to provide more information, \
                 error if processing failed, completed if the request is done.",
                &["input_required", "completed", "error"],
                true,
            )
            .string("message", "Reply shown to the user.", true)
            .closed()
            .build();
        OutputSchema {
            name: RESPONSE_SCHEMA_NAME.to_string(),
            schema: params.schema,
        }
    }
}

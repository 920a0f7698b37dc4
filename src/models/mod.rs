//! Model definitions.

pub mod capabilities;
#[cfg(feature = "openai")]
pub mod openai;

pub use capabilities::ModelCapabilities;
#[cfg(feature = "openai")]
pub use openai::OpenAiModel;

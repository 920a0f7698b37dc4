//! Tool-loop text generation and structured output preparation.

pub mod object;
pub mod text;

pub use object::{prepare_structured_output, strip_code_fences, OutputSchema};
pub use text::generate_text;

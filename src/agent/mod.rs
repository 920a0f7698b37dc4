//! Currency agent: sessions, structured responses and task classification.

pub mod card;
pub mod classify;
pub mod currency;
pub mod response;
pub mod session;

pub use card::AgentCard;
pub use classify::{classify, TaskStatusResult};
pub use currency::{CurrencyAgent, SUPPORTED_CONTENT_TYPES};
pub use response::{ResponseStatus, StructuredOutputError, StructuredResponse};
pub use session::{Session, SessionHandle, SessionPolicy, SessionStore};

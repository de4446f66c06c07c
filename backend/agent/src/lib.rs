//! `doclens-agent` — implementations of the [`doclens_core::AgentRunner`]
//! collaborator: an OpenAI-compatible vision provider with structured
//! output, and a mock runner with canned responses for tests.

pub mod mock;
pub mod openai;

pub use mock::MockAgentRunner;
pub use openai::OpenAiVisionRunner;

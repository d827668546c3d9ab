//! Retrieval-augmented conversational turn engine.
//!
//! This is the one stateful piece of the system. Per user turn the engine:
//! merges typed input with image-derived text, retrieves context passages,
//! fuses them into an augmented user message, sends the entire bounded
//! conversation to the LLM runtime, appends the reply, and enforces the
//! history bound. The vector index, OCR engine, and LLM runtime are
//! external collaborators reached through the traits in `algomentor-core`.
//!
//! # Flow
//!
//! 1. Reject a second in-flight turn on the same session
//! 2. Merge image text into the typed input (degrade to placeholder)
//! 3. Retrieve top-k passages (degrade to empty context)
//! 4. Fuse context + question into the augmented user message
//! 5. Append user message, generate, append reply
//! 6. Enforce the history bound (system message always survives)

mod engine;
mod memory;
mod prompt;
mod ticker;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use engine::{EngineSettings, TurnEngine, TurnOutcome};
pub use memory::InMemorySessionStore;
pub use prompt::{DSA_SYSTEM_PROMPT, NO_TEXT_PLACEHOLDER};
pub use ticker::{ProgressTicker, TickerGuard};

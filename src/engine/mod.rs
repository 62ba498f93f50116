//! Engine subsystem for queryfix
//!
//! One adapter per backend family, each a pure pass-through to an external
//! engine reached via a configured client command. The harness owns no query
//! planning, rewriting, or retry logic: whatever the engine reports is what
//! gets surfaced, tagged with the problem that produced it.

mod adapter;
mod errors;
mod process;
mod result;

pub use adapter::EngineAdapter;
pub use errors::{EngineError, EngineResult};
pub use process::{decode, ProcessEngine};
pub use result::{Record, ResultSet};

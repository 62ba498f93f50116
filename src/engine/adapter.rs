//! The engine adapter seam.
//!
//! An adapter is a pure pass-through to one external engine: send query text,
//! get back records. No rewriting, no retries, no state.

use crate::fixture::BackendKind;

use super::errors::EngineResult;
use super::result::ResultSet;

/// Executes query text against one external engine
pub trait EngineAdapter {
    /// The backend family this adapter serves
    fn kind(&self) -> BackendKind;

    /// Sends the query to the engine and decodes its output
    fn execute(&self, query: &str) -> EngineResult<ResultSet>;
}

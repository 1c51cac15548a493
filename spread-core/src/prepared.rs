use crate::{AsValue, Result};
use std::fmt::Display;

/// A parameterized, backend-prepared statement handle.
///
/// # Binding Semantics
/// * `bind` appends a value, the driver keeps track of the next position.
/// * `bind_index` sets the parameter at `index` (from 1) and continues from there.
///
/// Methods return `&mut Self` for fluent chaining:
/// ```rust,ignore
/// prepared.bind(42)?.bind("hello")?;
/// ```
pub trait Prepared: Send + Sync + Display {
    /// Append a parameter value.
    fn bind(&mut self, value: impl AsValue) -> Result<&mut Self>;
    /// Bind a value at a specific index (from 1).
    fn bind_index(&mut self, value: impl AsValue, index: u64) -> Result<&mut Self>;
    /// Reset every parameter to NULL and restart from the first position.
    fn clear_bindings(&mut self) -> Result<&mut Self>;
    /// Number of parameters the statement expects.
    fn parameter_count(&self) -> usize;
}

//! The process-wide fluent context.

use crate::context::FluentContext;
use once_cell::sync::Lazy;

// Created on first access in a thread-safe manner.
static GLOBAL_CONTEXT: Lazy<FluentContext> = Lazy::new(FluentContext::default);

/// Provides a reference to the process-wide context.
///
/// Bootstrap code that cannot pass a context around registers here; tests
/// reset it with `global().clear()`.
///
/// # Examples
///
/// ```
/// use fibre_fluent::global;
///
/// struct Clock;
///
/// global().register::<Clock>().as_prototype();
/// assert!(!global().configuration().is_empty());
/// global().clear();
/// ```
pub fn global() -> &'static FluentContext {
  &GLOBAL_CONTEXT
}

//! The typed, chainable surface returned by the context entry points.

mod conditional;
mod object;

pub use conditional::ConditionalBinder;
pub use object::ObjectBinder;

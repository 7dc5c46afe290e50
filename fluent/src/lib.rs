//! # Fibre Fluent
//!
//! A fluent, thread-safe registration DSL for dependency-injection object
//! definitions.
//!
//! Fibre Fluent does not build objects. It lets bootstrap code describe
//! registrations with chained calls, turns them into immutable
//! [`ConfigurationRecord`]s and hands those to an [`ObjectDefinitionFactory`],
//! the container that actually owns construction and lifecycles.
//!
//! ## Core Concepts
//!
//! - **FluentContext**: owns the registry of builders and the DSL entry points.
//!   A process-wide instance is available through `global()`.
//! - **Binders**: typed, chainable handles returned by `register`, `for_type`
//!   and `bind`. Directives apply immediately; there is no commit step.
//! - **Records**: snapshots produced by the builders when the context loads.
//! - **Conditional bindings**: map an interface to one of several candidate
//!   implementations, chosen at load time (eager) or on first request (lazy).
//!
//! ## Quick Start
//!
//! ```
//! use fibre_fluent::{DefinitionStore, FluentContext, WiringMode};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!   fn greet(&self) -> String;
//! }
//!
//! struct EnglishGreeter;
//! impl Greeter for EnglishGreeter {
//!   fn greet(&self) -> String {
//!     "Hello!".to_string()
//!   }
//! }
//!
//! let ctx = FluentContext::new();
//! ctx
//!   .register::<EnglishGreeter>()
//!   .autowire(WiringMode::ByType)
//!   .with_property_value("punctuation", "!");
//! ctx
//!   .bind::<dyn Greeter>()
//!   .to::<EnglishGreeter, _>(|g| g as Arc<dyn Greeter>);
//!
//! // The factory owns instances; this one is handed a pre-built object.
//! let store = DefinitionStore::new();
//! store.add_instance(EnglishGreeter);
//!
//! let app = ctx.load(store).unwrap();
//! assert_eq!(app.get_bound::<dyn Greeter>().unwrap().greet(), "Hello!");
//! ```

mod application;
mod binder;
mod binding;
mod config;
mod context;
mod error;
mod factory;
mod global;
mod key;
mod mode;
mod parser;
mod record;
mod registry;

pub use application::ApplicationContext;
pub use binder::{ConditionalBinder, ObjectBinder};
pub use binding::{BindingState, BindingTarget, ConditionalBinding};
pub use config::FluentDefaults;
pub use context::FluentContext;
pub use error::{BoxError, FluentError, Result};
pub use factory::{DefinitionStore, ObjectDefinitionFactory, SharedObject, StoreError};
pub use global::global;
pub use key::{object_name_of, RegistrationKey, TypeKey};
pub use mode::{DependencyCheckMode, ResolutionTiming, Scope, WiringMode};
pub use parser::{ConditionalBindingDefinitionParser, ConfigurationParser, ObjectDefinitionParser};
pub use record::{ConfigurationRecord, PropertyBinding, ValueSource};
pub use registry::StaticConfiguration;

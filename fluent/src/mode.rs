//! Policies carried by every object definition.

use serde::{Deserialize, Serialize};

/// How the factory auto-matches an object's dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WiringMode {
  #[default]
  None,
  ByName,
  ByType,
  Constructor,
  AutoDetect,
}

/// How strictly the factory validates that dependencies are satisfiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyCheckMode {
  #[default]
  None,
  Objects,
  Simple,
  All,
}

/// Requested instance scope. Interpreting it is left to the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
  #[default]
  Singleton,
  Prototype,
}

/// When a conditional binding picks its implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolutionTiming {
  /// Resolved once while the context loads; failure aborts the load.
  #[default]
  Eager,
  /// Resolved the first time the interface is requested, then cached.
  Lazy,
}

//! Registry-wide defaults and their external configuration format.
//!
//! ```yaml
//! wiring_mode: by_type
//! dependency_check_mode: objects
//! ```

use crate::error::{FluentError, Result};
use crate::mode::{DependencyCheckMode, WiringMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Defaults adopted by object builders at the moment they are created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FluentDefaults {
  pub wiring_mode: WiringMode,
  pub dependency_check_mode: DependencyCheckMode,
}

impl FluentDefaults {
  pub fn new(wiring_mode: WiringMode, dependency_check_mode: DependencyCheckMode) -> Self {
    Self {
      wiring_mode,
      dependency_check_mode,
    }
  }

  pub fn from_yaml_str(source: &str) -> Result<Self> {
    serde_yaml::from_str(source).map_err(|e| FluentError::ConfigParse(e.to_string()))
  }

  pub fn from_json_str(source: &str) -> Result<Self> {
    serde_json::from_str(source).map_err(|e| FluentError::ConfigParse(e.to_string()))
  }

  /// Loads defaults from a file. `.json` files are read as JSON, anything
  /// else as YAML.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let is_json = path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
      Self::from_json_str(&contents)
    } else {
      Self::from_yaml_str(&contents)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_fields_fall_back_to_none() {
    let defaults = FluentDefaults::from_yaml_str("wiring_mode: by_name\n").unwrap();
    assert_eq!(defaults.wiring_mode, WiringMode::ByName);
    assert_eq!(defaults.dependency_check_mode, DependencyCheckMode::None);
  }

  #[test]
  fn json_and_yaml_agree() {
    let yaml = FluentDefaults::from_yaml_str("wiring_mode: auto_detect\ndependency_check_mode: all\n").unwrap();
    let json =
      FluentDefaults::from_json_str(r#"{"wiring_mode":"auto_detect","dependency_check_mode":"all"}"#).unwrap();
    assert_eq!(yaml, json);
  }

  #[test]
  fn unknown_fields_are_rejected() {
    let err = FluentDefaults::from_yaml_str("scope: prototype\n").unwrap_err();
    assert!(matches!(err, FluentError::ConfigParse(_)));
  }
}

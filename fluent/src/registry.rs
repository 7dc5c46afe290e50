//! The table of builders owned by a fluent context.

use crate::config::FluentDefaults;
use crate::key::{RegistrationKey, TypeKey};
use crate::mode::{DependencyCheckMode, WiringMode};
use crate::parser::{ConditionalBindingDefinitionParser, ConfigurationParser, ObjectDefinitionParser};
use dashmap::DashMap;
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

struct Slot<P> {
  // Registration order, used to hand records to the factory deterministically.
  seq: u64,
  parser: Arc<P>,
}

/// Maps registration keys to their builders and holds the defaults new
/// builders start from.
///
/// Object builders are keyed by `(type, identifier)`; binding builders by
/// their interface type. Inserting is idempotent: the builder already
/// stored for a key always wins and is returned to the caller.
///
/// Registration and [`clear`](Self::clear) are serialised by a gate lock,
/// so a clear never drops or resurrects a half-finished registration.
#[derive(Default)]
pub struct StaticConfiguration {
  objects: DashMap<RegistrationKey, Slot<ObjectDefinitionParser>>,
  bindings: DashMap<TypeKey, Slot<ConditionalBindingDefinitionParser>>,
  defaults: RwLock<FluentDefaults>,
  sequence: AtomicU64,
  gate: RwLock<()>,
}

impl StaticConfiguration {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_defaults(defaults: FluentDefaults) -> Self {
    Self {
      defaults: RwLock::new(defaults),
      ..Self::default()
    }
  }

  // --- Lookup ---

  /// Looks up the builder stored under `key`. Never mutates.
  pub fn get_configuration_parser(&self, key: &RegistrationKey) -> Option<ConfigurationParser> {
    tracing::trace!(?key, "looking up configuration parser");
    if let Some(slot) = self.objects.get(key) {
      return Some(ConfigurationParser::Object(Arc::clone(&slot.parser)));
    }
    if key.identifier().is_none() {
      if let Some(slot) = self.bindings.get(&key.type_key()) {
        return Some(ConfigurationParser::Binding(Arc::clone(&slot.parser)));
      }
    }
    None
  }

  // --- Registration ---

  /// Stores `parser` unless a builder with the same key exists, and returns
  /// whichever builder is stored afterwards.
  pub fn register_object_configuration(&self, parser: ConfigurationParser) -> ConfigurationParser {
    match parser {
      ConfigurationParser::Object(parser) => {
        let key = parser.key().clone();
        ConfigurationParser::Object(self.object_parser_or_insert_with(key, |_| parser))
      }
      ConfigurationParser::Binding(parser) => {
        let interface = parser.interface();
        ConfigurationParser::Binding(self.binding_parser_or_insert_with(interface, |_| parser))
      }
    }
  }

  pub(crate) fn object_parser_or_insert_with(
    &self,
    key: RegistrationKey,
    create: impl FnOnce(&FluentDefaults) -> Arc<ObjectDefinitionParser>,
  ) -> Arc<ObjectDefinitionParser> {
    let _gate = self.gate.read_recursive();
    let slot = self.objects.entry(key).or_insert_with(|| {
      let parser = create(&self.defaults.read());
      tracing::debug!(key = ?parser.key(), "registered object configuration");
      Slot {
        seq: self.sequence.fetch_add(1, Ordering::Relaxed),
        parser,
      }
    });
    Arc::clone(&slot.parser)
  }

  pub(crate) fn binding_parser_or_insert_with(
    &self,
    interface: TypeKey,
    create: impl FnOnce(&FluentDefaults) -> Arc<ConditionalBindingDefinitionParser>,
  ) -> Arc<ConditionalBindingDefinitionParser> {
    let _gate = self.gate.read_recursive();
    let slot = self.bindings.entry(interface).or_insert_with(|| {
      tracing::debug!(?interface, "registered conditional binding");
      Slot {
        seq: self.sequence.fetch_add(1, Ordering::Relaxed),
        parser: create(&self.defaults.read()),
      }
    });
    Arc::clone(&slot.parser)
  }

  /// Drops every builder and resets the defaults. Never fails.
  pub fn clear(&self) {
    let _gate = self.gate.write();
    let objects = self.objects.len();
    let bindings = self.bindings.len();
    self.objects.clear();
    self.bindings.clear();
    *self.defaults.write() = FluentDefaults::default();
    tracing::debug!(objects, bindings, "cleared fluent configuration");
  }

  // --- Defaults ---

  pub fn defaults(&self) -> FluentDefaults {
    *self.defaults.read()
  }

  /// Replaces the defaults used by builders created from now on.
  pub fn set_defaults(&self, defaults: FluentDefaults) {
    *self.defaults.write() = defaults;
  }

  pub fn set_default_wiring_mode(&self, mode: WiringMode) {
    self.defaults.write().wiring_mode = mode;
  }

  pub fn set_default_dependency_check_mode(&self, mode: DependencyCheckMode) {
    self.defaults.write().dependency_check_mode = mode;
  }

  // --- Snapshots ---

  /// Object builders in registration order.
  pub fn object_parsers(&self) -> Vec<Arc<ObjectDefinitionParser>> {
    let mut slots: Vec<_> = self
      .objects
      .iter()
      .map(|e| (e.value().seq, Arc::clone(&e.value().parser)))
      .collect();
    slots.sort_by_key(|(seq, _)| *seq);
    slots.into_iter().map(|(_, parser)| parser).collect()
  }

  /// Binding builders in registration order.
  pub fn binding_parsers(&self) -> Vec<Arc<ConditionalBindingDefinitionParser>> {
    let mut slots: Vec<_> = self
      .bindings
      .iter()
      .map(|e| (e.value().seq, Arc::clone(&e.value().parser)))
      .collect();
    slots.sort_by_key(|(seq, _)| *seq);
    slots.into_iter().map(|(_, parser)| parser).collect()
  }

  pub fn len(&self) -> usize {
    self.objects.len() + self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.objects.is_empty() && self.bindings.is_empty()
  }

  /// Holds off `clear` while a consistent snapshot is taken.
  pub(crate) fn hold(&self) -> RwLockReadGuard<'_, ()> {
    self.gate.read_recursive()
  }
}

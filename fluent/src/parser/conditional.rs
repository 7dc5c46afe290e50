//! Staging builder for an interface binding.

use crate::binding::{ConditionalBinding, ErasedSelector, ErasedTarget};
use crate::error::BoxError;
use crate::factory::ObjectDefinitionFactory;
use crate::key::TypeKey;
use crate::mode::ResolutionTiming;
use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;

pub(crate) type Condition = Arc<dyn Fn() -> bool + Send + Sync>;

#[derive(Clone)]
struct Candidate {
  target: ErasedTarget,
  condition: Option<Condition>,
}

struct BindingStaging {
  timing: ResolutionTiming,
  candidates: Vec<Candidate>,
  fallback: Option<ErasedTarget>,
  selector: Option<ErasedSelector>,
}

/// Accumulates the candidates of one interface binding.
///
/// Selection order is the order candidates were added; the first candidate
/// whose condition holds wins, then the fallback. A custom selector, when
/// set, replaces candidate evaluation entirely.
pub struct ConditionalBindingDefinitionParser {
  interface: TypeKey,
  staging: Mutex<BindingStaging>,
}

impl ConditionalBindingDefinitionParser {
  pub fn new<I: ?Sized + Any>(timing: ResolutionTiming) -> Self {
    Self {
      interface: TypeKey::of::<I>(),
      staging: Mutex::new(BindingStaging {
        timing,
        candidates: Vec::new(),
        fallback: None,
        selector: None,
      }),
    }
  }

  pub fn interface(&self) -> TypeKey {
    self.interface
  }

  pub fn timing(&self) -> ResolutionTiming {
    self.staging.lock().timing
  }

  pub fn set_timing(&self, timing: ResolutionTiming) {
    self.staging.lock().timing = timing;
  }

  pub fn candidate_count(&self) -> usize {
    self.staging.lock().candidates.len()
  }

  pub(crate) fn add_candidate(&self, target: ErasedTarget) {
    self.staging.lock().candidates.push(Candidate {
      target,
      condition: None,
    });
  }

  /// Guards the most recently added candidate. Returns `false` when there is
  /// no candidate to guard.
  pub(crate) fn guard_last(&self, condition: Condition) -> bool {
    match self.staging.lock().candidates.last_mut() {
      Some(candidate) => {
        candidate.condition = Some(condition);
        true
      }
      None => false,
    }
  }

  pub(crate) fn set_fallback(&self, target: ErasedTarget) {
    self.staging.lock().fallback = Some(target);
  }

  pub(crate) fn set_selector(&self, selector: ErasedSelector) {
    self.staging.lock().selector = Some(selector);
  }

  /// Materialises an unresolved binding from the current staging state.
  pub fn build(&self) -> ConditionalBinding {
    let staging = self.staging.lock();
    let selector = match &staging.selector {
      Some(selector) => Arc::clone(selector),
      None => {
        let candidates = staging.candidates.clone();
        let fallback = staging.fallback.clone();
        Arc::new(
          move |_: &dyn ObjectDefinitionFactory| -> Result<Option<ErasedTarget>, BoxError> {
            let chosen = candidates
              .iter()
              .find(|c| c.condition.as_ref().map_or(true, |holds| holds()))
              .map(|c| c.target.clone())
              .or_else(|| fallback.clone());
            Ok(chosen)
          },
        ) as ErasedSelector
      }
    };
    ConditionalBinding::new(self.interface, staging.timing, selector)
  }
}

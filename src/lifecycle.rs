//! # Page Activation Lifecycle
//!
//! Pages re-activate on every navigation. Each activation discards the
//! previous controller instance and its unit list entirely, runs any
//! registered teardown callbacks first, and then re-attaches from
//! scratch, so stale handlers can never double-apply a scale.

use tracing::{debug, info};

use crate::config::ScalerConfig;
use crate::controller::MultiplierController;
use crate::document::Document;
use crate::storage::KeyValueStore;

/// Ordered registry of teardown callbacks, run before re-initialization
#[derive(Default)]
pub struct CleanupRegistry {
    callbacks: Vec<Box<dyn FnOnce()>>,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback to run on the next teardown
    pub fn add_cleanup(&mut self, callback: impl FnOnce() + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Run and drop all registered callbacks, in registration order
    pub fn run(&mut self) {
        let callbacks = std::mem::take(&mut self.callbacks);
        let count = callbacks.len();
        for callback in callbacks {
            callback();
        }
        if count > 0 {
            debug!("Ran {} cleanup callbacks", count);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

/// Driver for the page-activation signal.
///
/// Holds at most one live controller; [`PageActivation::activate`] models
/// one firing of the activation event.
#[derive(Default)]
pub struct PageActivation {
    controller: Option<MultiplierController>,
    registry: CleanupRegistry,
}

impl PageActivation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one page-activation event: tear down the previous
    /// activation, then re-run controller attachment. Returns whether a
    /// controller attached to this page.
    pub fn activate(
        &mut self,
        doc: &mut Document,
        page_key: &str,
        store: &dyn KeyValueStore,
        config: ScalerConfig,
    ) -> bool {
        self.registry.run();
        // the previous instance and its unit list are discarded wholesale
        self.controller = None;

        self.controller = MultiplierController::attach(doc, page_key, store, config);
        if self.controller.is_some() {
            let key = page_key.to_string();
            self.registry.add_cleanup(move || {
                info!(page_key = %key, "Multiplier controls detached");
            });
        }
        self.controller.is_some()
    }

    pub fn controller(&self) -> Option<&MultiplierController> {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut MultiplierController> {
        self.controller.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn cleanup_runs_once_in_order() {
        let counter = Rc::new(Cell::new(0));
        let mut registry = CleanupRegistry::new();

        let first = Rc::clone(&counter);
        registry.add_cleanup(move || first.set(first.get() + 1));
        let second = Rc::clone(&counter);
        registry.add_cleanup(move || second.set(second.get() * 10));

        assert_eq!(registry.len(), 2);
        registry.run();
        assert_eq!(counter.get(), 10);
        assert!(registry.is_empty());

        registry.run();
        assert_eq!(counter.get(), 10);
    }
}

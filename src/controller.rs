//! # Multiplier Controller
//!
//! Orchestrates the scaling engine for one page activation. The
//! controller owns the extracted unit list and the current multiplier
//! state, inserts the control container next to the section heading, and
//! persists the chosen factor per page key.
//!
//! State machine: `Idle` (factor 1, originals untouched) and `Scaled`
//! (factor ≠ 1, units patched, marker present). Every factor change runs
//! two-phase: first compute all replacement strings without touching the
//! tree, then apply every patch, so the tree is never mutated while its
//! token positions are being read.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ScalerConfig;
use crate::document::{Document, NodeId};
use crate::formatter::format_quantity;
use crate::patcher;
use crate::scaler::scale;
use crate::scanner::QuantityScanner;
use crate::section::{self, IngredientUnit};
use crate::storage::KeyValueStore;

/// Class toggled on the control container while a factor ≠ 1 is applied
const ACTIVE_CLASS: &str = "multiplier-active";

/// Current multiplier state; `active` mirrors `factor != 1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierState {
    pub factor: f64,
    pub active: bool,
}

impl MultiplierState {
    fn idle() -> Self {
        Self {
            factor: 1.0,
            active: false,
        }
    }

    fn with_factor(factor: f64) -> Self {
        Self {
            factor,
            active: factor != 1.0,
        }
    }
}

/// Controller for one page activation.
///
/// Built through [`MultiplierController::attach`]; pages without an
/// ingredients section, or whose units carry no scalable quantity, get no
/// controller and no UI. The page identity is an explicit parameter, so
/// two pages never share persisted state.
pub struct MultiplierController {
    page_key: String,
    units: Vec<IngredientUnit>,
    control: NodeId,
    input: NodeId,
    state: MultiplierState,
    config: ScalerConfig,
    scanner: QuantityScanner,
}

impl MultiplierController {
    /// Run extraction and attach the controller to a page.
    ///
    /// Returns `None` when the config is invalid, when the page has no
    /// ingredients section, or when no extracted unit contains at least
    /// one quantity token. All of these are silent no-ops, never errors.
    ///
    /// Any pre-existing control container is removed first, then a fresh
    /// one is inserted after the section heading. A persisted factor ≠ 1
    /// is applied immediately, without an intermediate idle render.
    pub fn attach(
        doc: &mut Document,
        page_key: &str,
        store: &dyn KeyValueStore,
        config: ScalerConfig,
    ) -> Option<Self> {
        if let Err(e) = config.validate() {
            debug!("Not attaching multiplier controller: {}", e);
            return None;
        }

        let heading = section::find_section_heading(doc, &config)?;
        let units = section::extract_units(doc, &config);
        let scanner = QuantityScanner::new();
        if !units
            .iter()
            .any(|u| scanner.has_quantities(&u.original_text))
        {
            debug!("No unit with a scalable quantity; controller not attached");
            return None;
        }

        if let Some(existing) = doc.find_by_class(&config.control_class) {
            doc.detach(existing);
        }
        let (control, input) = build_control(doc, heading, &config);

        let mut controller = Self {
            page_key: page_key.to_string(),
            units,
            control,
            input,
            state: MultiplierState::idle(),
            config,
            scanner,
        };

        info!(
            page_key = %controller.page_key,
            units = controller.units.len(),
            "Multiplier controller attached"
        );

        if let Some(factor) = controller.load_persisted_factor(store) {
            if factor != 1.0 {
                controller.transition(doc, store, factor, false);
            }
        }

        Some(controller)
    }

    /// Set the multiplier factor, clamped into the configured bounds
    pub fn set_factor(&mut self, doc: &mut Document, store: &dyn KeyValueStore, factor: f64) {
        let factor = self.config.clamp_factor(factor);
        self.transition(doc, store, factor, true);
    }

    /// Step the factor up by the configured step
    pub fn increment(&mut self, doc: &mut Document, store: &dyn KeyValueStore) {
        let next = round_to_step(self.state.factor + self.config.step);
        self.set_factor(doc, store, next);
    }

    /// Step the factor down by the configured step
    pub fn decrement(&mut self, doc: &mut Document, store: &dyn KeyValueStore) {
        let next = round_to_step(self.state.factor - self.config.step);
        self.set_factor(doc, store, next);
    }

    /// Force the factor back to 1 and clear the persisted value
    pub fn reset(&mut self, doc: &mut Document, store: &dyn KeyValueStore) {
        store.remove(&self.storage_key());
        self.restore_all(doc);
        self.state = MultiplierState::idle();
        self.sync_input(doc);
        info!(page_key = %self.page_key, "Multiplier reset");
    }

    pub fn state(&self) -> MultiplierState {
        self.state
    }

    /// The extracted units, in section order
    pub fn units(&self) -> &[IngredientUnit] {
        &self.units
    }

    /// The inserted control container node
    pub fn control_node(&self) -> NodeId {
        self.control
    }

    fn storage_key(&self) -> String {
        format!("{}-ingredient-multiplier", self.page_key)
    }

    /// Read the persisted factor; unparsable values count as absent
    fn load_persisted_factor(&self, store: &dyn KeyValueStore) -> Option<f64> {
        let raw = store.get(&self.storage_key())?;
        match raw.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Some(self.config.clamp_factor(f)),
            _ => {
                debug!("Ignoring unparsable persisted factor '{}'", raw);
                None
            }
        }
    }

    /// Apply a clamped factor: persist (unless restoring a stored value),
    /// then either restore originals or recompute and patch every unit.
    fn transition(
        &mut self,
        doc: &mut Document,
        store: &dyn KeyValueStore,
        factor: f64,
        persist: bool,
    ) {
        if persist {
            store.set(&self.storage_key(), &factor.to_string());
        }

        if factor == 1.0 {
            self.restore_all(doc);
            self.state = MultiplierState::idle();
        } else {
            let patches = self.compute_patches(factor);
            self.apply_patches(doc, patches);
            doc.add_class(self.control, ACTIVE_CLASS);
            self.state = MultiplierState::with_factor(factor);
        }
        self.sync_input(doc);
        debug!(
            page_key = %self.page_key,
            factor,
            active = self.state.active,
            "Multiplier transition"
        );
    }

    /// Phase one: compute each unit's fully patched text without touching
    /// the tree. Tokens are substituted from the highest start offset
    /// down, so earlier offsets stay valid while the string is edited.
    /// Units without tokens, or whose scaling fails, yield no patch.
    fn compute_patches(&self, factor: f64) -> Vec<(usize, String)> {
        let mut patches = Vec::new();
        'units: for (idx, unit) in self.units.iter().enumerate() {
            let tokens = self.scanner.scan(&unit.original_text);
            if tokens.is_empty() {
                continue;
            }
            let mut text = unit.original_text.clone();
            for token in &tokens {
                let scaled = match scale(token.value, factor) {
                    Ok(v) => v,
                    Err(e) => {
                        debug!("Skipping unit {}: {}", unit.section_order, e);
                        continue 'units;
                    }
                };
                let replacement = format_quantity(scaled, &token.matched_text);
                text.replace_range(token.start..token.end, &replacement);
            }
            patches.push((idx, text));
        }
        patches
    }

    /// Phase two: write every computed patch into the tree
    fn apply_patches(&self, doc: &mut Document, patches: Vec<(usize, String)>) {
        for (idx, text) in patches {
            patcher::apply_text(doc, &self.units[idx], &text, &self.config.marker_class);
        }
    }

    fn restore_all(&self, doc: &mut Document) {
        for unit in &self.units {
            patcher::restore_text(doc, unit, &self.config.marker_class);
        }
        doc.remove_class(self.control, ACTIVE_CLASS);
    }

    /// Mirror the current factor into the numeric input's value attribute
    fn sync_input(&self, doc: &mut Document) {
        doc.set_attr(self.input, "value", &format_factor(self.state.factor));
    }
}

/// Build the control container (label, numeric input with bounds and
/// step, stepper buttons, reset button) and insert it after the heading.
fn build_control(doc: &mut Document, heading: NodeId, config: &ScalerConfig) -> (NodeId, NodeId) {
    let container = doc.new_element("div");
    doc.add_class(container, &config.control_class);
    doc.insert_after(heading, container);

    let controls = doc.push_element(container, "div");
    doc.add_class(controls, "multiplier-controls");

    let label = doc.push_element(controls, "label");
    doc.set_attr(label, "for", "portion-multiplier");
    doc.push_text(label, "Adag szorzó:");

    let group = doc.push_element(controls, "div");
    doc.add_class(group, "multiplier-input-group");

    let decrease = doc.push_element(group, "button");
    doc.add_class(decrease, "multiplier-btn");
    doc.add_class(decrease, "decrease");
    doc.set_attr(decrease, "aria-label", "Csökkentés");
    doc.push_text(decrease, "−");

    let input = doc.push_element(group, "input");
    doc.set_attr(input, "type", "number");
    doc.set_attr(input, "id", "portion-multiplier");
    doc.set_attr(input, "min", &format_factor(config.min_factor));
    doc.set_attr(input, "max", &format_factor(config.max_factor));
    doc.set_attr(input, "step", &format_factor(config.step));
    doc.set_attr(input, "value", "1");

    let increase = doc.push_element(group, "button");
    doc.add_class(increase, "multiplier-btn");
    doc.add_class(increase, "increase");
    doc.set_attr(increase, "aria-label", "Növelés");
    doc.push_text(increase, "+");

    let reset = doc.push_element(controls, "button");
    doc.add_class(reset, "reset-btn");
    doc.push_text(reset, "Visszaállítás");

    (container, input)
}

/// Keep stepped factors on the one-decimal grid the controls present, so
/// repeated increments never accumulate float noise (1.1 + 0.1 stays 1.2)
fn round_to_step(factor: f64) -> f64 {
    (factor * 10.0).round() / 10.0
}

/// Render a factor without trailing float noise ("2", "2.5", "0.1")
fn format_factor(factor: f64) -> String {
    if (factor - factor.round()).abs() < 1e-9 {
        format!("{}", factor.round() as i64)
    } else {
        let rendered = format!("{:.2}", factor);
        rendered.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

//! # Ingredient Scaler
//!
//! An ingredient-quantity scaling engine for recipe pages: scans
//! free-form ingredient text for numeric quantities (decimals, fractions,
//! ranges, whole numbers), scales them by a user-chosen multiplier,
//! reformats the result preserving the original notation style, and
//! rewrites the owning document nodes without disturbing nested
//! structure. The chosen factor is persisted per page and reapplied on
//! every page activation.

pub mod config;
pub mod controller;
pub mod document;
pub mod errors;
pub mod formatter;
pub mod lifecycle;
pub mod patcher;
pub mod scaler;
pub mod scanner;
pub mod section;
pub mod storage;

// Re-export types for easier access
pub use config::ScalerConfig;
pub use controller::{MultiplierController, MultiplierState};
pub use document::{Document, NodeId};
pub use lifecycle::{CleanupRegistry, PageActivation};
pub use scanner::{QuantityKind, QuantityScanner, QuantityToken};
pub use section::IngredientUnit;
pub use storage::{KeyValueStore, MemoryStore};

//! Demo binary: builds a sample recipe page, activates the scaling
//! engine against it and walks through a factor change and a reset,
//! logging each step. Pass a factor as the first argument (default 2).

use anyhow::Result;
use ingredient_scaler::config::ScalerConfig;
use ingredient_scaler::document::Document;
use ingredient_scaler::lifecycle::PageActivation;
use ingredient_scaler::section;
use ingredient_scaler::storage::MemoryStore;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Assemble a small recipe page with an ingredients section, a nested
/// sub-list and a marked inline span.
fn build_sample_page(doc: &mut Document) {
    let title = doc.push_element(doc.root(), "h1");
    doc.set_attr(title, "id", "hozzávalók");
    doc.push_text(title, "Hozzávalók");

    let list = doc.push_element(doc.root(), "ul");

    let flour = doc.push_element(list, "li");
    doc.push_text(flour, "- 2 kg liszt");

    let eggs = doc.push_element(list, "li");
    doc.push_text(eggs, "2-3 db tojás");

    let milk = doc.push_element(list, "li");
    doc.push_text(milk, "1/2 l tej");

    let dough = doc.push_element(list, "li");
    doc.push_text(dough, "a tésztához:");
    let sub = doc.push_element(dough, "ul");
    let butter = doc.push_element(sub, "li");
    doc.push_text(butter, "12,5 dkg vaj");

    let note = doc.push_element(doc.root(), "p");
    let span = doc.push_element(note, "span");
    doc.set_attr(span, "data-qty-parse", "");
    doc.push_text(span, "4 adag");

    let next = doc.push_element(doc.root(), "h1");
    doc.set_attr(next, "id", "elkészítés");
    doc.push_text(next, "Elkészítés");
}

fn print_units(doc: &Document, config: &ScalerConfig, label: &str) {
    println!("{}", label);
    for unit in section::extract_units(doc, config) {
        println!("  [{}] {}", unit.section_order, section::direct_text(doc, unit.node).trim());
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let factor: f64 = env::args()
        .nth(1)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(2.0);

    let config = ScalerConfig::load();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Scaler configuration validation failed: {}", e))?;

    let mut doc = Document::new();
    build_sample_page(&mut doc);

    let store = MemoryStore::new();
    let mut activation = PageActivation::new();
    if !activation.activate(&mut doc, "demo-recipe", &store, config.clone()) {
        info!("No scalable ingredients on this page; nothing to do");
        return Ok(());
    }

    print_units(&doc, &config, "Original:");

    let controller = activation
        .controller_mut()
        .expect("controller just attached");
    controller.set_factor(&mut doc, &store, factor);
    print_units(&doc, &config, &format!("Scaled by {}:", factor));

    controller.reset(&mut doc, &store);
    print_units(&doc, &config, "After reset:");

    Ok(())
}

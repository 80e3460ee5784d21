#[cfg(test)]
mod tests {
    use ingredient_scaler::config::ScalerConfig;
    use ingredient_scaler::controller::MultiplierController;
    use ingredient_scaler::document::{Document, NodeId};
    use ingredient_scaler::lifecycle::PageActivation;
    use ingredient_scaler::section;
    use ingredient_scaler::storage::{KeyValueStore, MemoryStore};

    const PAGE_KEY: &str = "palacsinta";
    const STORE_KEY: &str = "palacsinta-ingredient-multiplier";

    /// Recipe page with a heading, a list (one nested sub-list), a marked
    /// span and a following section. Returns ids of interesting nodes.
    fn build_page(doc: &mut Document) -> (NodeId, NodeId, NodeId) {
        let h1 = doc.push_element(doc.root(), "h1");
        doc.set_attr(h1, "id", "hozzávalók");
        doc.push_text(h1, "Hozzávalók");

        let ul = doc.push_element(doc.root(), "ul");
        let flour = doc.push_element(ul, "li");
        doc.push_text(flour, "- 2 kg liszt");
        let eggs = doc.push_element(ul, "li");
        doc.push_text(eggs, "2-3 db tojás");
        let salt = doc.push_element(ul, "li");
        doc.push_text(salt, "csipet só");

        let dough = doc.push_element(ul, "li");
        doc.push_text(dough, "a tésztához:");
        let sub = doc.push_element(dough, "ul");
        let butter = doc.push_element(sub, "li");
        doc.push_text(butter, "1/2 kg vaj");

        let next = doc.push_element(doc.root(), "h1");
        doc.set_attr(next, "id", "elkészítés");

        (h1, flour, butter)
    }

    fn attach(doc: &mut Document, store: &MemoryStore) -> MultiplierController {
        MultiplierController::attach(doc, PAGE_KEY, store, ScalerConfig::default())
            .expect("controller should attach to a page with quantities")
    }

    fn unit_text(doc: &Document, node: NodeId) -> String {
        section::direct_text(doc, node).trim().to_string()
    }

    #[test]
    fn test_attach_requires_section_heading() {
        let mut doc = Document::new();
        let ul = doc.push_element(doc.root(), "ul");
        let li = doc.push_element(ul, "li");
        doc.push_text(li, "2 kg liszt");

        let store = MemoryStore::new();
        assert!(
            MultiplierController::attach(&mut doc, PAGE_KEY, &store, ScalerConfig::default())
                .is_none()
        );
    }

    #[test]
    fn test_attach_requires_at_least_one_quantity() {
        let mut doc = Document::new();
        let h1 = doc.push_element(doc.root(), "h1");
        doc.set_attr(h1, "id", "hozzávalók");
        let ul = doc.push_element(doc.root(), "ul");
        let li = doc.push_element(ul, "li");
        doc.push_text(li, "só ízlés szerint");

        let store = MemoryStore::new();
        assert!(
            MultiplierController::attach(&mut doc, PAGE_KEY, &store, ScalerConfig::default())
                .is_none()
        );
    }

    #[test]
    fn test_control_container_inserted_after_heading() {
        let mut doc = Document::new();
        let (h1, _, _) = build_page(&mut doc);
        let store = MemoryStore::new();
        let controller = attach(&mut doc, &store);

        assert_eq!(doc.next_sibling(h1), Some(controller.control_node()));
        assert!(doc.has_class(controller.control_node(), "ingredient-multiplier"));
    }

    #[test]
    fn test_scale_and_restore_round_trip() {
        let mut doc = Document::new();
        let (_, flour, _) = build_page(&mut doc);
        let store = MemoryStore::new();
        let mut controller = attach(&mut doc, &store);

        controller.set_factor(&mut doc, &store, 2.0);
        assert_eq!(unit_text(&doc, flour), "- 4 kg liszt");
        assert!(doc.has_class(flour, "ingredient-scaled"));
        assert!(controller.state().active);
        assert_eq!(store.get(STORE_KEY).as_deref(), Some("2"));

        controller.set_factor(&mut doc, &store, 1.0);
        assert_eq!(unit_text(&doc, flour), "- 2 kg liszt");
        assert!(!doc.has_class(flour, "ingredient-scaled"));
        assert!(!controller.state().active);
    }

    #[test]
    fn test_factor_changes_recompute_from_originals() {
        let mut doc = Document::new();
        let (_, flour, _) = build_page(&mut doc);
        let store = MemoryStore::new();
        let mut controller = attach(&mut doc, &store);

        controller.set_factor(&mut doc, &store, 2.0);
        controller.set_factor(&mut doc, &store, 3.0);
        // 3x of the ORIGINAL 2, not 3x of the already-scaled 4
        assert_eq!(unit_text(&doc, flour), "- 6 kg liszt");
    }

    #[test]
    fn test_nested_sub_list_is_preserved_and_scaled_independently() {
        let mut doc = Document::new();
        let (_, _, butter) = build_page(&mut doc);
        let store = MemoryStore::new();
        let mut controller = attach(&mut doc, &store);

        controller.set_factor(&mut doc, &store, 2.0);
        // the parent item "a tésztához:" has no quantity and is untouched;
        // its nested sub-list item scales as its own unit
        assert_eq!(unit_text(&doc, butter), "1 kg vaj");

        controller.set_factor(&mut doc, &store, 1.0);
        assert_eq!(unit_text(&doc, butter), "1/2 kg vaj");
    }

    #[test]
    fn test_units_without_quantities_stay_untouched() {
        let mut doc = Document::new();
        build_page(&mut doc);
        let store = MemoryStore::new();
        let mut controller = attach(&mut doc, &store);

        let salt = controller
            .units()
            .iter()
            .find(|u| u.original_text == "csipet só")
            .expect("salt unit extracted")
            .node;

        controller.set_factor(&mut doc, &store, 2.0);
        assert_eq!(unit_text(&doc, salt), "csipet só");
        assert!(!doc.has_class(salt, "ingredient-scaled"));
    }

    #[test]
    fn test_out_of_bounds_factors_are_clamped() {
        let mut doc = Document::new();
        build_page(&mut doc);
        let store = MemoryStore::new();
        let mut controller = attach(&mut doc, &store);

        controller.set_factor(&mut doc, &store, 100.0);
        assert_eq!(controller.state().factor, 10.0);

        controller.set_factor(&mut doc, &store, 0.001);
        assert_eq!(controller.state().factor, 0.1);
    }

    #[test]
    fn test_increment_and_decrement_step_by_tenths() {
        let mut doc = Document::new();
        build_page(&mut doc);
        let store = MemoryStore::new();
        let mut controller = attach(&mut doc, &store);

        controller.increment(&mut doc, &store);
        assert_eq!(controller.state().factor, 1.1);
        assert_eq!(store.get(STORE_KEY).as_deref(), Some("1.1"));

        controller.decrement(&mut doc, &store);
        assert_eq!(controller.state().factor, 1.0);
        assert!(!controller.state().active);

        // decrementing at the lower bound stays clamped
        for _ in 0..20 {
            controller.decrement(&mut doc, &store);
        }
        assert_eq!(controller.state().factor, 0.1);
    }

    #[test]
    fn test_reset_restores_and_clears_persisted_value() {
        let mut doc = Document::new();
        let (_, flour, _) = build_page(&mut doc);
        let store = MemoryStore::new();
        let mut controller = attach(&mut doc, &store);

        controller.set_factor(&mut doc, &store, 2.0);
        controller.reset(&mut doc, &store);

        assert_eq!(unit_text(&doc, flour), "- 2 kg liszt");
        assert_eq!(controller.state().factor, 1.0);
        assert!(store.get(STORE_KEY).is_none());
    }

    #[test]
    fn test_persisted_factor_applies_on_attach() {
        let mut doc = Document::new();
        let (_, flour, _) = build_page(&mut doc);
        let store = MemoryStore::new();
        store.set(STORE_KEY, "2");

        let controller = attach(&mut doc, &store);
        assert!(controller.state().active);
        assert_eq!(controller.state().factor, 2.0);
        assert_eq!(unit_text(&doc, flour), "- 4 kg liszt");
    }

    #[test]
    fn test_unparsable_persisted_factor_is_treated_as_absent() {
        let mut doc = Document::new();
        let (_, flour, _) = build_page(&mut doc);
        let store = MemoryStore::new();
        store.set(STORE_KEY, "sok");

        let controller = attach(&mut doc, &store);
        assert!(!controller.state().active);
        assert_eq!(unit_text(&doc, flour), "- 2 kg liszt");
    }

    #[test]
    fn test_reactivation_rebuilds_controller_and_control_node() {
        let mut doc = Document::new();
        build_page(&mut doc);
        let store = MemoryStore::new();
        let mut activation = PageActivation::new();

        assert!(activation.activate(&mut doc, PAGE_KEY, &store, ScalerConfig::default()));
        activation
            .controller_mut()
            .unwrap()
            .set_factor(&mut doc, &store, 2.0);

        // navigating back delivers a freshly rendered page; the persisted
        // factor reapplies to a freshly attached controller immediately
        let mut fresh = Document::new();
        let (h1, flour, _) = build_page(&mut fresh);
        assert!(activation.activate(&mut fresh, PAGE_KEY, &store, ScalerConfig::default()));
        let controller = activation.controller().unwrap();
        assert!(controller.state().active);
        assert_eq!(controller.state().factor, 2.0);
        assert_eq!(unit_text(&fresh, flour), "- 4 kg liszt");
        assert_eq!(fresh.next_sibling(h1), Some(controller.control_node()));
    }
}

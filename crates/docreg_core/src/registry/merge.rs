//! Registry merge.
//!
//! # Invariants
//! - Pure and total: no I/O, no failure path.
//! - Static categories keep catalog order; static items come before added
//!   items of the same category.
//! - Added buckets naming no static category follow the static categories,
//!   in bucket order. Without such buckets the output has exactly one
//!   category per static category.
//! - Overrides apply to static documents only and never change an id.

use crate::catalog::Catalog;
use crate::model::document::Category;
use crate::store::{AddedDocumentSet, OverrideMap};

/// Builds the render-ready registry.
pub fn merge_registry(
    catalog: &Catalog,
    overrides: &OverrideMap,
    added: &AddedDocumentSet,
) -> Vec<Category> {
    let mut registry: Vec<Category> = catalog
        .categories()
        .iter()
        .map(|category| {
            let static_items = category.items.iter().map(|document| {
                overrides
                    .get(&document.id)
                    .map_or_else(|| document.clone(), |patch| document.patched(patch))
            });
            let added_items = added
                .get(&category.name)
                .into_iter()
                .flat_map(|items| items.iter().cloned());
            Category::new(category.name.clone(), static_items.chain(added_items).collect())
        })
        .collect();

    for (name, items) in added {
        if catalog
            .categories()
            .iter()
            .all(|category| &category.name != name)
        {
            registry.push(Category::new(name.clone(), items.clone()));
        }
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::merge_registry;
    use crate::catalog::Catalog;
    use crate::model::document::{Category, Document, DocumentId, DocumentPatch};
    use crate::store::{AddedDocumentSet, OverrideMap};

    fn engines_catalog() -> Catalog {
        Catalog::new(vec![
            Category::new("Engines", vec![Document::new("e1", "Old", "x", "")]),
            Category::new("Governance", vec![Document::new("g1", "Charter", "y", "")]),
        ])
        .expect("valid catalog")
    }

    #[test]
    fn empty_overlays_reproduce_catalog() {
        let catalog = engines_catalog();
        let registry = merge_registry(&catalog, &OverrideMap::new(), &AddedDocumentSet::new());
        assert_eq!(registry, catalog.categories());
    }

    #[test]
    fn empty_catalog_and_overlays_merge_to_nothing() {
        let registry = merge_registry(
            &Catalog::empty(),
            &OverrideMap::new(),
            &AddedDocumentSet::new(),
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn override_applies_on_top_of_static_document() {
        let mut overrides = OverrideMap::new();
        overrides.insert(DocumentId::new("e1"), DocumentPatch::title("New"));

        let registry = merge_registry(&engines_catalog(), &overrides, &AddedDocumentSet::new());
        assert_eq!(registry[0].items, vec![Document::new("e1", "New", "x", "")]);
        assert_eq!(registry[1].items[0].title, "Charter");
    }

    #[test]
    fn added_items_follow_static_items() {
        let mut added = AddedDocumentSet::new();
        added.insert(
            "Engines".to_string(),
            vec![Document::new("n1", "Fresh", "", "")],
        );

        let registry = merge_registry(&engines_catalog(), &OverrideMap::new(), &added);
        assert_eq!(registry.len(), 2);
        let ids: Vec<&str> = registry[0]
            .items
            .iter()
            .map(|document| document.id.as_str())
            .collect();
        assert_eq!(ids, vec!["e1", "n1"]);
    }

    #[test]
    fn orphan_buckets_become_trailing_categories() {
        let mut added = AddedDocumentSet::new();
        added.insert(
            "Playbooks".to_string(),
            vec![Document::new("p1", "Runbook", "", "")],
        );

        let registry = merge_registry(&engines_catalog(), &OverrideMap::new(), &added);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry[2].name, "Playbooks");
        assert_eq!(registry[2].items[0].id.as_str(), "p1");
    }

    #[test]
    fn overrides_for_unknown_ids_are_ignored() {
        let mut overrides = OverrideMap::new();
        overrides.insert(DocumentId::new("ghost"), DocumentPatch::title("Boo"));

        let catalog = engines_catalog();
        let registry = merge_registry(&catalog, &overrides, &AddedDocumentSet::new());
        assert_eq!(registry, catalog.categories());
    }
}

//! Relationship storage.
//!
//! [`RelationshipGraph`] keeps the diagram's relationships in creation order.
//! Edges are keyed by the ordered pair of class ids; there is at most one
//! edge per pair, and self-loops are allowed.
//!
//! Endpoints are [`ClassId`]s, so a class rename never touches this graph.
//! Class deletion does: [`RelationshipGraph::purge_references_to`] is the
//! cascade hook the manager calls before the class record is dropped.

use umlkit_core::{
    error::{EntityKind, ModelError, ModelResult},
    identifier::ClassId,
    model::{Relationship, RelationshipKind},
};

use crate::store::EntityStore;

/// Ordered list of directed, typed relationships between classes.
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    edges: Vec<Relationship>,
}

impl RelationshipGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of relationships.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if there are no relationships.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterates over relationships in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.edges.iter()
    }

    /// Returns the relationship for the ordered pair, if any.
    pub fn find(&self, source: ClassId, destination: ClassId) -> Option<&Relationship> {
        self.edges
            .iter()
            .find(|edge| edge.connects(source, destination))
    }

    /// Returns `true` if a relationship exists for the ordered pair.
    pub fn contains(&self, source: ClassId, destination: ClassId) -> bool {
        self.find(source, destination).is_some()
    }

    /// Iterates over relationships that have `class` as either endpoint.
    pub fn references_to(&self, class: ClassId) -> impl Iterator<Item = &Relationship> {
        self.edges.iter().filter(move |edge| edge.touches(class))
    }

    /// Appends a relationship.
    ///
    /// Both endpoints must be live classes in `store`.
    pub(crate) fn add(
        &mut self,
        store: &EntityStore,
        source: ClassId,
        destination: ClassId,
        kind: RelationshipKind,
    ) -> ModelResult<()> {
        for endpoint in [source, destination] {
            if store.class_by_id(endpoint).is_none() {
                return Err(ModelError::not_found(EntityKind::Class, endpoint.to_string()));
            }
        }
        if self.contains(source, destination) {
            return Err(ModelError::conflict(
                EntityKind::Relationship,
                pair_label(source, destination),
            ));
        }

        self.edges.push(Relationship::new(source, destination, kind));
        Ok(())
    }

    /// Removes the relationship for the ordered pair and returns it.
    pub(crate) fn remove(
        &mut self,
        source: ClassId,
        destination: ClassId,
    ) -> ModelResult<Relationship> {
        let position = self
            .edges
            .iter()
            .position(|edge| edge.connects(source, destination))
            .ok_or_else(|| {
                ModelError::not_found(EntityKind::Relationship, pair_label(source, destination))
            })?;
        Ok(self.edges.remove(position))
    }

    /// Changes the kind of the relationship for the ordered pair.
    pub(crate) fn change_kind(
        &mut self,
        source: ClassId,
        destination: ClassId,
        kind: RelationshipKind,
    ) -> ModelResult<()> {
        let edge = self
            .edges
            .iter_mut()
            .find(|edge| edge.connects(source, destination))
            .ok_or_else(|| {
                ModelError::not_found(EntityKind::Relationship, pair_label(source, destination))
            })?;
        edge.set_kind(kind);
        Ok(())
    }

    /// Removes every relationship touching `class`. Returns how many went.
    pub(crate) fn purge_references_to(&mut self, class: ClassId) -> usize {
        let before = self.edges.len();
        self.edges.retain(|edge| !edge.touches(class));
        before - self.edges.len()
    }

    /// Drops every relationship.
    pub(crate) fn clear(&mut self) {
        self.edges.clear();
    }
}

fn pair_label(source: ClassId, destination: ClassId) -> String {
    format!("{source} -> {destination}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(names: &[&str]) -> (EntityStore, Vec<ClassId>) {
        let mut store = EntityStore::new();
        let ids = names
            .iter()
            .map(|name| store.add_class(name).expect("unique class"))
            .collect();
        (store, ids)
    }

    #[test]
    fn test_add_and_find() {
        let (store, ids) = store_with(&["A", "B"]);
        let mut graph = RelationshipGraph::new();

        graph
            .add(&store, ids[0], ids[1], RelationshipKind::Inheritance)
            .unwrap();

        let edge = graph.find(ids[0], ids[1]).expect("edge exists");
        assert_eq!(edge.kind(), RelationshipKind::Inheritance);
        assert!(graph.find(ids[1], ids[0]).is_none());
    }

    #[test]
    fn test_add_duplicate_pair_conflicts_regardless_of_kind() {
        let (store, ids) = store_with(&["A", "B"]);
        let mut graph = RelationshipGraph::new();
        graph
            .add(&store, ids[0], ids[1], RelationshipKind::Inheritance)
            .unwrap();

        let err = graph
            .add(&store, ids[0], ids[1], RelationshipKind::Composition)
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_reverse_pair_is_distinct() {
        let (store, ids) = store_with(&["A", "B"]);
        let mut graph = RelationshipGraph::new();

        graph
            .add(&store, ids[0], ids[1], RelationshipKind::Aggregation)
            .unwrap();
        graph
            .add(&store, ids[1], ids[0], RelationshipKind::Aggregation)
            .unwrap();

        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_self_relationship_allowed() {
        let (store, ids) = store_with(&["Node"]);
        let mut graph = RelationshipGraph::new();

        graph
            .add(&store, ids[0], ids[0], RelationshipKind::Aggregation)
            .unwrap();
        assert!(graph.contains(ids[0], ids[0]));
    }

    #[test]
    fn test_add_rejects_dead_endpoint() {
        let (mut store, ids) = store_with(&["A", "B"]);
        store.remove_class("B").unwrap();
        let mut graph = RelationshipGraph::new();

        let err = graph
            .add(&store, ids[0], ids[1], RelationshipKind::Aggregation)
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(graph.is_empty());
    }

    #[test]
    fn test_remove_and_change_kind_missing() {
        let (_, ids) = store_with(&["A", "B"]);
        let mut graph = RelationshipGraph::new();

        assert!(graph.remove(ids[0], ids[1]).unwrap_err().is_not_found());
        assert!(
            graph
                .change_kind(ids[0], ids[1], RelationshipKind::Realization)
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn test_change_kind_in_place() {
        let (store, ids) = store_with(&["A", "B", "C"]);
        let mut graph = RelationshipGraph::new();
        graph
            .add(&store, ids[0], ids[1], RelationshipKind::Aggregation)
            .unwrap();
        graph
            .add(&store, ids[1], ids[2], RelationshipKind::Aggregation)
            .unwrap();

        graph
            .change_kind(ids[0], ids[1], RelationshipKind::Composition)
            .unwrap();

        let kinds: Vec<_> = graph.iter().map(Relationship::kind).collect();
        assert_eq!(
            kinds,
            [RelationshipKind::Composition, RelationshipKind::Aggregation]
        );
    }

    #[test]
    fn test_purge_references_to() {
        let (store, ids) = store_with(&["A", "B", "C"]);
        let mut graph = RelationshipGraph::new();
        graph
            .add(&store, ids[0], ids[1], RelationshipKind::Aggregation)
            .unwrap();
        graph
            .add(&store, ids[2], ids[0], RelationshipKind::Inheritance)
            .unwrap();
        graph
            .add(&store, ids[1], ids[2], RelationshipKind::Composition)
            .unwrap();

        assert_eq!(graph.purge_references_to(ids[0]), 2);
        assert_eq!(graph.len(), 1);
        assert!(graph.contains(ids[1], ids[2]));
        assert_eq!(graph.references_to(ids[0]).count(), 0);
    }
}

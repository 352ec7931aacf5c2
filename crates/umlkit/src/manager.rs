//! The mutation façade for a class diagram.
//!
//! [`DiagramManager`] owns the [`EntityStore`] and the [`RelationshipGraph`]
//! and is the only way to change either. Every verb follows the same shape:
//! run the [`Validator`] preconditions, return the first failure untouched,
//! otherwise mutate and run any cascades in the same call. A returned error
//! always means nothing changed.

use log::{debug, info};

use umlkit_core::{
    error::{EntityKind, ModelError, ModelResult},
    identifier::ClassId,
    model::{Class, Method, RelationshipKind},
    ordered::first_duplicate,
};

use crate::{graph::RelationshipGraph, store::EntityStore, validation::Validator};

/// A relationship with its endpoints resolved to class names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipView<'a> {
    pub source: &'a str,
    pub destination: &'a str,
    pub kind: RelationshipKind,
}

/// Owner of a diagram's classes and relationships.
///
/// # Examples
///
/// ```
/// use umlkit::{DiagramManager, RelationshipKind};
///
/// let mut manager = DiagramManager::new();
/// manager.add_class("Animal").unwrap();
/// manager.add_class("Dog").unwrap();
/// manager
///     .add_relationship("Dog", "Animal", RelationshipKind::Inheritance)
///     .unwrap();
///
/// manager.rename_class("Animal", "Creature").unwrap();
///
/// let rel = manager.relationships().next().unwrap();
/// assert_eq!(rel.source, "Dog");
/// assert_eq!(rel.destination, "Creature");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiagramManager {
    store: EntityStore,
    graph: RelationshipGraph,
}

impl DiagramManager {
    /// Creates an empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the class store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Borrow the relationship graph.
    pub fn graph(&self) -> &RelationshipGraph {
        &self.graph
    }

    /// Returns a validator over the current diagram.
    pub fn validator(&self) -> Validator<'_> {
        Validator::new(&self.store, &self.graph)
    }

    /// Returns `true` if the diagram has no classes and no relationships.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty() && self.graph.is_empty()
    }

    /// Looks up a class by name.
    pub fn class(&self, name: &str) -> Option<&Class> {
        self.store.class(name)
    }

    /// Iterates over classes in list order.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.store.classes()
    }

    /// Returns the classes sorted by name, leaving list order alone.
    pub fn sorted_classes(&self) -> Vec<&Class> {
        self.store.sorted_classes()
    }

    /// Iterates over relationships in creation order, with names resolved.
    pub fn relationships(&self) -> impl Iterator<Item = RelationshipView<'_>> {
        self.graph.iter().filter_map(|edge| {
            Some(RelationshipView {
                source: self.store.name_of(edge.source())?,
                destination: self.store.name_of(edge.destination())?,
                kind: edge.kind(),
            })
        })
    }

    /// Returns the relationship from `source` to `destination`, if any.
    pub fn relationship(&self, source: &str, destination: &str) -> Option<RelationshipView<'_>> {
        let source_id = self.store.id_of(source)?;
        let destination_id = self.store.id_of(destination)?;
        let edge = self.graph.find(source_id, destination_id)?;
        Some(RelationshipView {
            source: self.store.name_of(source_id)?,
            destination: self.store.name_of(destination_id)?,
            kind: edge.kind(),
        })
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// Adds an empty class.
    ///
    /// # Errors
    ///
    /// Fails with `Conflict` if the name is taken, `InvalidInput` if blank.
    pub fn add_class(&mut self, name: &str) -> ModelResult<()> {
        checked(|| {
            require_name(EntityKind::Class, name)?;
            self.validator().require_no_class(name)
        })?;

        let id = self.store.add_class(name)?;
        info!(class = name, id:% = id; "Class added");
        Ok(())
    }

    /// Deletes a class, its members, and every relationship touching it.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if the class does not exist.
    pub fn delete_class(&mut self, name: &str) -> ModelResult<()> {
        let id = checked(|| {
            self.validator().require_class(name)?;
            self.store
                .id_of(name)
                .ok_or_else(|| ModelError::not_found(EntityKind::Class, name))
        })?;

        // Relationships go first so none is ever left pointing at a dead id.
        let purged = self.graph.purge_references_to(id);
        let (_, class) = self.store.remove_class(name)?;
        info!(
            class = name,
            fields = class.fields().len(),
            methods = class.methods().len(),
            relationships = purged;
            "Class deleted"
        );
        Ok(())
    }

    /// Renames a class; its members, list position and relationships follow.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if `old` is missing, `Conflict` if `new` is
    /// taken, `InvalidInput` if `new` is blank.
    pub fn rename_class(&mut self, old: &str, new: &str) -> ModelResult<()> {
        checked(|| {
            require_name(EntityKind::Class, new)?;
            let validator = self.validator();
            validator.require_class(old)?;
            validator.require_no_class(new)
        })?;

        // Relationships hold class ids, so re-keying the name index is the
        // whole of the reference rewrite.
        let id = self.store.rename_class(old, new)?;
        info!(
            old,
            new,
            relationships = self.graph.references_to(id).count();
            "Class renamed"
        );
        Ok(())
    }

    /// Reorders the class list by name.
    pub fn sort_classes(&mut self) {
        self.store.sort_by_name();
        debug!(classes = self.store.len(); "Class list sorted");
    }

    /// Drops every class and relationship.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.store.clear();
        info!("Diagram cleared");
    }

    // =========================================================================
    // Fields
    // =========================================================================

    /// Appends a field to a class.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` for a missing class, `Conflict` for a taken
    /// field name, `InvalidInput` for a blank name.
    pub fn add_field(&mut self, class: &str, field: &str, field_type: &str) -> ModelResult<()> {
        checked(|| {
            require_name(EntityKind::Field, field)?;
            self.validator().require_no_field(class, field)
        })?;

        self.store.require_class_mut(class)?.add_field(field, field_type)?;
        debug!(class, field, field_type; "Field added");
        Ok(())
    }

    /// Removes a field from a class.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` for a missing class or field.
    pub fn delete_field(&mut self, class: &str, field: &str) -> ModelResult<()> {
        checked(|| self.validator().require_field(class, field))?;

        self.store.require_class_mut(class)?.remove_field(field)?;
        debug!(class, field; "Field deleted");
        Ok(())
    }

    /// Renames a field in place.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` for a missing class or field, `Conflict` if the
    /// new name is taken, `InvalidInput` if it is blank.
    pub fn rename_field(&mut self, class: &str, old: &str, new: &str) -> ModelResult<()> {
        checked(|| {
            require_name(EntityKind::Field, new)?;
            let validator = self.validator();
            validator.require_field(class, old)?;
            validator.require_no_field(class, new)
        })?;

        self.store.require_class_mut(class)?.rename_field(old, new)?;
        debug!(class, old, new; "Field renamed");
        Ok(())
    }

    /// Changes a field's type tag.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` for a missing class or field.
    pub fn change_field_type(
        &mut self,
        class: &str,
        field: &str,
        field_type: &str,
    ) -> ModelResult<()> {
        checked(|| self.validator().require_field(class, field))?;

        self.store
            .require_class_mut(class)?
            .change_field_type(field, field_type)?;
        debug!(class, field, field_type; "Field type changed");
        Ok(())
    }

    // =========================================================================
    // Methods
    // =========================================================================

    /// Appends a method with no parameters.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` for a missing class, `Conflict` for a taken
    /// method name (parameters are not part of a method's identity),
    /// `InvalidInput` for a blank name.
    pub fn add_method(&mut self, class: &str, method: &str) -> ModelResult<()> {
        checked(|| {
            require_name(EntityKind::Method, method)?;
            self.validator().require_no_method(class, method)
        })?;

        self.store.require_class_mut(class)?.add_method(method)?;
        debug!(class, method; "Method added");
        Ok(())
    }

    /// Removes a method and all of its parameters.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` for a missing class or method.
    pub fn delete_method(&mut self, class: &str, method: &str) -> ModelResult<()> {
        checked(|| self.validator().require_method(class, method))?;

        let removed = self.store.require_class_mut(class)?.remove_method(method)?;
        debug!(class, method, parameters = removed.parameters().len(); "Method deleted");
        Ok(())
    }

    /// Renames a method, keeping its parameters and position.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` for a missing class or method, `Conflict` if the
    /// new name is taken, `InvalidInput` if it is blank.
    pub fn rename_method(&mut self, class: &str, old: &str, new: &str) -> ModelResult<()> {
        checked(|| {
            require_name(EntityKind::Method, new)?;
            let validator = self.validator();
            validator.require_method(class, old)?;
            validator.require_no_method(class, new)
        })?;

        self.store.require_class_mut(class)?.rename_method(old, new)?;
        debug!(class, old, new; "Method renamed");
        Ok(())
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Appends a parameter to a method.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` for a missing class or method, `Conflict` for a
    /// taken parameter name, `InvalidInput` for a blank name.
    pub fn add_parameter(&mut self, class: &str, method: &str, parameter: &str) -> ModelResult<()> {
        checked(|| {
            require_name(EntityKind::Parameter, parameter)?;
            self.validator().require_no_parameter(class, method, parameter)
        })?;

        self.method_mut(class, method)?.add_parameter(parameter)?;
        debug!(class, method, parameter; "Parameter added");
        Ok(())
    }

    /// Removes a parameter from a method.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` for a missing class, method or parameter.
    pub fn delete_parameter(
        &mut self,
        class: &str,
        method: &str,
        parameter: &str,
    ) -> ModelResult<()> {
        checked(|| self.validator().require_parameter(class, method, parameter))?;

        self.method_mut(class, method)?.remove_parameter(parameter)?;
        debug!(class, method, parameter; "Parameter deleted");
        Ok(())
    }

    /// Renames a parameter in place.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` for a missing class, method or parameter,
    /// `Conflict` if the new name is taken, `InvalidInput` if it is blank.
    pub fn rename_parameter(
        &mut self,
        class: &str,
        method: &str,
        old: &str,
        new: &str,
    ) -> ModelResult<()> {
        checked(|| {
            require_name(EntityKind::Parameter, new)?;
            let validator = self.validator();
            validator.require_parameter(class, method, old)?;
            validator.require_no_parameter(class, method, new)
        })?;

        self.method_mut(class, method)?.rename_parameter(old, new)?;
        debug!(class, method, old, new; "Parameter renamed");
        Ok(())
    }

    /// Replaces a method's whole parameter list with `names`, in order.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` for a missing class or method, `InvalidInput`
    /// if `names` repeats a name or contains a blank one. A failed call
    /// leaves the current list unchanged.
    pub fn replace_parameters<S>(
        &mut self,
        class: &str,
        method: &str,
        names: &[S],
    ) -> ModelResult<()>
    where
        S: AsRef<str>,
    {
        let names: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
        checked(|| {
            self.validator().require_method(class, method)?;
            for name in &names {
                require_name(EntityKind::Parameter, name)?;
            }
            match first_duplicate(names.iter().copied()) {
                Some(duplicate) => Err(ModelError::invalid_input(format!(
                    "duplicate parameter '{duplicate}' in replacement list"
                ))),
                None => Ok(()),
            }
        })?;

        self.method_mut(class, method)?
            .replace_parameters(names.iter().copied())?;
        debug!(class, method, parameters = names.len(); "Parameter list replaced");
        Ok(())
    }

    // =========================================================================
    // Relationships
    // =========================================================================

    /// Adds a relationship from `source` to `destination`.
    ///
    /// Self-relationships are allowed.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if either class is missing, `Conflict` if the
    /// ordered pair already has a relationship.
    pub fn add_relationship(
        &mut self,
        source: &str,
        destination: &str,
        kind: RelationshipKind,
    ) -> ModelResult<()> {
        let (source_id, destination_id) = checked(|| {
            self.validator().require_no_relationship(source, destination)?;
            self.endpoint_ids(source, destination)
        })?;

        self.graph.add(&self.store, source_id, destination_id, kind)?;
        info!(source, destination, kind:% = kind; "Relationship added");
        Ok(())
    }

    /// Deletes the relationship from `source` to `destination`.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if either class or the relationship is missing.
    pub fn delete_relationship(&mut self, source: &str, destination: &str) -> ModelResult<()> {
        let (source_id, destination_id) = checked(|| {
            self.validator().require_relationship(source, destination)?;
            self.endpoint_ids(source, destination)
        })?;

        self.graph.remove(source_id, destination_id)?;
        info!(source, destination; "Relationship deleted");
        Ok(())
    }

    /// Changes the kind of the relationship from `source` to `destination`.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if either class or the relationship is missing.
    pub fn change_relationship_kind(
        &mut self,
        source: &str,
        destination: &str,
        kind: RelationshipKind,
    ) -> ModelResult<()> {
        let (source_id, destination_id) = checked(|| {
            self.validator().require_relationship(source, destination)?;
            self.endpoint_ids(source, destination)
        })?;

        self.graph.change_kind(source_id, destination_id, kind)?;
        info!(source, destination, kind:% = kind; "Relationship type changed");
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn method_mut(&mut self, class: &str, method: &str) -> ModelResult<&mut Method> {
        self.store.require_class_mut(class)?.require_method_mut(method)
    }

    fn endpoint_ids(&self, source: &str, destination: &str) -> ModelResult<(ClassId, ClassId)> {
        let lookup = |name: &str| {
            self.store
                .id_of(name)
                .ok_or_else(|| ModelError::not_found(EntityKind::Class, name))
        };
        Ok((lookup(source)?, lookup(destination)?))
    }
}

/// Runs a precondition block, logging the rejection if it fails.
fn checked<T>(precondition: impl FnOnce() -> ModelResult<T>) -> ModelResult<T> {
    precondition().inspect_err(|err| debug!(reason:% = err; "Rejected diagram mutation"))
}

fn require_name(kind: EntityKind, name: &str) -> ModelResult<()> {
    if name.trim().is_empty() {
        return Err(ModelError::invalid_input(format!("{kind} name must not be empty")));
    }
    Ok(())
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    #[derive(Debug, Clone)]
    enum Op {
        AddClass(&'static str),
        DeleteClass(&'static str),
        RenameClass(&'static str, &'static str),
        AddRelationship(&'static str, &'static str, RelationshipKind),
        DeleteRelationship(&'static str, &'static str),
        AddField(&'static str, &'static str),
        AddMethod(&'static str, &'static str),
    }

    fn name_strategy() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["A", "B", "C", "D"])
    }

    fn member_strategy() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["x", "y"])
    }

    fn kind_strategy() -> impl Strategy<Value = RelationshipKind> {
        prop::sample::select(RelationshipKind::ALL.to_vec())
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => name_strategy().prop_map(Op::AddClass),
            1 => name_strategy().prop_map(Op::DeleteClass),
            1 => (name_strategy(), name_strategy()).prop_map(|(a, b)| Op::RenameClass(a, b)),
            3 => (name_strategy(), name_strategy(), kind_strategy())
                .prop_map(|(a, b, kind)| Op::AddRelationship(a, b, kind)),
            1 => (name_strategy(), name_strategy()).prop_map(|(a, b)| Op::DeleteRelationship(a, b)),
            1 => (name_strategy(), member_strategy()).prop_map(|(a, f)| Op::AddField(a, f)),
            1 => (name_strategy(), member_strategy()).prop_map(|(a, m)| Op::AddMethod(a, m)),
        ]
    }

    fn apply(manager: &mut DiagramManager, op: &Op) -> ModelResult<()> {
        match *op {
            Op::AddClass(name) => manager.add_class(name),
            Op::DeleteClass(name) => manager.delete_class(name),
            Op::RenameClass(old, new) => manager.rename_class(old, new),
            Op::AddRelationship(source, destination, kind) => {
                manager.add_relationship(source, destination, kind)
            }
            Op::DeleteRelationship(source, destination) => {
                manager.delete_relationship(source, destination)
            }
            Op::AddField(class, field) => manager.add_field(class, field, "int"),
            Op::AddMethod(class, method) => manager.add_method(class, method),
        }
    }

    // ===================
    // Property Test Functions
    // ===================

    /// After any sequence of operations, every relationship joins two live
    /// classes, no ordered pair repeats, and class names are unique.
    fn check_integrity_holds(ops: &[Op]) -> Result<(), TestCaseError> {
        let mut manager = DiagramManager::new();
        for op in ops {
            let _ = apply(&mut manager, op);
        }

        let names: Vec<&str> = manager.classes().map(Class::name).collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        prop_assert_eq!(names.len(), unique.len());

        prop_assert_eq!(manager.relationships().count(), manager.graph().len());
        let mut pairs = HashSet::new();
        for rel in manager.relationships() {
            prop_assert!(manager.validator().class_exists(rel.source));
            prop_assert!(manager.validator().class_exists(rel.destination));
            prop_assert!(pairs.insert((rel.source, rel.destination)));
        }
        Ok(())
    }

    /// A rejected operation leaves the diagram exactly as it was.
    fn check_failure_changes_nothing(ops: &[Op], last: &Op) -> Result<(), TestCaseError> {
        let mut manager = DiagramManager::new();
        for op in ops {
            let _ = apply(&mut manager, op);
        }

        let before = manager.clone();
        if apply(&mut manager, last).is_err() {
            let classes_before: Vec<&Class> = before.classes().collect();
            let classes_after: Vec<&Class> = manager.classes().collect();
            prop_assert_eq!(classes_before, classes_after);

            let rels_before: Vec<_> = before.relationships().collect();
            let rels_after: Vec<_> = manager.relationships().collect();
            prop_assert_eq!(rels_before, rels_after);
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn integrity_holds(ops in prop::collection::vec(op_strategy(), 0..40)) {
            check_integrity_holds(&ops)?;
        }

        #[test]
        fn failure_changes_nothing(
            ops in prop::collection::vec(op_strategy(), 0..30),
            last in op_strategy(),
        ) {
            check_failure_changes_nothing(&ops, &last)?;
        }
    }
}

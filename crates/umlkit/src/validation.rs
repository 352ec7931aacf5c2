//! Existence and collision queries over a diagram.
//!
//! [`Validator`] is a read-only view over the class store and relationship
//! graph. The manager uses its `require_*` helpers as preconditions before
//! every mutation; front ends can use the plain `*_exists` queries and
//! [`Validator::validate`] to decide what to offer the user.

use umlkit_core::{
    error::{EntityKind, ModelError, ModelResult},
    model::Class,
};

use crate::{graph::RelationshipGraph, store::EntityStore};

/// A compound existence check.
///
/// Each entry names an entity and whether it is expected to exist. Field
/// and method entries are looked up in the class entry's class; the
/// parameter entry is looked up in the method entry's method. An entry whose
/// container is not named (or does not exist) counts as absent.
///
/// # Examples
///
/// ```
/// use umlkit::{Criteria, DiagramManager};
///
/// let mut manager = DiagramManager::new();
/// manager.add_class("Dog").unwrap();
///
/// // "class Dog exists AND field name does not"
/// let criteria = Criteria::new().class("Dog", true).field("name", false);
/// assert!(manager.validator().validate(&criteria));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    class: Option<(String, bool)>,
    field: Option<(String, bool)>,
    method: Option<(String, bool)>,
    parameter: Option<(String, bool)>,
}

impl Criteria {
    /// Creates an empty criteria set, which always passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects the class `name` to exist (or not).
    pub fn class(mut self, name: impl Into<String>, should_exist: bool) -> Self {
        self.class = Some((name.into(), should_exist));
        self
    }

    /// Expects the field `name` to exist (or not) in the class entry.
    pub fn field(mut self, name: impl Into<String>, should_exist: bool) -> Self {
        self.field = Some((name.into(), should_exist));
        self
    }

    /// Expects the method `name` to exist (or not) in the class entry.
    pub fn method(mut self, name: impl Into<String>, should_exist: bool) -> Self {
        self.method = Some((name.into(), should_exist));
        self
    }

    /// Expects the parameter `name` to exist (or not) in the method entry.
    pub fn parameter(mut self, name: impl Into<String>, should_exist: bool) -> Self {
        self.parameter = Some((name.into(), should_exist));
        self
    }
}

/// Read-only queries over a diagram's classes and relationships.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    store: &'a EntityStore,
    graph: &'a RelationshipGraph,
}

impl<'a> Validator<'a> {
    /// Creates a validator over the given store and graph.
    pub fn new(store: &'a EntityStore, graph: &'a RelationshipGraph) -> Self {
        Self { store, graph }
    }

    /// Returns `true` if a class named `class` exists.
    pub fn class_exists(&self, class: &str) -> bool {
        self.store.contains(class)
    }

    /// Returns `true` if `class` exists and has a field named `field`.
    pub fn field_exists(&self, class: &str, field: &str) -> bool {
        self.store
            .class(class)
            .is_some_and(|class| class.has_field(field))
    }

    /// Returns `true` if `class` exists and has a method named `method`.
    pub fn method_exists(&self, class: &str, method: &str) -> bool {
        self.store
            .class(class)
            .is_some_and(|class| class.has_method(method))
    }

    /// Returns `true` if `class.method` exists and takes `parameter`.
    pub fn parameter_exists(&self, class: &str, method: &str, parameter: &str) -> bool {
        self.store
            .class(class)
            .and_then(|class| class.method(method))
            .is_some_and(|method| method.has_parameter(parameter))
    }

    /// Returns `true` if a relationship exists from `source` to `destination`.
    pub fn relationship_exists(&self, source: &str, destination: &str) -> bool {
        match (self.store.id_of(source), self.store.id_of(destination)) {
            (Some(source), Some(destination)) => self.graph.contains(source, destination),
            _ => false,
        }
    }

    /// Checks every entry of `criteria`; passes only if all hold.
    pub fn validate(&self, criteria: &Criteria) -> bool {
        let class = criteria.class.as_ref().map(|(name, _)| name.as_str());
        let method = criteria.method.as_ref().map(|(name, _)| name.as_str());

        let class_ok = criteria
            .class
            .as_ref()
            .is_none_or(|(name, expected)| self.class_exists(name) == *expected);

        let field_ok = criteria.field.as_ref().is_none_or(|(name, expected)| {
            let exists = class.is_some_and(|class| self.field_exists(class, name));
            exists == *expected
        });

        let method_ok = criteria.method.as_ref().is_none_or(|(name, expected)| {
            let exists = class.is_some_and(|class| self.method_exists(class, name));
            exists == *expected
        });

        let parameter_ok = criteria.parameter.as_ref().is_none_or(|(name, expected)| {
            let exists = match (class, method) {
                (Some(class), Some(method)) => self.parameter_exists(class, method, name),
                _ => false,
            };
            exists == *expected
        });

        class_ok && field_ok && method_ok && parameter_ok
    }

    // =========================================================================
    // Preconditions
    // =========================================================================

    /// Returns the class, or a not-found error.
    pub fn require_class(&self, class: &str) -> ModelResult<&'a Class> {
        self.store
            .class(class)
            .ok_or_else(|| ModelError::not_found(EntityKind::Class, class))
    }

    /// Fails with a conflict if the class exists.
    pub fn require_no_class(&self, class: &str) -> ModelResult<()> {
        if self.class_exists(class) {
            return Err(ModelError::conflict(EntityKind::Class, class));
        }
        Ok(())
    }

    /// Fails unless the class exists and has the field.
    pub fn require_field(&self, class: &str, field: &str) -> ModelResult<()> {
        if !self.require_class(class)?.has_field(field) {
            return Err(ModelError::not_found(EntityKind::Field, field));
        }
        Ok(())
    }

    /// Fails unless the class exists and does not have the field.
    pub fn require_no_field(&self, class: &str, field: &str) -> ModelResult<()> {
        if self.require_class(class)?.has_field(field) {
            return Err(ModelError::conflict(EntityKind::Field, field));
        }
        Ok(())
    }

    /// Fails unless the class exists and has the method.
    pub fn require_method(&self, class: &str, method: &str) -> ModelResult<()> {
        if !self.require_class(class)?.has_method(method) {
            return Err(ModelError::not_found(EntityKind::Method, method));
        }
        Ok(())
    }

    /// Fails unless the class exists and does not have the method.
    pub fn require_no_method(&self, class: &str, method: &str) -> ModelResult<()> {
        if self.require_class(class)?.has_method(method) {
            return Err(ModelError::conflict(EntityKind::Method, method));
        }
        Ok(())
    }

    /// Fails unless the class and method exist and the method has the parameter.
    pub fn require_parameter(&self, class: &str, method: &str, parameter: &str) -> ModelResult<()> {
        self.require_method(class, method)?;
        if !self.parameter_exists(class, method, parameter) {
            return Err(ModelError::not_found(EntityKind::Parameter, parameter));
        }
        Ok(())
    }

    /// Fails unless the class and method exist and the parameter name is free.
    pub fn require_no_parameter(
        &self,
        class: &str,
        method: &str,
        parameter: &str,
    ) -> ModelResult<()> {
        self.require_method(class, method)?;
        if self.parameter_exists(class, method, parameter) {
            return Err(ModelError::conflict(EntityKind::Parameter, parameter));
        }
        Ok(())
    }

    /// Fails unless both classes exist and a relationship joins them.
    pub fn require_relationship(&self, source: &str, destination: &str) -> ModelResult<()> {
        self.require_class(source)?;
        self.require_class(destination)?;
        if !self.relationship_exists(source, destination) {
            return Err(ModelError::not_found(
                EntityKind::Relationship,
                format!("{source} -> {destination}"),
            ));
        }
        Ok(())
    }

    /// Fails unless both classes exist and no relationship joins them yet.
    pub fn require_no_relationship(&self, source: &str, destination: &str) -> ModelResult<()> {
        self.require_class(source)?;
        self.require_class(destination)?;
        if self.relationship_exists(source, destination) {
            return Err(ModelError::conflict(
                EntityKind::Relationship,
                format!("{source} -> {destination}"),
            ));
        }
        Ok(())
    }
}

//! The class record and its member containers.

use std::fmt;

use indexmap::IndexMap;

use crate::{
    error::{EntityKind, ModelError, ModelResult},
    model::member::{Field, Method},
    ordered::rekey,
};

/// A class in the diagram.
///
/// Fields and methods are kept in insertion order, and renaming one keeps it
/// where it was. Names are unique per container: a field and a method may
/// share a name, two fields may not.
///
/// # Examples
///
/// ```
/// use umlkit_core::model::Class;
///
/// let mut class = Class::new("Dog");
/// class.add_field("name", "String").unwrap();
/// class.add_method("bark").unwrap();
///
/// assert!(class.has_field("name"));
/// assert!(class.add_method("bark").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    name: String,
    fields: IndexMap<String, Field>,
    methods: IndexMap<String, Method>,
}

impl Class {
    /// Create a new, empty Class.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            methods: IndexMap::new(),
        }
    }

    /// Get the class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the class name.
    ///
    /// Class names are unique per diagram; only the owning store should call
    /// this, after it has checked the new name is free.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // =========================================================================
    // Fields
    // =========================================================================

    /// Iterate over fields in insertion order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &Field> {
        self.fields.values()
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Returns `true` if the class has a field with this name.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Append a field.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Conflict`] if the field name is taken.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        field_type: impl Into<String>,
    ) -> ModelResult<()> {
        let name = name.into();
        if self.has_field(&name) {
            return Err(ModelError::conflict(EntityKind::Field, name));
        }
        self.fields.insert(name.clone(), Field::new(name, field_type));
        Ok(())
    }

    /// Remove a field and return it, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if the field does not exist.
    pub fn remove_field(&mut self, name: &str) -> ModelResult<Field> {
        self.fields
            .shift_remove(name)
            .ok_or_else(|| ModelError::not_found(EntityKind::Field, name))
    }

    /// Rename a field in place.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if `old` does not exist and
    /// [`ModelError::Conflict`] if `new` is already taken.
    pub fn rename_field(&mut self, old: &str, new: impl Into<String>) -> ModelResult<()> {
        let new = new.into();
        if !self.has_field(old) {
            return Err(ModelError::not_found(EntityKind::Field, old));
        }
        if self.has_field(&new) {
            return Err(ModelError::conflict(EntityKind::Field, new));
        }
        if let Some(field) = rekey(&mut self.fields, old, new.clone()) {
            field.set_name(new);
        }
        Ok(())
    }

    /// Change the type tag of a field.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if the field does not exist.
    pub fn change_field_type(
        &mut self,
        name: &str,
        field_type: impl Into<String>,
    ) -> ModelResult<()> {
        let field = self
            .fields
            .get_mut(name)
            .ok_or_else(|| ModelError::not_found(EntityKind::Field, name))?;
        field.set_field_type(field_type);
        Ok(())
    }

    // =========================================================================
    // Methods
    // =========================================================================

    /// Iterate over methods in insertion order.
    pub fn methods(&self) -> impl ExactSizeIterator<Item = &Method> {
        self.methods.values()
    }

    /// Look up a method by name.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    /// Look up a method by name for mutation of its parameter list.
    pub fn method_mut(&mut self, name: &str) -> Option<&mut Method> {
        self.methods.get_mut(name)
    }

    /// Returns `true` if the class has a method with this name.
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Append a method with no parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Conflict`] if the method name is taken.
    pub fn add_method(&mut self, name: impl Into<String>) -> ModelResult<()> {
        let name = name.into();
        if self.has_method(&name) {
            return Err(ModelError::conflict(EntityKind::Method, name));
        }
        self.methods.insert(name.clone(), Method::new(name));
        Ok(())
    }

    /// Remove a method, together with all of its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if the method does not exist.
    pub fn remove_method(&mut self, name: &str) -> ModelResult<Method> {
        self.methods
            .shift_remove(name)
            .ok_or_else(|| ModelError::not_found(EntityKind::Method, name))
    }

    /// Rename a method in place, keeping its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if `old` does not exist and
    /// [`ModelError::Conflict`] if `new` is already taken.
    pub fn rename_method(&mut self, old: &str, new: impl Into<String>) -> ModelResult<()> {
        let new = new.into();
        if !self.has_method(old) {
            return Err(ModelError::not_found(EntityKind::Method, old));
        }
        if self.has_method(&new) {
            return Err(ModelError::conflict(EntityKind::Method, new));
        }
        if let Some(method) = rekey(&mut self.methods, old, new.clone()) {
            method.set_name(new);
        }
        Ok(())
    }

    /// Get a method for mutation, or a not-found error.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if the method does not exist.
    pub fn require_method_mut(&mut self, name: &str) -> ModelResult<&mut Method> {
        self.methods
            .get_mut(name)
            .ok_or_else(|| ModelError::not_found(EntityKind::Method, name))
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

//! Field, parameter and method records.

use std::fmt;

use log::debug;

use crate::{
    error::{EntityKind, ModelError, ModelResult},
    ordered::first_duplicate,
};

/// A typed attribute of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    field_type: String,
}

impl Field {
    /// Create a new Field.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }

    /// Get the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the field's type tag.
    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn set_field_type(&mut self, field_type: impl Into<String>) {
        self.field_type = field_type.into();
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field_type.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.field_type, self.name)
        }
    }
}

/// A named parameter of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
}

impl Parameter {
    /// Create a new Parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Get the parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A method of a class with its ordered parameter list.
///
/// Parameter names are unique within one method. Methods are identified by
/// name alone; two methods with the same name and different parameters are
/// the same method as far as uniqueness goes.
///
/// # Examples
///
/// ```
/// use umlkit_core::model::Method;
///
/// let mut method = Method::new("move_to");
/// method.add_parameter("x").unwrap();
/// method.add_parameter("y").unwrap();
///
/// assert!(method.add_parameter("x").is_err());
/// assert_eq!(method.parameter_names().collect::<Vec<_>>(), ["x", "y"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    name: String,
    parameters: Vec<Parameter>,
}

impl Method {
    /// Create a new Method with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Get the method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Borrow the parameters in declaration order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Iterate over the parameter names in declaration order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(Parameter::name)
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|param| param.name == name)
    }

    /// Returns `true` if the method has a parameter with this name.
    pub fn has_parameter(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Append a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Conflict`] if the name is already used.
    pub fn add_parameter(&mut self, name: impl Into<String>) -> ModelResult<()> {
        let name = name.into();
        if self.has_parameter(&name) {
            return Err(ModelError::conflict(EntityKind::Parameter, name));
        }
        self.parameters.push(Parameter::new(name));
        Ok(())
    }

    /// Remove a parameter and return it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if no parameter has this name.
    pub fn remove_parameter(&mut self, name: &str) -> ModelResult<Parameter> {
        let position = self
            .position(name)
            .ok_or_else(|| ModelError::not_found(EntityKind::Parameter, name))?;
        Ok(self.parameters.remove(position))
    }

    /// Rename a parameter in place.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if `old` does not exist and
    /// [`ModelError::Conflict`] if `new` is already taken.
    pub fn rename_parameter(&mut self, old: &str, new: impl Into<String>) -> ModelResult<()> {
        let new = new.into();
        let position = self
            .position(old)
            .ok_or_else(|| ModelError::not_found(EntityKind::Parameter, old))?;
        if self.has_parameter(&new) {
            return Err(ModelError::conflict(EntityKind::Parameter, new));
        }
        self.parameters[position].name = new;
        Ok(())
    }

    /// Replace the whole parameter list.
    ///
    /// The new names are checked before anything is touched, so a rejected
    /// call leaves the current list as it was.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidInput`] if `names` contains a duplicate.
    pub fn replace_parameters<I, S>(&mut self, names: I) -> ModelResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if let Some(duplicate) = first_duplicate(names.iter().map(String::as_str)) {
            debug!(method = self.name, duplicate; "Rejected parameter list with duplicate");
            return Err(ModelError::invalid_input(format!(
                "duplicate parameter '{duplicate}' in replacement list"
            )));
        }
        self.parameters = names.into_iter().map(Parameter::new).collect();
        Ok(())
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|param| param.name == name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (idx, param) in self.parameters.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}

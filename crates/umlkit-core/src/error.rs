//! Failure taxonomy for diagram mutations.
//!
//! Every mutating operation either succeeds completely or fails with a
//! [`ModelError`] and leaves the model untouched. The three variants map to
//! the three ways a request can be wrong: it names something missing, it
//! collides with something present, or its arguments are malformed.

use std::fmt;

use thiserror::Error;

/// The kind of entity a [`ModelError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Class,
    Field,
    Method,
    Parameter,
    Relationship,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Class => "class",
            EntityKind::Field => "field",
            EntityKind::Method => "method",
            EntityKind::Parameter => "parameter",
            EntityKind::Relationship => "relationship",
        };
        f.write_str(name)
    }
}

/// Reason a model operation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The referenced entity does not exist.
    #[error("{kind} '{name}' does not exist")]
    NotFound { kind: EntityKind, name: String },

    /// An entity with this name (or a relationship for this ordered pair)
    /// already exists in the relevant scope.
    #[error("{kind} '{name}' already exists")]
    Conflict { kind: EntityKind, name: String },

    /// The request itself is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ModelError {
    /// Create a [`ModelError::NotFound`] for the given entity.
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Create a [`ModelError::Conflict`] for the given entity.
    pub fn conflict(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::Conflict {
            kind,
            name: name.into(),
        }
    }

    /// Create a [`ModelError::InvalidInput`] with the given message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Returns the entity kind this error is about, if any.
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            ModelError::NotFound { kind, .. } | ModelError::Conflict { kind, .. } => Some(*kind),
            ModelError::InvalidInput(_) => None,
        }
    }

    /// Returns `true` for [`ModelError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::NotFound { .. })
    }

    /// Returns `true` for [`ModelError::Conflict`].
    pub fn is_conflict(&self) -> bool {
        matches!(self, ModelError::Conflict { .. })
    }
}

/// Result alias used by all model operations.
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ModelError::not_found(EntityKind::Class, "Animal");
        assert_eq!(err.to_string(), "class 'Animal' does not exist");
        assert!(err.is_not_found());
        assert_eq!(err.kind(), Some(EntityKind::Class));
    }

    #[test]
    fn test_conflict_message() {
        let err = ModelError::conflict(EntityKind::Parameter, "x");
        assert_eq!(err.to_string(), "parameter 'x' already exists");
        assert!(err.is_conflict());
    }

    #[test]
    fn test_invalid_input_has_no_kind() {
        let err = ModelError::invalid_input("duplicate parameter 'x'");
        assert_eq!(err.kind(), None);
        assert_eq!(err.to_string(), "invalid input: duplicate parameter 'x'");
    }
}

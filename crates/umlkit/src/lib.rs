//! UMLKit - An in-memory UML class diagram model.
//!
//! A diagram is a list of classes (each with fields, methods and method
//! parameters) plus a list of typed relationships between classes.
//! [`DiagramManager`] is the single mutation entry point: every verb checks
//! its preconditions first, changes nothing on failure, and cascades renames
//! and deletions so relationships never point at a class that is gone.
//!
//! Diagrams are saved and loaded as JSON through the [`persistence`] module.
//!
//! # Examples
//!
//! ```
//! use umlkit::{DiagramManager, RelationshipKind, persistence};
//!
//! let mut manager = DiagramManager::new();
//! manager.add_class("Dog").unwrap();
//! manager.add_field("Dog", "name", "String").unwrap();
//! manager.add_method("Dog", "bark").unwrap();
//! manager.add_parameter("Dog", "bark", "times").unwrap();
//! manager.add_class("Animal").unwrap();
//! manager
//!     .add_relationship("Dog", "Animal", RelationshipKind::Inheritance)
//!     .unwrap();
//!
//! let json = persistence::to_json(&manager, false).unwrap();
//! let (loaded, report) = persistence::from_json(&json).unwrap();
//! assert!(report.is_clean());
//! assert!(loaded.validator().parameter_exists("Dog", "bark", "times"));
//! ```

pub mod config;
pub mod persistence;

mod error;
mod graph;
mod manager;
mod store;
mod validation;

pub use umlkit_core::{error as model_error, identifier, model};

pub use umlkit_core::{
    error::{EntityKind, ModelError, ModelResult},
    model::RelationshipKind,
};

pub use error::UmlError;
pub use graph::RelationshipGraph;
pub use manager::{DiagramManager, RelationshipView};
pub use store::EntityStore;
pub use validation::{Criteria, Validator};

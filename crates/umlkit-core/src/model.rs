//! Class diagram model types.
//!
//! These are the records that make up a diagram. Ownership follows the
//! diagram's containment: a [`Class`] owns its [`Field`]s and [`Method`]s, a
//! [`Method`] owns its [`Parameter`]s. A [`Relationship`] only refers to
//! classes by [`ClassId`](crate::identifier::ClassId) and owns nothing.
//!
//! # Organization
//!
//! - [`member`] - Leaf and method records: [`Field`], [`Parameter`], [`Method`]
//! - [`class`] - The [`Class`] container
//! - [`relationship`] - [`Relationship`] and [`RelationshipKind`]

pub mod class;
pub mod member;
pub mod relationship;

pub use class::*;
pub use member::*;
pub use relationship::*;

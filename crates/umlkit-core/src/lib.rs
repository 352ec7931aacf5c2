//! UMLKit Core Types and Definitions
//!
//! This crate provides the foundational types for UMLKit class diagrams.
//! It includes:
//!
//! - **Identifiers**: Stable arena indices for classes ([`identifier::ClassId`])
//! - **Model**: Class, field, method, parameter and relationship records ([`model`] module)
//! - **Ordering**: Helpers for insertion-ordered, name-keyed maps ([`ordered`] module)
//! - **Errors**: The failure taxonomy shared by every mutation ([`error`] module)

pub mod error;
pub mod identifier;
pub mod model;
pub mod ordered;

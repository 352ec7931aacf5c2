//! Error adapter for converting UmlError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use umlkit::{ModelError, UmlError};

/// Adapter giving a [`UmlError`] a stable diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a UmlError);

impl ErrorAdapter<'_> {
    /// The diagnostic code for the wrapped error.
    pub fn code_str(&self) -> &'static str {
        match self.0 {
            UmlError::Io(_) => "umlkit::io",
            UmlError::Json(_) => "umlkit::json",
            UmlError::Model(ModelError::NotFound { .. }) => "umlkit::model::not_found",
            UmlError::Model(ModelError::Conflict { .. }) => "umlkit::model::conflict",
            UmlError::Model(ModelError::InvalidInput(_)) => "umlkit::model::invalid_input",
            UmlError::Storage(_) => "umlkit::storage",
            UmlError::Config(_) => "umlkit::config",
        }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            UmlError::Json(_) => "the saved file is not a UMLKit diagram",
            UmlError::Model(ModelError::NotFound { .. }) => {
                "use 'list_class' or 'class_detail' to see what exists"
            }
            UmlError::Model(ModelError::InvalidInput(_)) => {
                "names must be non-empty and parameter lists free of duplicates; \
                 relationship types are Aggregation, Composition, Inheritance and Realization"
            }
            UmlError::Storage(_) => "use 'saved_list' to see saved files",
            UmlError::Config(_) => "check the TOML configuration file",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

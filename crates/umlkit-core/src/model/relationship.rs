//! Relationships between classes.

use std::{fmt, str::FromStr};

use crate::{error::ModelError, identifier::ClassId};

/// The closed set of relationship types a diagram supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    Aggregation,
    Composition,
    Inheritance,
    Realization,
}

impl RelationshipKind {
    /// All kinds, in display order.
    pub const ALL: [RelationshipKind; 4] = [
        RelationshipKind::Aggregation,
        RelationshipKind::Composition,
        RelationshipKind::Inheritance,
        RelationshipKind::Realization,
    ];

    /// The canonical name written to saved diagrams.
    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipKind::Aggregation => "Aggregation",
            RelationshipKind::Composition => "Composition",
            RelationshipKind::Inheritance => "Inheritance",
            RelationshipKind::Realization => "Realization",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipKind {
    type Err = ModelError;

    /// Parses a kind name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::invalid_input(format!("unknown relationship type '{s}'")))
    }
}

/// A directed, typed association between two classes.
///
/// Endpoints are class ids, not names: the relationship neither owns the
/// classes nor needs rewriting when they are renamed. Identity is the
/// ordered pair (source, destination); the kind can change in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    source: ClassId,
    destination: ClassId,
    kind: RelationshipKind,
}

impl Relationship {
    /// Create a new Relationship.
    pub fn new(source: ClassId, destination: ClassId, kind: RelationshipKind) -> Self {
        Self {
            source,
            destination,
            kind,
        }
    }

    /// Get the source class id.
    pub fn source(&self) -> ClassId {
        self.source
    }

    /// Get the destination class id.
    pub fn destination(&self) -> ClassId {
        self.destination
    }

    /// Get the relationship kind.
    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    /// Change the relationship kind.
    pub fn set_kind(&mut self, kind: RelationshipKind) {
        self.kind = kind;
    }

    /// Returns `true` if this relationship goes from `source` to `destination`.
    pub fn connects(&self, source: ClassId, destination: ClassId) -> bool {
        self.source == source && self.destination == destination
    }

    /// Returns `true` if `class` is either endpoint.
    pub fn touches(&self, class: ClassId) -> bool {
        self.source == class || self.destination == class
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str_ignores_case() {
        assert_eq!(
            "inheritance".parse::<RelationshipKind>().unwrap(),
            RelationshipKind::Inheritance
        );
        assert_eq!(
            "COMPOSITION".parse::<RelationshipKind>().unwrap(),
            RelationshipKind::Composition
        );
        assert_eq!(
            "Realization".parse::<RelationshipKind>().unwrap(),
            RelationshipKind::Realization
        );
    }

    #[test]
    fn test_kind_from_str_rejects_unknown() {
        let err = "Association".parse::<RelationshipKind>().unwrap_err();
        assert!(matches!(err, ModelError::InvalidInput(_)));
    }

    #[test]
    fn test_kind_display_is_canonical() {
        for kind in RelationshipKind::ALL {
            assert_eq!(kind.to_string().parse::<RelationshipKind>().unwrap(), kind);
        }
        assert_eq!(RelationshipKind::Aggregation.to_string(), "Aggregation");
    }

    #[test]
    fn test_connects_is_directed() {
        let a = ClassId::new(0);
        let b = ClassId::new(1);
        let rel = Relationship::new(a, b, RelationshipKind::Aggregation);

        assert!(rel.connects(a, b));
        assert!(!rel.connects(b, a));
        assert!(rel.touches(a));
        assert!(rel.touches(b));
        assert!(!rel.touches(ClassId::new(2)));
    }

    #[test]
    fn test_set_kind_keeps_endpoints() {
        let a = ClassId::new(0);
        let mut rel = Relationship::new(a, a, RelationshipKind::Aggregation);

        rel.set_kind(RelationshipKind::Composition);
        assert_eq!(rel.kind(), RelationshipKind::Composition);
        assert!(rel.connects(a, a));
    }
}

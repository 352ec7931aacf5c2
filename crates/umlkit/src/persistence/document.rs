//! The saved-diagram JSON document and its codec.
//!
//! The on-disk shape is fixed; existing saved diagrams must keep loading:
//!
//! ```json
//! {
//!   "classes": [
//!     { "name": "Dog",
//!       "fields": [ { "name": "age", "type": "int" } ],
//!       "methods": [ { "name": "bark", "parameters": [ { "name": "times" } ] } ] }
//!   ],
//!   "relationships": [
//!     { "source": "Dog", "destination": "Animal", "type": "Inheritance" }
//!   ]
//! }
//! ```
//!
//! Loading replays the same add operations an interactive user would issue,
//! so loaded data obeys the same uniqueness rules. A record that fails is
//! skipped and reported in a [`LoadReport`]; the rest of the document still
//! loads.

use std::fmt;

use log::{debug, trace, warn};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

use umlkit_core::{
    error::ModelError,
    model::{Class, Field, Method, RelationshipKind},
};

use crate::manager::DiagramManager;

/// A whole saved diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub classes: Vec<ClassRecord>,
    #[serde(default)]
    pub relationships: Vec<RelationshipRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldRecord>,
    #[serde(default)]
    pub methods: Vec<MethodRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRecord {
    pub name: String,
}

/// A relationship as saved. The type stays a string here so an unknown
/// value fails only this record, at replay time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub source: String,
    pub destination: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A record whose shape is checked on its own.
///
/// Any JSON value deserializes into a `Checked`; whether it matches `T` is
/// decided per record, so one bad entry never takes its siblings or its
/// container down with it.
#[derive(Debug, Clone)]
enum Checked<T> {
    Valid(T),
    Malformed(String),
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Checked<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match serde_json::from_value(value) {
            Ok(record) => Checked::Valid(record),
            Err(err) => Checked::Malformed(err.to_string()),
        })
    }
}

/// A document as read from disk, before any record has been replayed.
#[derive(Debug, Default, Deserialize)]
struct LenientDocument {
    #[serde(default)]
    classes: Vec<Checked<LenientClass>>,
    #[serde(default)]
    relationships: Vec<Checked<RelationshipRecord>>,
}

#[derive(Debug, Clone, Deserialize)]
struct LenientClass {
    name: String,
    #[serde(default)]
    fields: Vec<Checked<FieldRecord>>,
    #[serde(default)]
    methods: Vec<Checked<LenientMethod>>,
}

#[derive(Debug, Clone, Deserialize)]
struct LenientMethod {
    name: String,
    #[serde(default)]
    parameters: Vec<Checked<ParameterRecord>>,
}

impl From<&Document> for LenientDocument {
    fn from(document: &Document) -> Self {
        Self {
            classes: document
                .classes
                .iter()
                .map(|class| Checked::Valid(LenientClass::from(class)))
                .collect(),
            relationships: document
                .relationships
                .iter()
                .cloned()
                .map(Checked::Valid)
                .collect(),
        }
    }
}

impl From<&ClassRecord> for LenientClass {
    fn from(class: &ClassRecord) -> Self {
        Self {
            name: class.name.clone(),
            fields: class.fields.iter().cloned().map(Checked::Valid).collect(),
            methods: class
                .methods
                .iter()
                .map(|method| {
                    Checked::Valid(LenientMethod {
                        name: method.name.clone(),
                        parameters: method.parameters.iter().cloned().map(Checked::Valid).collect(),
                    })
                })
                .collect(),
        }
    }
}

impl From<&Class> for ClassRecord {
    fn from(class: &Class) -> Self {
        Self {
            name: class.name().to_string(),
            fields: class.fields().map(FieldRecord::from).collect(),
            methods: class.methods().map(MethodRecord::from).collect(),
        }
    }
}

impl From<&Field> for FieldRecord {
    fn from(field: &Field) -> Self {
        Self {
            name: field.name().to_string(),
            field_type: field.field_type().to_string(),
        }
    }
}

impl From<&Method> for MethodRecord {
    fn from(method: &Method) -> Self {
        Self {
            name: method.name().to_string(),
            parameters: method
                .parameter_names()
                .map(|name| ParameterRecord {
                    name: name.to_string(),
                })
                .collect(),
        }
    }
}

impl Document {
    /// Parses a document, requiring every record to be well formed.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for any syntax or shape problem.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Renders the document as JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Why a record was left out of a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The record did not have the expected shape.
    Malformed(String),
    /// The record was well formed but a model rule rejected it.
    Rejected(ModelError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Malformed(message) => write!(f, "malformed record: {message}"),
            SkipReason::Rejected(err) => write!(f, "{err}"),
        }
    }
}

/// One record that did not make it into a loaded diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    record: String,
    reason: SkipReason,
}

impl SkippedRecord {
    fn new(record: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            record: record.into(),
            reason,
        }
    }

    /// A short description of the record, e.g. `field Dog.age`.
    pub fn record(&self) -> &str {
        &self.record
    }

    /// Why the record was skipped.
    pub fn reason(&self) -> &SkipReason {
        &self.reason
    }
}

impl fmt::Display for SkippedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.record, self.reason)
    }
}

/// Records skipped while loading a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    skipped: Vec<SkippedRecord>,
}

impl LoadReport {
    /// Returns `true` if every record loaded.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// The skipped records, in document order.
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    fn skip(&mut self, record: impl Into<String>, reason: SkipReason) {
        let skipped = SkippedRecord::new(record, reason);
        warn!(
            record = skipped.record(),
            reason:% = skipped.reason();
            "Skipped record while loading"
        );
        self.skipped.push(skipped);
    }

    fn reject(&mut self, record: impl Into<String>, err: ModelError) {
        self.skip(record, SkipReason::Rejected(err));
    }

    fn malformed(&mut self, record: impl Into<String>, message: String) {
        self.skip(record, SkipReason::Malformed(message));
    }
}

/// Builds the document for a diagram.
///
/// Classes appear in list order, members in insertion order, and the
/// relationships follow in creation order.
pub fn serialize(manager: &DiagramManager) -> Document {
    let document = Document {
        classes: manager.classes().map(ClassRecord::from).collect(),
        relationships: manager
            .relationships()
            .map(|rel| RelationshipRecord {
                source: rel.source.to_string(),
                destination: rel.destination.to_string(),
                kind: rel.kind.to_string(),
            })
            .collect(),
    };
    trace!(document:?; "Serialized diagram");
    document
}

/// Rebuilds a diagram from a document.
///
/// Records are replayed in document order through the regular manager
/// operations. A class that is rejected is skipped together with all of its
/// members; any other rejected record is skipped on its own.
pub fn deserialize(document: &Document) -> (DiagramManager, LoadReport) {
    replay(LenientDocument::from(document))
}

/// Parses JSON text leniently and rebuilds the diagram it describes.
///
/// Each class, field, method, parameter and relationship is checked on its
/// own: a malformed one is skipped and reported, and everything around it
/// still loads.
///
/// # Errors
///
/// Returns the `serde_json` error only when the top level is unreadable;
/// record-level problems end up in the [`LoadReport`].
pub fn from_json(text: &str) -> serde_json::Result<(DiagramManager, LoadReport)> {
    let document: LenientDocument = serde_json::from_str(text)?;
    Ok(replay(document))
}

fn replay(document: LenientDocument) -> (DiagramManager, LoadReport) {
    let mut manager = DiagramManager::new();
    let mut report = LoadReport::default();

    for (idx, class) in document.classes.into_iter().enumerate() {
        let class = match class {
            Checked::Valid(class) => class,
            Checked::Malformed(message) => {
                report.malformed(format!("class #{idx}"), message);
                continue;
            }
        };
        if let Err(err) = manager.add_class(&class.name) {
            report.reject(format!("class {}", class.name), err);
            continue;
        }

        for (idx, field) in class.fields.into_iter().enumerate() {
            match field {
                Checked::Valid(field) => {
                    let result = manager.add_field(&class.name, &field.name, &field.field_type);
                    if let Err(err) = result {
                        report.reject(format!("field {}.{}", class.name, field.name), err);
                    }
                }
                Checked::Malformed(message) => {
                    report.malformed(format!("field {} #{idx}", class.name), message);
                }
            }
        }

        for (idx, method) in class.methods.into_iter().enumerate() {
            let method = match method {
                Checked::Valid(method) => method,
                Checked::Malformed(message) => {
                    report.malformed(format!("method {} #{idx}", class.name), message);
                    continue;
                }
            };
            if let Err(err) = manager.add_method(&class.name, &method.name) {
                report.reject(format!("method {}.{}", class.name, method.name), err);
                continue;
            }

            for (idx, param) in method.parameters.into_iter().enumerate() {
                match param {
                    Checked::Valid(param) => {
                        if let Err(err) =
                            manager.add_parameter(&class.name, &method.name, &param.name)
                        {
                            report.reject(
                                format!("parameter {}.{}({})", class.name, method.name, param.name),
                                err,
                            );
                        }
                    }
                    Checked::Malformed(message) => {
                        report.malformed(
                            format!("parameter {}.{} #{idx}", class.name, method.name),
                            message,
                        );
                    }
                }
            }
        }
    }

    for (idx, rel) in document.relationships.into_iter().enumerate() {
        let rel = match rel {
            Checked::Valid(rel) => rel,
            Checked::Malformed(message) => {
                report.malformed(format!("relationship #{idx}"), message);
                continue;
            }
        };
        let label = format!("relationship {} -> {}", rel.source, rel.destination);
        let result = rel
            .kind
            .parse::<RelationshipKind>()
            .and_then(|kind| manager.add_relationship(&rel.source, &rel.destination, kind));
        if let Err(err) = result {
            report.reject(label, err);
        }
    }

    debug!(
        classes = manager.store().len(),
        relationships = manager.graph().len(),
        skipped = report.skipped().len();
        "Deserialized diagram"
    );
    (manager, report)
}

/// Serializes a diagram straight to JSON text.
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub fn to_json(manager: &DiagramManager, pretty: bool) -> serde_json::Result<String> {
    serialize(manager).to_json(pretty)
}

//! Document model shared by the services and the store adapters.
//!
//! Documents are open JSON objects. The gateway never imposes a schema on
//! them; it only knows the handful of fields the update shapes touch
//! (`applicants`, `queries`, `messages`, and so on).
//!
//! Matching follows PostgreSQL `jsonb @>` containment so the in-memory store
//! and the Diesel store agree on which documents a [`Filter`] selects:
//!
//! - objects contain a pattern when every pattern key is present with a
//!   containing value;
//! - arrays contain a pattern array when each pattern element is contained by
//!   at least one element (element match, not array equality);
//! - scalars contain a scalar when they are equal.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::Error;

/// Field under which the generated identifier is rendered on reads.
pub const ID_FIELD: &str = "_id";

/// An open JSON object.
pub type Document = Map<String, Value>;

/// Native identifier of a stored document.
///
/// External callers supply identifiers as strings; [`DocumentId::parse`]
/// rejects anything that is not a UUID with
/// [`ErrorCode::InvalidIdentifier`](super::ErrorCode::InvalidIdentifier).
///
/// # Examples
/// ```
/// use jobbox::domain::DocumentId;
///
/// let id = DocumentId::parse("3FA85F64-5717-4562-B3FC-2C963F66AFA6").expect("valid id");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert!(DocumentId::parse("64b7f0c2e4").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an externally supplied identifier.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|err| Error::invalid_identifier(format!("invalid identifier {raw:?}: {err}")))
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Canonical string form as stored inside documents.
    #[must_use]
    pub fn to_value(self) -> Value {
        Value::String(self.0.to_string())
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logical collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Jobs,
    Chats,
}

impl Collection {
    /// Stable name persisted alongside each document.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Users => "user",
            Self::Jobs => "job",
            Self::Chats => "chat",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Selection predicate: optional id equality AND a containment pattern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    id: Option<DocumentId>,
    pattern: Document,
}

impl Filter {
    /// Matches every document.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn by_id(id: DocumentId) -> Self {
        Self {
            id: Some(id),
            pattern: Document::new(),
        }
    }

    /// Matches documents containing `pattern`.
    #[must_use]
    pub fn matching(pattern: Document) -> Self {
        Self { id: None, pattern }
    }

    /// Additionally require the document id to equal `id`.
    #[must_use]
    pub fn and_id(mut self, id: DocumentId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<DocumentId> {
        self.id
    }

    pub fn pattern(&self) -> &Document {
        &self.pattern
    }

    /// Evaluate the filter against a stored document.
    #[must_use]
    pub fn matches(&self, id: DocumentId, body: &Document) -> bool {
        self.id.is_none_or(|wanted| wanted == id) && object_contains(body, &self.pattern)
    }
}

/// Array mutation applied by `update_one`.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Append `value` to the top-level array `field`.
    Push { field: String, value: Value },
    /// Append `value` to `field` of every element of the top-level `array`
    /// that contains `element`.
    PushToMatchingElements {
        array: String,
        element: Document,
        field: String,
        value: Value,
    },
}

impl Update {
    /// Top-level field the update writes to.
    #[must_use]
    pub fn target_field(&self) -> &str {
        match self {
            Self::Push { field, .. } => field,
            Self::PushToMatchingElements { array, .. } => array,
        }
    }

    /// Whether `body` has the shape this update needs. A plain push accepts
    /// an absent, null or array field; an element push needs an array.
    #[must_use]
    pub fn applies_to(&self, body: &Document) -> bool {
        match (self, body.get(self.target_field())) {
            (_, Some(Value::Array(_))) => true,
            (Self::Push { .. }, None | Some(Value::Null)) => true,
            _ => false,
        }
    }

    /// Apply the update in place. Returns `false` without touching the
    /// document when [`Update::applies_to`] does not hold.
    pub fn apply(&self, body: &mut Document) -> bool {
        if !self.applies_to(body) {
            return false;
        }
        match self {
            Self::Push { field, value } => {
                push_into(body, field, value.clone());
            }
            Self::PushToMatchingElements {
                array,
                element,
                field,
                value,
            } => {
                let Some(Value::Array(items)) = body.get_mut(array) else {
                    return false;
                };
                let matching = items.iter_mut().filter_map(|item| match item {
                    Value::Object(entry) if object_contains(entry, element) => Some(entry),
                    _ => None,
                });
                for entry in matching {
                    push_into(entry, field, value.clone());
                }
            }
        }
        true
    }
}

/// Append following `jsonb ||`: a missing or null field starts a new array
/// and any other non-array value becomes the first element.
fn push_into(target: &mut Document, field: &str, value: Value) {
    let merged = match target.remove(field) {
        Some(Value::Array(mut items)) => {
            items.push(value);
            items
        }
        None | Some(Value::Null) => vec![value],
        Some(existing) => vec![existing, value],
    };
    target.insert(field.to_owned(), Value::Array(merged));
}

/// Which top-level fields a read returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    #[default]
    Full,
    Exclude(Vec<String>),
}

impl Projection {
    #[must_use]
    pub fn excluding(fields: &[&str]) -> Self {
        Self::Exclude(fields.iter().map(|field| (*field).to_owned()).collect())
    }

    /// Strip excluded fields from `body`.
    pub fn apply(&self, body: &mut Document) {
        if let Self::Exclude(fields) = self {
            for field in fields {
                body.remove(field);
            }
        }
    }
}

/// Result of `insert_one`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: DocumentId,
}

/// Result of `update_one`.
///
/// `acknowledged` is what the HTTP layer reports as success; the counts let
/// callers tell a write against zero documents from one that landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl WriteOutcome {
    /// Acknowledged write that touched `count` documents.
    #[must_use]
    pub const fn acknowledged(count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count: count,
            modified_count: count,
        }
    }
}

/// Render a stored document with its identifier under [`ID_FIELD`].
#[must_use]
pub fn with_id(id: DocumentId, mut body: Document) -> Document {
    body.insert(ID_FIELD.to_owned(), id.to_value());
    body
}

/// `jsonb @>` containment between two values.
#[must_use]
pub fn contains(haystack: &Value, needle: &Value) -> bool {
    match (haystack, needle) {
        (Value::Object(doc), Value::Object(pattern)) => object_contains(doc, pattern),
        (Value::Array(items), Value::Array(wanted)) => wanted
            .iter()
            .all(|want| items.iter().any(|item| contains(item, want))),
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => false,
        (scalar, expected) => scalar == expected,
    }
}

fn object_contains(doc: &Document, pattern: &Document) -> bool {
    pattern.iter().all(|(key, expected)| {
        doc.get(key)
            .is_some_and(|actual| contains(actual, expected))
    })
}

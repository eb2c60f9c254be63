//! Document, category and patch types.
//!
//! # Responsibility
//! - Define the render-ready `Document` and `Category` records.
//! - Define `DocumentPatch`, the typed partial override of a document.
//! - Define `NewDocument`, the add-request shape for user-created documents.
//!
//! # Invariants
//! - `DocumentPatch` carries no id, so patching cannot mutate identity.
//! - Unknown keys (including `id`) in persisted patches are ignored.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates an id for a user-created document.
    pub fn generate() -> Self {
        Self(format!("doc-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One piece of content as rendered by the docs pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    /// Markdown body.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub description: String,
}

impl Document {
    pub fn new(
        id: impl Into<DocumentId>,
        title: impl Into<String>,
        content: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            description: description.into(),
        }
    }

    /// Returns a copy with `patch` shallow-merged on top.
    pub fn patched(&self, patch: &DocumentPatch) -> Self {
        let mut document = self.clone();
        document.apply(patch);
        document
    }

    /// Overwrites every field present in `patch`. The id is left untouched.
    pub fn apply(&mut self, patch: &DocumentPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(content) = &patch.content {
            self.content.clone_from(content);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
    }
}

/// Partial document containing only the fields a user changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DocumentPatch {
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn content(value: impl Into<String>) -> Self {
        Self {
            content: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn description(value: impl Into<String>) -> Self {
        Self {
            description: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(value.into());
        self
    }

    pub fn with_content(mut self, value: impl Into<String>) -> Self {
        self.content = Some(value.into());
        self
    }

    pub fn with_description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.description.is_none()
    }

    /// Shallow merge: fields present in `newer` win.
    pub fn merge(&mut self, newer: &DocumentPatch) {
        if newer.title.is_some() {
            self.title.clone_from(&newer.title);
        }
        if newer.content.is_some() {
            self.content.clone_from(&newer.content);
        }
        if newer.description.is_some() {
            self.description.clone_from(&newer.description);
        }
    }
}

/// Add-request for a user-created document.
///
/// A missing id is generated on insert. A missing description is derived
/// from the markdown body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    #[serde(default)]
    pub id: Option<DocumentId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<DocumentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Named grouping of documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub items: Vec<Document>,
}

impl Category {
    pub fn new(name: impl Into<String>, items: Vec<Document>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    pub fn find(&self, id: &DocumentId) -> Option<&Document> {
        self.items.iter().find(|document| &document.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, DocumentId, DocumentPatch};

    #[test]
    fn apply_overwrites_only_present_fields() {
        let mut document = Document::new("e1", "Old", "x", "summary");
        document.apply(&DocumentPatch::title("New"));

        assert_eq!(document.id, DocumentId::new("e1"));
        assert_eq!(document.title, "New");
        assert_eq!(document.content, "x");
        assert_eq!(document.description, "summary");
    }

    #[test]
    fn merge_prefers_newer_fields_and_keeps_older_ones() {
        let mut patch = DocumentPatch::title("first").with_content("body");
        patch.merge(&DocumentPatch::title("second").with_description("desc"));

        assert_eq!(patch.title.as_deref(), Some("second"));
        assert_eq!(patch.content.as_deref(), Some("body"));
        assert_eq!(patch.description.as_deref(), Some("desc"));
    }

    #[test]
    fn patch_deserialization_ignores_id_key() {
        let patch: DocumentPatch =
            serde_json::from_str(r#"{"id":"hijack","title":"T"}"#).expect("patch should parse");
        let document = Document::new("e1", "Old", "x", "").patched(&patch);

        assert_eq!(document.id.as_str(), "e1");
        assert_eq!(document.title, "T");
    }

    #[test]
    fn generated_ids_are_prefixed_and_unique() {
        let first = DocumentId::generate();
        let second = DocumentId::generate();
        assert!(first.as_str().starts_with("doc-"));
        assert_ne!(first, second);
    }

    #[test]
    fn empty_patch_reports_empty() {
        assert!(DocumentPatch::default().is_empty());
        assert!(!DocumentPatch::content("x").is_empty());
    }
}

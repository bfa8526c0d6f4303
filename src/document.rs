//! Documents as consumed by the index builder.
//!
//! A document is an identifier plus an ordered list of optional field
//! values. Where the values come from (a CSV row, a database record, an API
//! response) is up to the caller; [`Document::from_record`] covers the
//! common case of a string map and a configured field list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Document identifier as it appears in postings and persisted files.
pub type DocId = String;

/// A document to be indexed.
///
/// # Examples
///
/// ```
/// use glaive::document::Document;
///
/// let doc = Document::new("a1", vec![Some("Cats".to_string()), None, Some("are cute".to_string())]);
/// assert_eq!(doc.content(), "Cats are cute");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque identifier.
    pub doc_id: DocId,
    /// Field values in configured order; `None` for a missing field.
    pub fields: Vec<Option<String>>,
}

impl Document {
    /// Create a document from ordered field values.
    pub fn new<S: Into<String>>(doc_id: S, fields: Vec<Option<String>>) -> Self {
        Document {
            doc_id: doc_id.into(),
            fields,
        }
    }

    /// Create a document with a single text field.
    pub fn from_text<S: Into<String>, T: Into<String>>(doc_id: S, text: T) -> Self {
        Self::new(doc_id, vec![Some(text.into())])
    }

    /// Pick `field_names` out of `record`, in order.
    ///
    /// Names missing from the record become `None`; they are skipped when
    /// the content is assembled and never cause the document to be dropped.
    pub fn from_record<S: Into<String>>(
        doc_id: S,
        record: &HashMap<String, String>,
        field_names: &[String],
    ) -> Self {
        let fields = field_names
            .iter()
            .map(|name| record.get(name).cloned())
            .collect();
        Self::new(doc_id, fields)
    }

    /// The text to index: present field values joined by a single space.
    pub fn content(&self) -> String {
        self.fields
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of fields that carry a value.
    pub fn present_fields(&self) -> usize {
        self.fields.iter().filter(|f| f.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_skips_missing_fields() {
        let doc = Document::new(
            "doc1",
            vec![
                None,
                Some("Reuters".to_string()),
                None,
                Some("Markets rally".to_string()),
            ],
        );

        assert_eq!(doc.content(), "Reuters Markets rally");
        assert_eq!(doc.present_fields(), 2);
    }

    #[test]
    fn test_all_fields_missing_gives_empty_content() {
        let doc = Document::new("doc1", vec![None, None]);
        assert_eq!(doc.content(), "");
    }

    #[test]
    fn test_from_record_follows_field_order() {
        let mut record = HashMap::new();
        record.insert("title".to_string(), "Cats".to_string());
        record.insert("content".to_string(), "are cute".to_string());
        record.insert("ignored".to_string(), "never indexed".to_string());

        let fields = vec![
            "author".to_string(),
            "title".to_string(),
            "content".to_string(),
        ];
        let doc = Document::from_record("doc1", &record, &fields);

        assert_eq!(doc.fields.len(), 3);
        assert_eq!(doc.fields[0], None);
        assert_eq!(doc.content(), "Cats are cute");
    }
}

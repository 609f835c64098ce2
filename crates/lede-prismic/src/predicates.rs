//! Search predicates.
//!
//! Queries are sent as `q=[[at(path, "value")]]`; multiple predicates are
//! concatenated inside the outer brackets.

use lede_core::{DocumentType, Uid};

/// A single `at` predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    path: String,
    value: String,
}

impl Predicate {
    /// `at(path, "value")`
    pub fn at(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Documents of the given custom type.
    pub fn document_type(document_type: &DocumentType) -> Self {
        Self::at("document.type", document_type.as_str())
    }

    /// The document of `document_type` whose uid is `uid`.
    pub fn uid(document_type: &DocumentType, uid: &Uid) -> Self {
        Self::at(format!("my.{}.uid", document_type), uid.as_str())
    }

    fn render(&self) -> String {
        format!("[at({}, \"{}\")]", self.path, escape(&self.value))
    }
}

/// Render predicates as a `q` parameter.
pub fn query<'a>(predicates: impl IntoIterator<Item = &'a Predicate>) -> String {
    let inner: String = predicates.into_iter().map(Predicate::render).collect();
    format!("[{}]", inner)
}

/// Qualify bare field names with the document type (`title` to `post.title`).
pub fn fetch_fields(document_type: &DocumentType, fields: &[String]) -> Option<String> {
    if fields.is_empty() {
        return None;
    }
    let qualified: Vec<String> = fields
        .iter()
        .map(|f| format!("{}.{}", document_type, f))
        .collect();
    Some(qualified.join(","))
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

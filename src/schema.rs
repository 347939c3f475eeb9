use graphql_parser::schema::{Document, ParseError};

/// One fetched revision of a schema file: the raw text plus the
/// (ref, path) coordinate it came from. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct SchemaSnapshot {
    pub text: String,
    pub reference: String,
    pub path: String,
}

impl SchemaSnapshot {
    pub fn new(
        text: impl Into<String>,
        reference: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            reference: reference.into(),
            path: path.into(),
        }
    }

    /// Parse the snapshot text into a schema document.
    ///
    /// The document borrows from `self.text`; callers parse once per
    /// snapshot and share the result across lookups.
    pub fn parse(&self) -> Result<Document<'_, String>, ParseError> {
        graphql_parser::parse_schema::<String>(&self.text)
    }
}

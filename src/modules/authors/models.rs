use serde::{Deserialize, Serialize};

/// A managed author record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Store-assigned identifier, immutable once created
    pub id: i64,
    /// Given name
    pub first: String,
    /// Family name
    pub last: String,
    /// Contact address, unique across all authors
    pub email: String,
}

impl Author {
    pub fn new(
        id: i64,
        first: impl Into<String>,
        last: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first: first.into(),
            last: last.into(),
            email: email.into(),
        }
    }
}

/// The two authors the service starts with when demo seeding is enabled.
pub fn demo_authors() -> Vec<Author> {
    vec![
        Author::new(1, "Sam", "Iam", "sam@aol.com"),
        Author::new(2, "Jane", "Doe", "jane@aol.com"),
    ]
}

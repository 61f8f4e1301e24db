//! Person module - the externally owned identities the graph connects

use std::fmt;

/// Opaque identifier for a person
///
/// Ids are owned by the person registry; the engine never generates them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(String);

impl PersonId {
    /// Wrap a raw id string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PersonId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Display fields of a person, as supplied by the person registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Registry identifier
    pub id: PersonId,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Optional reference to a profile photo
    pub profile_photo: Option<String>,
}

impl Person {
    /// Create a person without a profile photo
    pub fn new(
        id: impl Into<PersonId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            profile_photo: None,
        }
    }

    /// Attach a profile photo reference
    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.profile_photo = Some(photo.into());
        self
    }

    /// "First Last", trimmed when either part is empty
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

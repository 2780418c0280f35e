//! Top-level domain entity.

/// A top-level domain such as `.ng`.
///
/// Domains are shared between countries. Removing a domain from a country
/// only deletes the association, never the domain itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLevelDomain {
    pub id: i64,
    pub name: String,
}

impl TopLevelDomain {
    pub fn new(id: i64, name: String) -> Self {
        Self { id, name }
    }
}

/// Input data for creating a top-level domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopLevelDomain {
    pub name: String,
}

impl NewTopLevelDomain {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

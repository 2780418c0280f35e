//! Region entity.

/// A named group of countries.
///
/// Regions are created lazily the first time a country record references
/// them and are never deleted by the sync. Names are matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: i64,
    pub name: String,
}

impl Region {
    pub fn new(id: i64, name: String) -> Self {
        Self { id, name }
    }
}

/// Input data for creating a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegion {
    pub name: String,
}

impl NewRegion {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

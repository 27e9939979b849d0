use std::sync::Arc;

/// Binary resource that was referenced by a show but not loaded.
///
/// Holds only the declared filename; whoever owns the show can fetch the bytes later.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Asset {
    pub filename: String,
}

impl Asset {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// Outcome of resolving one asset reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetPayload {
    /// Bytes read from the compiled show container.
    Loaded(Arc<[u8]>),
    /// Reference left unresolved, either on request or because the container lacks the entry.
    Placeholder(Asset),
}

impl AssetPayload {
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Loaded(b) => Some(&b[..]),
            Self::Placeholder(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/placeholder.rs"]
mod tests;

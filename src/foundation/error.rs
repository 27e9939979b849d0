use std::fmt;

/// Convenience result type used across the crate.
pub type ShowResult<T> = Result<T, ShowError>;

/// One step of a path into a show document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathElem {
    /// Fixed schema field.
    Field(&'static str),
    /// Free-form object key (e.g. discovered while scanning for asset references).
    Key(String),
    /// Index into an array.
    Index(usize),
}

/// JSON-path-like location of a field inside a show document, rendered as `$.a.b[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaPath(Vec<PathElem>);

impl SchemaPath {
    /// The document root (`$`).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from fixed field names.
    pub fn fields(names: &[&'static str]) -> Self {
        Self(names.iter().map(|&n| PathElem::Field(n)).collect())
    }

    /// Return a copy of this path extended by a fixed field.
    pub fn field(&self, name: &'static str) -> Self {
        let mut p = self.clone();
        p.0.push(PathElem::Field(name));
        p
    }

    /// Return a copy of this path extended by a free-form key.
    pub fn key(&self, name: impl Into<String>) -> Self {
        let mut p = self.clone();
        p.0.push(PathElem::Key(name.into()));
        p
    }

    /// Return a copy of this path extended by an array index.
    pub fn index(&self, i: usize) -> Self {
        let mut p = self.clone();
        p.0.push(PathElem::Index(i));
        p
    }

    /// Path elements from the root.
    pub fn elems(&self) -> &[PathElem] {
        &self.0
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for p in &self.0 {
            match p {
                PathElem::Field(name) => write!(f, ".{name}")?,
                PathElem::Key(name) => write!(f, ".{name}")?,
                PathElem::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

/// Machine-readable classification of a [`ShowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required field (version, drones, trajectory) is absent.
    MissingField,
    /// A present field has the wrong type or an unrecognized value.
    InvalidValue,
    /// A configured hard limit (drone count) was exceeded.
    LimitExceeded,
    /// The compiled show archive could not be opened or read.
    MalformedContainer,
    /// The compiled show archive lacks the specification entry.
    MissingEntry,
}

/// Error raised by validation, camera extraction and compiled show loading.
///
/// Every variant renders to a message that names the offending field or archive entry, so it can
/// be shown to a show author as-is.
#[derive(thiserror::Error, Debug)]
pub enum ShowError {
    #[error("missing field: {path}: {message}")]
    MissingField { path: SchemaPath, message: String },

    #[error("invalid value: {path}: {message}")]
    InvalidValue { path: SchemaPath, message: String },

    #[error("limit exceeded: {path}: {message}")]
    LimitExceeded { path: SchemaPath, message: String },

    #[error("malformed container: {0}")]
    MalformedContainer(String),

    #[error("missing entry: {0}")]
    MissingEntry(String),
}

impl ShowError {
    pub fn missing(path: SchemaPath, message: impl Into<String>) -> Self {
        Self::MissingField {
            path,
            message: message.into(),
        }
    }

    pub fn invalid(path: SchemaPath, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            path,
            message: message.into(),
        }
    }

    pub fn limit(path: SchemaPath, message: impl Into<String>) -> Self {
        Self::LimitExceeded {
            path,
            message: message.into(),
        }
    }

    pub fn container(msg: impl Into<String>) -> Self {
        Self::MalformedContainer(msg.into())
    }

    pub fn missing_entry(name: impl Into<String>) -> Self {
        Self::MissingEntry(name.into())
    }

    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::LimitExceeded { .. } => ErrorKind::LimitExceeded,
            Self::MalformedContainer(_) => ErrorKind::MalformedContainer,
            Self::MissingEntry(_) => ErrorKind::MissingEntry,
        }
    }

    /// Location of the offending field, for document-level errors.
    pub fn path(&self) -> Option<&SchemaPath> {
        match self {
            Self::MissingField { path, .. }
            | Self::InvalidValue { path, .. }
            | Self::LimitExceeded { path, .. } => Some(path),
            Self::MalformedContainer(_) | Self::MissingEntry(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

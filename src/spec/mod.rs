//! Show specification boundary model, validation and read accessors.
//!
//! Documents enter as untrusted JSON. [`validate::validate_show_specification`] inspects the raw
//! value and rejects it on the first violated rule; only then is it decoded into the typed
//! [`model::ShowSpecification`].

pub(crate) mod cameras;
pub(crate) mod model;
pub(crate) mod validate;
pub(crate) mod version;

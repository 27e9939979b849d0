//! Binary assets referenced from a show specification.
//!
//! A specification points at binary resources (audio, textures, ...) with `{"$ref": "<path>"}`
//! objects. The compiled show loader resolves each reference to the bytes stored in the container
//! or leaves an [`placeholder::Asset`] in its place.

pub(crate) mod placeholder;
pub(crate) mod refs;

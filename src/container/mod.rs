//! Compiled show (`.skyc`) container loading.

pub(crate) mod loader;

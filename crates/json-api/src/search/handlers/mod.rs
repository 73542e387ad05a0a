//! Search handlers

pub(crate) mod index;
pub(crate) mod suggestions;

//! Categories page handlers

pub(crate) mod get;
pub(crate) mod index;

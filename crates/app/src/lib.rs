//! Upstream API client and domain services for the BoltPromo site.
//!
//! Everything here mirrors the remote REST backend: records are fetched,
//! displayed by the HTTP surface, and discarded. The only process-local
//! state is the request de-duplication cache and the recent-search history,
//! both non-authoritative.

pub mod client;
pub mod context;
pub mod domain;
pub mod pagination;
pub mod records;
pub mod search;

//! Resource services over the upstream REST API.

pub mod categories;
pub mod contact;
pub mod content;
pub mod health;
pub mod promocodes;
pub mod search;
pub mod showcases;
pub mod stats;
pub mod stores;

pub use categories::*;
pub use contact::*;
pub use content::*;
pub use health::*;
pub use promocodes::*;
pub use search::*;
pub use showcases::*;
pub use stats::*;
pub use stores::*;

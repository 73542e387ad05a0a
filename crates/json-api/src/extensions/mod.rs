//! Extension traits

mod depot;
mod option;

pub(crate) use depot::DepotExt as _;
pub(crate) use option::OptionExt as _;

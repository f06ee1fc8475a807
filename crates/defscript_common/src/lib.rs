//! Common structures used by the defscript crates

pub mod collections;
pub mod nom_helpers;

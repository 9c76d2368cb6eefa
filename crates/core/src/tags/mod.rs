//! Tags module - user created markers for fee entries.

mod tags_model;

pub use tags_model::Tag;

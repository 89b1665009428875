//! hanci-dict — Reference dictionary loading and lookup.
//!
//! Implements the `DictLookup` trait over a flat dictionary file, giving
//! review sessions per-headword entries plus related-word indexes.

pub mod gazetteer;

pub use gazetteer::{Gazetteer, GazetteerError};

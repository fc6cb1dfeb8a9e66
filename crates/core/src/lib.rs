//! Domain types and rules for the mind card service.
//!
//! This crate performs no I/O. It owns the card status lifecycle, the
//! transfer representation and its validation rules, creation defaults,
//! paging/sorting directives and statistics assembly, so the repository and
//! HTTP layers share a single definition of each.

pub mod card;
pub mod error;
pub mod pagination;
pub mod statistics;
pub mod types;

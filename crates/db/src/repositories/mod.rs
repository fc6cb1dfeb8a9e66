//! Repositories: one zero-sized struct per table with async query functions.
//!
//! Every function takes `&mut PgConnection` so callers decide the
//! transaction scope (a pooled connection, or `&mut *tx`).

pub mod card_repo;

pub use card_repo::CardRepo;

//! Row models.
//!
//! Request-side DTOs (the validated transfer representation, creation and
//! update payloads) live in `mindcard_core::card`; this module only holds
//! shapes read back from the database.

pub mod card;

//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod inscription_repo;

pub use inscription_repo::InscriptionRepo;

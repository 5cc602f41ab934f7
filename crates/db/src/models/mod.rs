//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct
//! matching the database row. Create DTOs live in `inscription-core`
//! since they are assembled by pure domain code.

pub mod inscription;

//! rowtally_engine - Cell model, value coercion and display formatting.

pub mod engine;

// surtax-core/src/infrastructure/adapters/mod.rs

pub mod duckdb;
pub mod memory;

pub use self::duckdb::{DuckDbLedger, LedgerSettings};
pub use self::memory::InMemoryLedger;

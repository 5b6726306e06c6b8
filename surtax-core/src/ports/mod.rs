// surtax-core/src/ports/mod.rs

pub mod ledger;

pub use ledger::LedgerReader;

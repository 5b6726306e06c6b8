// surtax-core/src/lib.rs

// 1. Documentation is uneven on purpose while the API settles
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// What the engine needs from the outside world (a ledger snapshot).
pub mod ports;

// 2. Domain (Business core)
// Ledger model, concern detector, compliance scorer, aggregates.
// Depends on NOTHING else (no infra, no app).
pub mod domain;

// 3. Infrastructure (Adapters)
// DuckDB ledger, YAML config, Jinja rendering, atomic file writes.
// Depends on Domain and Ports.
pub mod infrastructure;

// 4. Application (Use Cases)
// Oversight service, annual report, meeting agenda.
// Depends on Domain, Infra and Ports.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use surtax_core::SurtaxError;
pub use error::SurtaxError;

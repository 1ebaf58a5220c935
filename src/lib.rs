//! Personal expense tracker: a single-user ledger persisted to a flat CSV
//! file.
//!
//! The crate is layered the same way front to back:
//!
//! ```text
//! CLI Layer (interactive menu, prompts)
//!     ↓
//! Domain Layer (business logic, services)
//!     ↓
//! Storage Layer (CSV persistence)
//! ```
//!
//! The domain layer is UI-agnostic and works against the storage traits in
//! [`storage::traits`], so alternative backends could be dropped in without
//! touching business logic.

pub mod cli;
pub mod domain;
pub mod storage;

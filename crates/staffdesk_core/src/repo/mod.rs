//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Employee::validate()` before
//!   persistence.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateCpf`)
//!   in addition to transport errors.

pub mod employee_repo;

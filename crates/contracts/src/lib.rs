//! Shared domain contracts for the Varejo Elite performance program.
//!
//! Everything in this crate is pure data and pure computation: the store
//! aggregate with its owned KPI records, the tier enumeration, the scoring
//! engine and the reward resolver. Persistence and transport live in the
//! backend crate.

pub mod dashboards;
pub mod domain;
pub mod enums;
pub mod system;

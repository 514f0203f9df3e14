//! # Leaveledger Core Library
//!
//! This library provides the core business logic for Leaveledger, a PTO
//! accrual planner. It implements a CLI-first philosophy where all operations
//! are available via a standalone CLI binary, with any GUI surface being a
//! thin layer over the same core library.
//!
//! ## Architecture
//!
//! The engine is a pure, synchronous pipeline over an immutable plan snapshot:
//!
//! - **Calendar**: local calendar date arithmetic (no timezones)
//! - **Accrual**: hours accrued between two dates under the active policy
//! - **Schedule**: ordered accrual event dates for a year, with computed and
//!   posted (possibly overridden) amounts
//! - **Windows**: partition of the year into accrual-bounded windows with
//!   per-window balances and member entries
//! - **Summary**: planned totals, end-of-year balance replay, per-entry
//!   running balances
//! - **Store**: copy-on-write snapshot holder with a monotonic version
//!   counter; derived views are recomputed on demand, never stored
//!
//! ## Key Components
//!
//! - [`Plan`]: one immutable snapshot of policy plus entries
//! - [`PlanStore`]: snapshot holder with mutators and derived views
//! - [`WindowRow`]: one accrual-bounded window of the year
//! - [`AccrualEvent`]: one scheduled grant with computed and posted amounts

pub mod accrual;
pub mod calendar;
pub mod carryover;
pub mod error;
pub mod plan;
pub mod schedule;
pub mod store;
pub mod summary;
pub mod windows;

pub use error::{CoreError, Result};
pub use plan::{Entry, Mode, Period, Plan, Policy};
pub use schedule::AccrualEvent;
pub use store::PlanStore;
pub use summary::RowCalc;
pub use windows::WindowRow;

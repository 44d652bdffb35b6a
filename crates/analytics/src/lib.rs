//! # Azuro Fees Analytics
//!
//! This crate reduces lists of resolved bets into the two totals the fee
//! methodology needs: how much was wagered and how much was paid out to winners.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O and no knowledge of where bets come from. It depends
//!   only on `core-types`.
//! - **Stateless calculation:** `BetAggregator` takes raw bet records and produces
//!   `AggregateAmounts`. Record order never changes the result.
//! - **Floating-point totals:** stakes and odds are decimal strings at the source
//!   and are widened to `f64` here. The precision loss at typical wager sizes is
//!   accepted.
//!
//! ## Public API
//!
//! - `BetAggregator`: the calculator.
//! - `AggregateAmounts`: wagered and won totals, plus the derived pool profit.
//! - `AnalyticsError`: returned when a record carries an unparseable number.

// Declare the modules that constitute this crate.
pub mod aggregator;
pub mod amounts;
pub mod error;

// Re-export the key components to create a clean, public-facing API.
pub use aggregator::BetAggregator;
pub use amounts::AggregateAmounts;
pub use error::AnalyticsError;

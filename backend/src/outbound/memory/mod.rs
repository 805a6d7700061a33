//! In-memory adapters used when no database is configured.
//!
//! They honour the same contracts as the Diesel adapters: the submission
//! ledger writes the footprint and the leaderboard credit under one lock, and
//! user credits are applied atomically.

mod carbon_store;
mod user_store;

pub use carbon_store::InMemoryCarbonStore;
pub use user_store::InMemoryUserStore;

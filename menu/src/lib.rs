//! # Menu Search
//!
//! Shared search logic for the canteen ordering app.
//!
//! Two ways to rank a menu against a free-text query:
//! - [`client::RemoteRanker`]: asks the smart-search proxy, which in turn
//!   asks a hosted generative model.
//! - [`ranker::LocalRanker`]: a deterministic keyword/intent heuristic that
//!   needs no network at all.
//!
//! [`client::SmartSearch`] glues the two together: one attempt at the remote
//! ranker, then a silent fall back to the local one. Both paths return the
//! same thing, at most [`MAX_RESULTS`] items, best match first, drawn only
//! from the candidates passed in.

pub mod client;
pub mod intent;
pub mod item;
pub mod ranker;

pub use client::{Ranker, RemoteRanker, SearchError, SmartSearch};
pub use item::MenuItem;
pub use ranker::LocalRanker;

/// Upper bound on ranked results, shared by every ranking path.
pub const MAX_RESULTS: usize = 5;

/// Longest query we accept before rejecting the request outright.
pub const MAX_QUERY_LEN: usize = 100;

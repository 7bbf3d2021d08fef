//! # Docket Search
//!
//! The aggregation engine: three concurrent search sources raced against
//! independent budgets, merged into one best-effort result.
//!
//! ```text
//! query
//!   │ normalize / guard
//!   ├──> TaskIndexMatcher  ── raced 10s ──┐
//!   ├──> RemoteAssetMatcher ─ raced 15s ──┼──> AggregationResult
//!   └──> TreeScanner ──────── raced 30s ──┘
//! ```
//!
//! A slow, unreachable, or partially failing source contributes an empty
//! list for itself only; [`DocketAggregator::fetch_aggregation`] never fails.

mod aggregator;
mod raced;
mod remote;
mod task_index;

pub use aggregator::DocketAggregator;
pub use raced::raced;
pub use remote::RemoteAssetMatcher;
pub use task_index::TaskIndexMatcher;

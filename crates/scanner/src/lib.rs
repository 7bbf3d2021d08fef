//! # Docket Scanner
//!
//! Filesystem search source for the docket aggregation engine.
//!
//! Storage is split between flat roots (active sessions, prep, in-progress
//! work) and year-partitioned roots (`<prefix><YYYY>` directories beneath a
//! server base path). The scanner walks both with bounded depth and bounded
//! fan-out:
//!
//! ```text
//! flat roots ──> depth-bounded recursive scan (digit-pruned, batched yields)
//! year base ──> enumerate <prefix><YYYY>, newest first
//!                 ├─ top 3 years: concurrent deep scan (+1 depth under backups)
//!                 └─ older years: shallow sequential name check
//! ```
//!
//! All I/O failures are soft: an unreadable directory is logged and skipped.
//! The scanner carries no timeout of its own; the caller's budget bounds it.

mod config;
mod scanner;
mod tree;
mod years;

pub use config::{ScanConfig, ScanRoots};
pub use scanner::TreeScanner;
pub use tree::lazy_file_count;

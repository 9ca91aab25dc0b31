//! File output for computed results.

/// CSV export for I-V curve samples.
pub mod export;

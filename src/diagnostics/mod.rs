//! Diagnostics data model shared by the library entry points and the tool.
//!
//! Currently limited to wall-clock timings per pipeline stage; every
//! structure serializes to camelCase JSON for tooling.

pub mod timing;

pub use timing::{StageTiming, TimingBreakdown};

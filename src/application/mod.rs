//! Application services (use cases).
//!
//! The detection core is pure: [`enumerator`] produces combinations,
//! [`evaluator`] scores them, [`detection`] runs both over a market and
//! [`ranker`] merges markets. [`allocator`] splits a bankroll. The async
//! [`scanner`] and [`service`] coordinate ports around that core.

pub mod allocator;
pub mod detection;
pub mod enumerator;
pub mod evaluator;
pub mod ranker;
pub mod scanner;
pub mod service;
pub mod tracker;

pub use allocator::StakeAllocator;
pub use detection::{ArbitrageDetector, DetectionPolicy};
pub use enumerator::{CombinationEnumerator, Combinations, EnumeratorConfig};
pub use evaluator::ArbitrageEvaluator;
pub use scanner::{ArbitrageScanner, ScanRequest, ScanSettings};
pub use service::{ArbitrageService, DeskDefaults};
pub use tracker::{OpportunityTracker, RefreshOutcome};

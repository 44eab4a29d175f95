//! Infrastructure configuration modules.

pub mod cache;
pub mod detection;
pub mod logging;
pub mod scan;
pub mod settings;
pub mod stakes;

pub use settings::Config;

//! Sums or subtracts the integers in a delimited string.
//!
//! ```
//! assert_eq!(string_calc::add("//[***][%%%]\n1***2%%%3").unwrap(), 6);
//! assert_eq!(string_calc::subtract("3,2000,1").unwrap(), 2);
//! ```

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::CalcConfig;

pub use crate::adapters::{StaticProvider, WebProvider};
pub use crate::core::calculator::Calculator;
pub use crate::core::delimiter::{DelimiterSet, DelimiterStrategy, StrategyKind};
pub use domain::model::{CalcSettings, Operation};
pub use domain::ports::NumberProvider;
pub use utils::error::{CalcError, Result};

/// Adds the numbers in `input` with the default upper bound.
pub fn add(input: &str) -> Result<i64> {
    Calculator::new().add(input)
}

/// Subtracts the numbers in `input` from its first number, with the default
/// upper bound.
pub fn subtract(input: &str) -> Result<i64> {
    Calculator::new().subtract(input)
}

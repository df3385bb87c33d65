pub mod calculator;
pub mod delimiter;
pub mod extractor;

pub use crate::domain::model::{CalcSettings, NumberList, Operation};
pub use crate::domain::ports::NumberProvider;
pub use crate::utils::error::Result;

use crate::core::extractor;
use crate::core::{CalcSettings, NumberList, NumberProvider, Operation, Result};
use crate::utils::error::CalcError;

/// Sums or subtracts the numbers in a delimited string.
///
/// Holds only immutable settings, so one instance can serve any number of
/// callers; every call parses its input from scratch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calculator {
    settings: CalcSettings,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: CalcSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> CalcSettings {
        self.settings
    }

    /// Sum of all numbers below the upper bound. Empty input sums to 0.
    pub fn add(&self, input: &str) -> Result<i64> {
        let numbers = extractor::parse(input)?;
        self.add_numbers(&numbers)
    }

    /// First number minus the sum of the rest, ignoring numbers at or above
    /// the upper bound.
    pub fn subtract(&self, input: &str) -> Result<i64> {
        let numbers = extractor::parse(input)?;
        self.subtract_numbers(&numbers)
    }

    pub fn evaluate(&self, operation: Operation, input: &str) -> Result<i64> {
        match operation {
            Operation::Add => self.add(input),
            Operation::Subtract => self.subtract(input),
        }
    }

    pub fn add_numbers(&self, numbers: &[i64]) -> Result<i64> {
        let kept = self.admit(numbers)?;
        checked_sum(&kept)
    }

    pub fn subtract_numbers(&self, numbers: &[i64]) -> Result<i64> {
        let kept = self.admit(numbers)?;
        let (first, rest) = kept.split_first().ok_or(CalcError::EmptyInputError)?;
        first
            .checked_sub(checked_sum(rest)?)
            .ok_or(CalcError::OverflowError)
    }

    /// Sums the entries supplied by `provider`, under the same rules as
    /// [`Calculator::add`].
    pub async fn add_from<P>(&self, provider: &P) -> Result<i64>
    where
        P: NumberProvider + ?Sized,
    {
        let entries = provider.take_numbers().await?;
        tracing::debug!("Provider supplied {} entries", entries.len());

        let numbers = entries
            .iter()
            .map(|entry| extractor::parse_token(entry.trim()))
            .collect::<Result<NumberList>>()?;
        self.add_numbers(&numbers)
    }

    /// Rejects negatives, then drops values at or above the upper bound.
    fn admit(&self, numbers: &[i64]) -> Result<NumberList> {
        let negatives: Vec<i64> = numbers.iter().copied().filter(|n| *n < 0).collect();
        if !negatives.is_empty() {
            return Err(CalcError::NegativeNumberError { values: negatives });
        }

        let kept: NumberList = numbers
            .iter()
            .copied()
            .filter(|n| *n < self.settings.upper_bound)
            .collect();
        if kept.len() < numbers.len() {
            tracing::debug!(
                "Ignored {} value(s) at or above {}",
                numbers.len() - kept.len(),
                self.settings.upper_bound
            );
        }
        Ok(kept)
    }
}

fn checked_sum(numbers: &[i64]) -> Result<i64> {
    numbers
        .iter()
        .try_fold(0i64, |acc, n| acc.checked_add(*n))
        .ok_or(CalcError::OverflowError)
}

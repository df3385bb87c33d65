use crate::domain::ports::NumberProvider;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Provider returning a fixed list of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticProvider {
    values: Vec<String>,
}

impl StaticProvider {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for StaticProvider {
    fn default() -> Self {
        Self::new(["11", "23"])
    }
}

#[async_trait]
impl NumberProvider for StaticProvider {
    async fn take_numbers(&self) -> Result<Vec<String>> {
        Ok(self.values.clone())
    }
}

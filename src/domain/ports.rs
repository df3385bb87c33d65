use crate::utils::error::Result;
use async_trait::async_trait;

/// Supplier of raw numeric entries, one integer per entry.
#[async_trait]
pub trait NumberProvider: Send + Sync {
    async fn take_numbers(&self) -> Result<Vec<String>>;
}

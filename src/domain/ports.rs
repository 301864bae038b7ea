use crate::domain::model::Domain;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 外部可用性檢查服務。`Ok(true)` 表示可註冊。
///
/// 失敗時由呼叫端視為 Unavailable；實作不需要重試。
#[async_trait]
pub trait AvailabilityProber: Send + Sync {
    async fn probe(&self, domain: &Domain) -> Result<bool>;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn required_domains(&self) -> usize;
    fn timeout_seconds(&self) -> Option<u64>;
}

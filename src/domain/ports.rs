use crate::domain::model::Shipment;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn collection(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}

/// 貨運批次的遠端資源。每次呼叫都直接打後端，不做快取。
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Shipment>>;
    async fn get(&self, id: &str) -> Result<Shipment>;
    /// 整筆覆寫（PUT），不是部分更新
    async fn replace(&self, shipment: &Shipment) -> Result<()>;
}

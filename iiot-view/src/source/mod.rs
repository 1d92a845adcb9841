pub mod file;
pub mod memory;
pub mod simulated;

use async_trait::async_trait;
use iiot_core::FactSnapshot;

/// Where the dashboard gets its facts from.
///
/// A source hands out whole snapshots. Derivation and projection only ever
/// see the returned [`FactSnapshot`], so any telemetry backend can stand in
/// here without touching them.
#[async_trait]
pub trait FactSource: Send + Sync + 'static {
    /// Error type specific to this source implementation
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the current facts.
    async fn read(&self) -> Result<FactSnapshot, Self::Error>;
}

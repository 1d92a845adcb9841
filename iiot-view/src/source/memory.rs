use std::convert::Infallible;

use async_trait::async_trait;
use iiot_core::{
    Alert, AlertSeverity, Device, DeviceId, DeviceStatus, FactSnapshot, KpiMetrics, Percent,
    ProductionStats, TelemetrySample,
};

use super::FactSource;

/// Source serving a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    snapshot: FactSnapshot,
}

impl MemorySource {
    pub fn new(snapshot: FactSnapshot) -> Self {
        Self { snapshot }
    }

    /// The showcase plant: four lines, an hour of telemetry and three alerts.
    pub fn demo() -> Self {
        Self::new(demo_snapshot())
    }
}

#[async_trait]
impl FactSource for MemorySource {
    type Error = Infallible;

    async fn read(&self) -> Result<FactSnapshot, Self::Error> {
        Ok(self.snapshot.clone())
    }
}

fn demo_snapshot() -> FactSnapshot {
    let device = |id: &str, status, name: &str| Device {
        id: DeviceId::from(id),
        name: name.into(),
        status,
        last_seen: None,
    };

    let sample = |time: &str, temperature, humidity, pressure| TelemetrySample {
        time: time.into(),
        temperature,
        humidity,
        pressure: Some(pressure),
    };

    let alert = |time: &str, device_id: &str, kind: &str, message: &str, severity| Alert {
        time: time.into(),
        device_id: DeviceId::from(device_id),
        kind: kind.into(),
        message: message.into(),
        severity,
    };

    FactSnapshot {
        captured_at: None,
        devices: vec![
            device("DEV001", DeviceStatus::Running, "Production Line A"),
            device("DEV002", DeviceStatus::Idle, "Assembly Unit B"),
            device("DEV003", DeviceStatus::Fault, "Quality Station C"),
            device("DEV004", DeviceStatus::Running, "Packaging Line D"),
        ]
        .into(),
        telemetry: vec![
            sample("00:00", 25.0, 60.0, 1013.0),
            sample("00:10", 26.0, 62.0, 1015.0),
            sample("00:20", 24.0, 58.0, 1012.0),
            sample("00:30", 27.0, 65.0, 1018.0),
            sample("00:40", 25.5, 61.0, 1016.0),
            sample("00:50", 26.5, 63.0, 1014.0),
        ]
        .into(),
        alerts: vec![
            alert(
                "16:00",
                "DEV001",
                "High Temperature",
                "Temperature exceeded 30°C",
                AlertSeverity::High,
            ),
            alert(
                "15:45",
                "DEV002",
                "Idle Detected",
                "Device idle for over 10 minutes",
                AlertSeverity::Medium,
            ),
            alert(
                "15:30",
                "DEV003",
                "Fault",
                "Sensor failure detected",
                AlertSeverity::High,
            ),
        ]
        .into(),
        kpis: KpiMetrics {
            oee: Percent::clamped(85.0),
            availability: Percent::clamped(90.0),
            performance: Percent::clamped(82.0),
            quality: Percent::clamped(98.0),
        },
        production: Some(ProductionStats {
            uptime: Percent::clamped(95.0),
            units_produced: 1200,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_facts() {
        let snapshot = MemorySource::demo().read().await.unwrap();

        assert_eq!(snapshot.devices.len(), 4);
        assert_eq!(snapshot.telemetry.len(), 6);
        assert_eq!(snapshot.alerts.len(), 3);
        assert_eq!(snapshot.kpis.oee.value(), 85.0);
        assert_eq!(snapshot.unknown_labels(), 0);
        assert_eq!(snapshot.telemetry[4].temperature, 25.5);
    }

    #[tokio::test]
    async fn reads_are_repeatable() {
        let source = MemorySource::demo();
        let first = source.read().await.unwrap();
        let second = source.read().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn default_source_is_empty() {
        let snapshot = MemorySource::default().read().await.unwrap();
        assert!(snapshot.is_empty());
    }
}

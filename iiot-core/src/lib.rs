use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

mod de;
mod error;
mod percent;

pub use error::CoreError;
pub use percent::Percent;

// Snapshots are replaced whole and never edited in place, so we use
// `Box<str>` and `Box<[T]>` to keep them compact and avoid accidental
// cloning of large values.
type BoxStr = Box<str>;
type BoxList<T> = Box<[T]>;

/// Identifier of a monitored device, as assigned by the telemetry backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub BoxStr);

impl DeviceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DeviceId {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A monitored machine on the plant floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Stable identity of this device.
    pub id: DeviceId,
    /// Human readable name, e.g. "Production Line A".
    pub name: BoxStr,
    /// Last reported operational status.
    #[serde(default)]
    pub status: DeviceStatus,
    /// When the backend last heard from this device.
    #[serde(
        default,
        deserialize_with = "de::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_seen: Option<jiff::Timestamp>,
}

/// Operational status of a device.
///
/// The set is closed. Any label outside it (e.g. "maintenance"), a
/// non-string value or a missing field is read as [`DeviceStatus::Unknown`]
/// instead of being rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum DeviceStatus {
    Running,
    Idle,
    Fault,
    #[default]
    Unknown,
}

impl DeviceStatus {
    pub const ALL: [DeviceStatus; 4] = [
        DeviceStatus::Running,
        DeviceStatus::Idle,
        DeviceStatus::Fault,
        DeviceStatus::Unknown,
    ];

    /// Parse a status label. Case and surrounding whitespace are ignored.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(label))
            .unwrap_or(DeviceStatus::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceStatus::Running => "running",
            DeviceStatus::Idle => "idle",
            DeviceStatus::Fault => "fault",
            DeviceStatus::Unknown => "unknown",
        }
    }
}

impl From<&str> for DeviceStatus {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl<'de> Deserialize<'de> for DeviceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        de::RawLabel::deserialize(deserializer).map(|raw| Self::parse(raw.as_str()))
    }
}

impl From<DeviceStatus> for &'static str {
    fn from(status: DeviceStatus) -> Self {
        status.as_str()
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single timestamped reading of the plant environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Time label shown on the chart axis, e.g. "00:10".
    pub time: BoxStr,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity as a percentage.
    pub humidity: f64,
    /// Barometric pressure in hPa, when the sensor reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
}

/// An alert raised against a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Time label of the alert, e.g. "16:00".
    pub time: BoxStr,
    /// Device the alert was raised against.
    pub device_id: DeviceId,
    /// Short type label, e.g. "High Temperature".
    #[serde(rename = "type")]
    pub kind: BoxStr,
    /// Free text message.
    pub message: BoxStr,
    #[serde(default)]
    pub severity: AlertSeverity,
}

/// Urgency of an alert.
///
/// Like [`DeviceStatus`] the set is closed and unrecognized or missing
/// labels are read as [`AlertSeverity::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum AlertSeverity {
    High,
    Medium,
    Low,
    #[default]
    Unknown,
}

impl AlertSeverity {
    pub const ALL: [AlertSeverity; 4] = [
        AlertSeverity::High,
        AlertSeverity::Medium,
        AlertSeverity::Low,
        AlertSeverity::Unknown,
    ];

    /// Parse a severity label. Case and surrounding whitespace are ignored.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(label))
            .unwrap_or(AlertSeverity::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlertSeverity::High => "high",
            AlertSeverity::Medium => "medium",
            AlertSeverity::Low => "low",
            AlertSeverity::Unknown => "unknown",
        }
    }
}

impl From<&str> for AlertSeverity {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl<'de> Deserialize<'de> for AlertSeverity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        de::RawLabel::deserialize(deserializer).map(|raw| Self::parse(raw.as_str()))
    }
}

impl From<AlertSeverity> for &'static str {
    fn from(severity: AlertSeverity) -> Self {
        severity.as_str()
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall equipment effectiveness and its three factors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiMetrics {
    /// Overall equipment effectiveness.
    pub oee: Percent,
    pub availability: Percent,
    pub performance: Percent,
    pub quality: Percent,
}

impl KpiMetrics {
    /// Build the metrics from the three factors, deriving OEE as their product.
    pub fn from_factors(availability: Percent, performance: Percent, quality: Percent) -> Self {
        let oee = availability.fraction() * performance.fraction() * quality.fraction() * 100.0;

        Self {
            oee: Percent::clamped(oee),
            availability,
            performance,
            quality,
        }
    }
}

/// Production report figures shown on the analytics page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionStats {
    /// Share of the reporting window the line was up.
    pub uptime: Percent,
    /// Units produced in the reporting window.
    pub units_produced: u64,
}

/// Everything the dashboard knows at one point in time.
///
/// A snapshot is produced by a data source and replaced as a whole; the
/// view layer never edits one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactSnapshot {
    /// When the source produced this snapshot.
    #[serde(
        deserialize_with = "de::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub captured_at: Option<jiff::Timestamp>,
    pub devices: BoxList<Device>,
    /// Telemetry series, oldest first.
    pub telemetry: BoxList<TelemetrySample>,
    pub alerts: BoxList<Alert>,
    pub kpis: KpiMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<ProductionStats>,
}

impl FactSnapshot {
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty() && self.telemetry.is_empty() && self.alerts.is_empty()
    }

    pub fn device(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.iter().find(|device| &device.id == id)
    }

    /// Alerts raised against `id`, in the order they were received.
    pub fn alerts_for<'a>(&'a self, id: &'a DeviceId) -> impl Iterator<Item = &'a Alert> + 'a {
        self.alerts.iter().filter(move |alert| &alert.device_id == id)
    }

    /// Number of device statuses and alert severities that fell back to
    /// `unknown`.
    pub fn unknown_labels(&self) -> usize {
        let statuses = self
            .devices
            .iter()
            .filter(|device| device.status == DeviceStatus::Unknown)
            .count();
        let severities = self
            .alerts
            .iter()
            .filter(|alert| alert.severity == AlertSeverity::Unknown)
            .count();

        statuses + severities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(value: f64) -> Percent {
        Percent::new(value).unwrap()
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(DeviceStatus::parse("running"), DeviceStatus::Running);
        assert_eq!(DeviceStatus::parse(" IDLE "), DeviceStatus::Idle);
        assert_eq!(DeviceStatus::parse("Fault"), DeviceStatus::Fault);
    }

    #[test]
    fn unrecognized_status_is_unknown() {
        for label in ["maintenance", "", "runnin", "offline"] {
            assert_eq!(DeviceStatus::parse(label), DeviceStatus::Unknown, "{label}");
        }
    }

    #[test]
    fn unrecognized_severity_is_unknown() {
        assert_eq!(AlertSeverity::parse("HIGH"), AlertSeverity::High);
        assert_eq!(AlertSeverity::parse("low"), AlertSeverity::Low);
        assert_eq!(AlertSeverity::parse("CRITICAL"), AlertSeverity::Unknown);
        assert_eq!(AlertSeverity::parse("urgent"), AlertSeverity::Unknown);
    }

    #[test]
    fn labels_survive_json() {
        let json = r#"{"id":"DEV009","name":"Press","status":"Maintenance"}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.status, DeviceStatus::Unknown);
        assert!(device.last_seen.is_none());

        let out = serde_json::to_string(&device).unwrap();
        assert!(out.contains(r#""status":"unknown""#));
    }

    #[test]
    fn non_string_labels_are_unknown() {
        let json = r#"{"id":"DEV009","name":"Press","status":null}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.status, DeviceStatus::Unknown);

        let json = r#"{"id":"DEV009","name":"Press","status":3}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.status, DeviceStatus::Unknown);

        let json = r#"{"id":"DEV009","name":"Press"}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.status, DeviceStatus::Unknown);

        let json = r#"{"time":"16:00","device_id":"DEV009","type":"Fault","message":"","severity":{"level":1}}"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Unknown);

        let json = r#"{"time":"16:00","device_id":"DEV009","type":"Fault","message":""}"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Unknown);
    }

    #[test]
    fn timestamps_accept_native_toml_datetimes() {
        let toml = r#"
            captured_at = 2025-09-23T15:00:00Z

            [[devices]]
            id = "DEV001"
            name = "Press"
            status = "running"
            last_seen = 2025-09-23T14:59:30Z

            [[devices]]
            id = "DEV002"
            name = "Lathe"
            status = "idle"
            last_seen = "2025-09-23T14:58:00Z"
        "#;
        let snapshot: FactSnapshot = toml::from_str(toml).unwrap();

        assert_eq!(snapshot.captured_at.map(|ts| ts.as_second()), Some(1_758_639_600));
        assert_eq!(snapshot.devices[0].last_seen.map(|ts| ts.as_second()), Some(1_758_639_570));
        assert_eq!(snapshot.devices[1].last_seen.map(|ts| ts.as_second()), Some(1_758_639_480));

        let json = r#"{"captured_at":null,"devices":[{"id":"DEV001","name":"Press","status":"idle","last_seen":"2025-09-23T14:59:30Z"}]}"#;
        let snapshot: FactSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.captured_at.is_none());
        assert!(snapshot.devices[0].last_seen.is_some());

        assert!(toml::from_str::<FactSnapshot>("captured_at = 2025-09-23T15:00:00").is_err());
    }

    #[test]
    fn alert_kind_is_serialized_as_type() {
        let toml = r#"
            time = "16:00"
            device_id = "DEV001"
            type = "High Temperature"
            message = "Temperature exceeded 30°C"
            severity = "high"
        "#;
        let alert: Alert = toml::from_str(toml).unwrap();
        assert_eq!(alert.kind.as_ref(), "High Temperature");
        assert_eq!(alert.severity, AlertSeverity::High);
        assert_eq!(alert.device_id, DeviceId::from("DEV001"));
    }

    #[test]
    fn oee_is_product_of_factors() {
        let kpis = KpiMetrics::from_factors(pct(90.0), pct(82.0), pct(98.0));
        assert!((kpis.oee.value() - 72.324).abs() < 1e-9);

        let full = KpiMetrics::from_factors(pct(100.0), pct(100.0), pct(100.0));
        assert_eq!(full.oee, pct(100.0));
    }

    #[test]
    fn empty_snapshot_defaults() {
        let snapshot: FactSnapshot = toml::from_str("").unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.kpis, KpiMetrics::default());
        assert!(snapshot.production.is_none());
    }

    #[test]
    fn alerts_for_keeps_order() {
        let alert = |time: &str, device: &str| Alert {
            time: time.into(),
            device_id: DeviceId::from(device),
            kind: "Fault".into(),
            message: "".into(),
            severity: AlertSeverity::High,
        };
        let snapshot = FactSnapshot {
            alerts: vec![alert("1", "A"), alert("2", "B"), alert("3", "A")].into(),
            ..Default::default()
        };

        let id = DeviceId::from("A");
        let times: Vec<_> = snapshot.alerts_for(&id).map(|a| a.time.as_ref()).collect();
        assert_eq!(times, ["1", "3"]);
        assert_eq!(snapshot.unknown_labels(), 0);
    }
}

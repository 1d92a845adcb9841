use iiot_core::{AlertSeverity, DeviceStatus, Percent, TelemetrySample};
use serde::Serialize;

use crate::derive::{ColorToken, KpiBand, StatusIcon};

// View structures borrow from the snapshot they were projected from.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub status: DeviceStatus,
    /// Upper-cased status label for the badge.
    pub badge: String,
    pub color: ColorToken,
    pub icon: StatusIcon,
    pub icon_class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRow<'a> {
    pub time: &'a str,
    pub device_id: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub message: &'a str,
    pub severity: AlertSeverity,
    /// Row classes derived from the severity.
    pub style: &'static str,
    pub badge_color: ColorToken,
}

/// One plotted line of the telemetry chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartLine {
    /// Field of [`TelemetrySample`] the line reads.
    pub key: &'static str,
    /// Legend label.
    pub name: &'static str,
    pub stroke: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryChart<'a> {
    /// X-axis field.
    pub x_key: &'static str,
    pub lines: Vec<ChartLine>,
    /// Samples exactly as the source delivered them.
    pub points: &'a [TelemetrySample],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeView {
    pub title: &'static str,
    pub value: Percent,
    pub fill: &'static str,
    pub band: KpiBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiPanel {
    pub oee: GaugeView,
    /// Availability, performance and quality, in that order.
    pub factors: [GaugeView; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<jiff::Timestamp>,
    pub kpis: KpiPanel,
    pub devices: Vec<DeviceRow<'a>>,
    pub telemetry: TelemetryChart<'a>,
    pub alerts: Vec<AlertRow<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceDetailView<'a> {
    pub device_id: &'a str,
    /// `None` when the snapshot does not know the device.
    pub name: Option<&'a str>,
    pub status: DeviceStatus,
    pub color: ColorToken,
    pub icon: StatusIcon,
    pub last_seen: Option<jiff::Timestamp>,
    pub alerts: Vec<AlertRow<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProductionView {
    pub uptime: Percent,
    pub uptime_band: KpiBand,
    pub units_produced: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsView<'a> {
    pub telemetry: TelemetryChart<'a>,
    pub alert_history: Vec<AlertRow<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<ProductionView>,
}

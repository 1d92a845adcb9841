//! Assembles page-ready views from a [`FactSnapshot`].
//!
//! Projection is pass-through plus attribute derivation: rows keep the
//! order of the snapshot and nothing is filtered or aggregated, except on
//! the device detail page which by definition shows one device.

mod analytics;
mod dashboard;
mod device;
mod models;

use iiot_core::{Alert, Device, DeviceId, FactSnapshot, TelemetrySample};
use serde::Serialize;

pub use models::{
    AlertRow, AnalyticsView, ChartLine, DashboardView, DeviceDetailView, DeviceRow, GaugeView,
    KpiPanel, ProductionView, TelemetryChart,
};

use crate::derive::{
    BandThresholds, severity_color, severity_style, status_color, status_icon,
};

const TEMPERATURE_LINE: ChartLine = ChartLine {
    key: "temperature",
    name: "Temperature (°C)",
    stroke: "#ef4444",
};

const HUMIDITY_LINE: ChartLine = ChartLine {
    key: "humidity",
    name: "Humidity (%)",
    stroke: "#3b82f6",
};

const PRESSURE_LINE: ChartLine = ChartLine {
    key: "pressure",
    name: "Pressure (hPa)",
    stroke: "#64748b",
};

/// Projects snapshots into page views using one set of band thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewProjector {
    thresholds: BandThresholds,
}

impl ViewProjector {
    pub fn new(thresholds: BandThresholds) -> Self {
        Self { thresholds }
    }

    /// Project `page` and serialize it for the presentation layer.
    pub fn render_json(
        &self,
        snapshot: &FactSnapshot,
        page: &Page,
        pretty: bool,
    ) -> serde_json::Result<String> {
        match page {
            Page::Dashboard => to_json(&self.dashboard(snapshot), pretty),
            Page::Analytics => to_json(&self.analytics(snapshot), pretty),
            Page::Device(id) => to_json(&self.device_detail(snapshot, id), pretty),
        }
    }
}

/// Pages the view model can project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Analytics,
    Device(DeviceId),
}

fn to_json<T: Serialize>(view: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(view)
    } else {
        serde_json::to_string(view)
    }
}

pub fn device_row(device: &Device) -> DeviceRow<'_> {
    let icon = status_icon(device.status);
    DeviceRow {
        id: device.id.as_str(),
        name: &device.name,
        status: device.status,
        badge: device.status.as_str().to_ascii_uppercase(),
        color: status_color(device.status),
        icon,
        icon_class: icon.class(),
    }
}

pub fn alert_row(alert: &Alert) -> AlertRow<'_> {
    AlertRow {
        time: &alert.time,
        device_id: alert.device_id.as_str(),
        kind: &alert.kind,
        message: &alert.message,
        severity: alert.severity,
        style: severity_style(alert.severity),
        badge_color: severity_color(alert.severity),
    }
}

/// Chart for `samples`. The pressure line is only plotted when some sample
/// carries a pressure value.
pub fn telemetry_chart(samples: &[TelemetrySample]) -> TelemetryChart<'_> {
    let mut lines = vec![TEMPERATURE_LINE, HUMIDITY_LINE];
    if samples.iter().any(|sample| sample.pressure.is_some()) {
        lines.push(PRESSURE_LINE);
    }

    TelemetryChart {
        x_key: "time",
        lines,
        points: samples,
    }
}

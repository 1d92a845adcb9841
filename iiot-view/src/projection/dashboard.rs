use iiot_core::{FactSnapshot, KpiMetrics, Percent};
use tracing::debug;

use super::{
    DashboardView, GaugeView, KpiPanel, ViewProjector, alert_row, device_row, telemetry_chart,
};

// Factor gauges keep a fixed identity color; only the OEE gauge is filled
// with its band color.
const AVAILABILITY_FILL: &str = "#3b82f6";
const PERFORMANCE_FILL: &str = "#f59e0b";
const QUALITY_FILL: &str = "#10b981";

impl ViewProjector {
    pub fn dashboard<'a>(&self, snapshot: &'a FactSnapshot) -> DashboardView<'a> {
        let view = DashboardView {
            captured_at: snapshot.captured_at,
            kpis: self.kpi_panel(&snapshot.kpis),
            devices: snapshot.devices.iter().map(device_row).collect(),
            telemetry: telemetry_chart(&snapshot.telemetry),
            alerts: snapshot.alerts.iter().map(alert_row).collect(),
        };

        debug!(
            devices = view.devices.len(),
            samples = view.telemetry.points.len(),
            alerts = view.alerts.len(),
            oee_band = ?view.kpis.oee.band,
            "projected dashboard"
        );

        view
    }

    pub fn kpi_panel(&self, kpis: &KpiMetrics) -> KpiPanel {
        let oee_band = self.thresholds.band(kpis.oee.value());

        KpiPanel {
            oee: GaugeView {
                title: "Overall Equipment Effectiveness",
                value: kpis.oee,
                fill: oee_band.color(),
                band: oee_band,
            },
            factors: [
                self.factor_gauge("Availability", kpis.availability, AVAILABILITY_FILL),
                self.factor_gauge("Performance", kpis.performance, PERFORMANCE_FILL),
                self.factor_gauge("Quality", kpis.quality, QUALITY_FILL),
            ],
        }
    }

    fn factor_gauge(&self, title: &'static str, value: Percent, fill: &'static str) -> GaugeView {
        GaugeView {
            title,
            value,
            fill,
            band: self.thresholds.band(value.value()),
        }
    }
}

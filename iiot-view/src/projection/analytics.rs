use iiot_core::FactSnapshot;

use super::{AnalyticsView, ProductionView, ViewProjector, alert_row, telemetry_chart};

impl ViewProjector {
    pub fn analytics<'a>(&self, snapshot: &'a FactSnapshot) -> AnalyticsView<'a> {
        AnalyticsView {
            telemetry: telemetry_chart(&snapshot.telemetry),
            alert_history: snapshot.alerts.iter().map(alert_row).collect(),
            production: snapshot.production.map(|stats| ProductionView {
                uptime: stats.uptime,
                uptime_band: self.thresholds.band(stats.uptime.value()),
                units_produced: stats.units_produced,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use iiot_core::{Percent, ProductionStats};

    use super::*;
    use crate::derive::KpiBand;

    #[test]
    fn production_report() {
        let snapshot = FactSnapshot {
            production: Some(ProductionStats {
                uptime: Percent::new(95.0).unwrap(),
                units_produced: 1200,
            }),
            ..Default::default()
        };

        let view = ViewProjector::default().analytics(&snapshot);
        let production = view.production.unwrap();
        assert_eq!(production.units_produced, 1200);
        assert_eq!(production.uptime_band, KpiBand::Good);
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = FactSnapshot::default();
        let view = ViewProjector::default().analytics(&snapshot);

        assert!(view.alert_history.is_empty());
        assert!(view.telemetry.points.is_empty());
        assert!(view.production.is_none());

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("production").is_none());
        assert_eq!(json["alert_history"], serde_json::json!([]));
    }
}

use std::time::Duration;

use async_trait::async_trait;
use iiot_core::{
    Alert, AlertSeverity, Device, DeviceId, DeviceStatus, FactSnapshot, KpiMetrics, Percent,
    ProductionStats, TelemetrySample,
};
use jiff::{SignedDuration, Timestamp};
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use super::FactSource;

const HIGH_TEMPERATURE: f64 = 30.0;

const MAX_DEVICES: usize = 1_000;
const MAX_SAMPLES: usize = 10_000;

/// Odds, out of 100, that a device raises an alert event on a sample tick.
const ALERT_EVENT_ODDS: u32 = 5;

const ALERT_TYPES: [&str; 3] = [
    "VIBRATION_EXCEEDED_THRESHOLD",
    "TEMPERATURE_CRITICAL",
    "SENSOR_OFFLINE",
];

// "CRITICAL" is outside the closed severity set and reads as unknown.
const SEVERITY_LABELS: [&str; 4] = ["LOW", "MEDIUM", "HIGH", "CRITICAL"];

const ERROR_CODES: [&str; 4] = [
    "E001_Overheat",
    "E002_Jammed",
    "E003_SensorFailure",
    "E004_PowerLoss",
];

#[derive(Debug, Error)]
pub enum SimulatedSourceError {
    #[error("sample interval {0:?} is out of range")]
    Interval(Duration),

    #[error("plant of {device_count} devices and {sample_count} samples is too large to simulate")]
    TooLarge {
        device_count: usize,
        sample_count: usize,
    },

    #[error("time arithmetic failed: {0}")]
    Time(#[from] jiff::Error),
}

/// Source generating a plausible plant on every read.
///
/// Device statuses are drawn with the weights running 70, idle 15, fault 10
/// and maintenance 5. "maintenance" is outside the closed status set and
/// shows up as `unknown`. Telemetry is a plant-level series whose samples
/// are attributed round-robin to the devices when raising alerts. On every
/// sample tick each device may also raise a random alert event.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    device_count: usize,
    sample_count: usize,
    sample_interval: Duration,
}

impl SimulatedSource {
    pub fn new(device_count: usize, sample_count: usize, sample_interval_secs: u64) -> Self {
        Self {
            device_count,
            sample_count,
            sample_interval: Duration::from_secs(sample_interval_secs),
        }
    }

    fn generate(&self, now: Timestamp) -> Result<FactSnapshot, SimulatedSourceError> {
        if self.device_count > MAX_DEVICES || self.sample_count > MAX_SAMPLES {
            return Err(SimulatedSourceError::TooLarge {
                device_count: self.device_count,
                sample_count: self.sample_count,
            });
        }

        let mut rng = rand::rng();
        let interval = SignedDuration::try_from(self.sample_interval)
            .map_err(|_| SimulatedSourceError::Interval(self.sample_interval))?;

        let devices: Vec<Device> = (1..=self.device_count)
            .map(|n| Device {
                id: DeviceId(format!("machine_{n:03}").into()),
                name: format!("Machine {n:03}").into(),
                status: DeviceStatus::parse(random_status_label(&mut rng)),
                last_seen: Some(now),
            })
            .collect();

        let now_label = time_label(now);
        let mut alerts = Vec::new();

        for device in devices.iter().filter(|d| d.status == DeviceStatus::Fault) {
            let code = ERROR_CODES[rng.random_range(0..ERROR_CODES.len())];
            alerts.push(Alert {
                time: now_label.clone().into(),
                device_id: device.id.clone(),
                kind: "Fault".into(),
                message: format!("{code} reported by {}", device.id).into(),
                severity: AlertSeverity::High,
            });
        }

        let mut telemetry = Vec::with_capacity(self.sample_count);
        for i in 0..self.sample_count {
            let steps_back = i32::try_from(self.sample_count - 1 - i)
                .map_err(|_| SimulatedSourceError::Interval(self.sample_interval))?;
            let at = now.checked_sub(interval.checked_mul(steps_back).ok_or(
                SimulatedSourceError::Interval(self.sample_interval),
            )?)?;

            let sample = TelemetrySample {
                time: time_label(at).into(),
                temperature: round2(rng.random_range(20.0..35.0)),
                humidity: round2(rng.random_range(40.0..80.0)),
                pressure: Some(round2(rng.random_range(1005.0..1025.0))),
            };

            if sample.temperature > HIGH_TEMPERATURE && !devices.is_empty() {
                let device = &devices[i % devices.len()];
                alerts.push(Alert {
                    time: sample.time.clone(),
                    device_id: device.id.clone(),
                    kind: "High Temperature".into(),
                    message: format!(
                        "Temperature {:.1}°C exceeded {HIGH_TEMPERATURE}°C",
                        sample.temperature
                    )
                    .into(),
                    severity: AlertSeverity::High,
                });
            }

            for device in devices.iter() {
                if rng.random_ratio(ALERT_EVENT_ODDS, 100) {
                    alerts.push(random_alert(&mut rng, &device.id, &sample.time));
                }
            }

            telemetry.push(sample);
        }

        let kpis = KpiMetrics::from_factors(
            random_factor(&mut rng),
            random_factor(&mut rng),
            random_factor(&mut rng),
        );

        let running = devices
            .iter()
            .filter(|d| d.status == DeviceStatus::Running)
            .count();
        let production = if devices.is_empty() {
            None
        } else {
            let ticks = running
                .checked_mul(self.sample_count)
                .ok_or(SimulatedSourceError::TooLarge {
                    device_count: self.device_count,
                    sample_count: self.sample_count,
                })?;
            let units_produced = (0..ticks).filter(|_| rng.random_ratio(20, 100)).count() as u64;
            Some(ProductionStats {
                uptime: Percent::clamped(running as f64 * 100.0 / devices.len() as f64),
                units_produced,
            })
        };

        debug!(
            devices = devices.len(),
            samples = telemetry.len(),
            alerts = alerts.len(),
            "simulated snapshot"
        );

        Ok(FactSnapshot {
            captured_at: Some(now),
            devices: devices.into(),
            telemetry: telemetry.into(),
            alerts: alerts.into(),
            kpis,
            production,
        })
    }
}

#[async_trait]
impl FactSource for SimulatedSource {
    type Error = SimulatedSourceError;

    async fn read(&self) -> Result<FactSnapshot, Self::Error> {
        self.generate(Timestamp::now())
    }
}

fn random_status_label(rng: &mut impl Rng) -> &'static str {
    match rng.random_range(0..100) {
        0..70 => "running",
        70..85 => "idle",
        85..95 => "fault",
        _ => "maintenance",
    }
}

fn random_alert(rng: &mut impl Rng, device_id: &DeviceId, time: &str) -> Alert {
    let kind = ALERT_TYPES[rng.random_range(0..ALERT_TYPES.len())];
    let severity = SEVERITY_LABELS[rng.random_range(0..SEVERITY_LABELS.len())];

    Alert {
        time: time.into(),
        device_id: device_id.clone(),
        kind: kind.into(),
        message: format!("Alert: {kind} detected on {device_id}").into(),
        severity: AlertSeverity::parse(severity),
    }
}

fn random_factor(rng: &mut impl Rng) -> Percent {
    Percent::clamped(round2(rng.random_range(70.0..=100.0)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn time_label(at: Timestamp) -> String {
    at.strftime("%H:%M").to_string()
}

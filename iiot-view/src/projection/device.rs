use iiot_core::{DeviceId, DeviceStatus, FactSnapshot};
use tracing::debug;

use super::{DeviceDetailView, ViewProjector, alert_row};
use crate::derive::{status_color, status_icon};

impl ViewProjector {
    /// Detail page for one device. Ids the snapshot does not know render
    /// with `unknown` status and no name.
    pub fn device_detail<'a>(
        &self,
        snapshot: &'a FactSnapshot,
        id: &'a DeviceId,
    ) -> DeviceDetailView<'a> {
        let device = snapshot.device(id);
        if device.is_none() {
            debug!(device_id = %id, "device not in snapshot");
        }

        let status = device.map_or(DeviceStatus::Unknown, |device| device.status);

        DeviceDetailView {
            device_id: id.as_str(),
            name: device.map(|device| device.name.as_ref()),
            status,
            color: status_color(status),
            icon: status_icon(status),
            last_seen: device.and_then(|device| device.last_seen),
            alerts: snapshot.alerts_for(id).map(alert_row).collect(),
        }
    }
}

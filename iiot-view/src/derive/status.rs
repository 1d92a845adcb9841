use iiot_core::DeviceStatus;
use serde::Serialize;

use super::ColorToken;

/// Icon shown next to a device row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusIcon {
    CheckCircle,
    Clock,
    AlertTriangle,
    Activity,
}

impl StatusIcon {
    /// Utility classes sizing and tinting the icon.
    pub fn class(self) -> &'static str {
        match self {
            StatusIcon::CheckCircle => "w-4 h-4 text-green-500",
            StatusIcon::Clock => "w-4 h-4 text-yellow-500",
            StatusIcon::AlertTriangle => "w-4 h-4 text-red-500",
            StatusIcon::Activity => "w-4 h-4 text-gray-500",
        }
    }
}

pub fn status_color(status: DeviceStatus) -> ColorToken {
    match status {
        DeviceStatus::Running => ColorToken::Green,
        DeviceStatus::Idle => ColorToken::Yellow,
        DeviceStatus::Fault => ColorToken::Red,
        DeviceStatus::Unknown => ColorToken::Gray,
    }
}

pub fn status_icon(status: DeviceStatus) -> StatusIcon {
    match status {
        DeviceStatus::Running => StatusIcon::CheckCircle,
        DeviceStatus::Idle => StatusIcon::Clock,
        DeviceStatus::Fault => StatusIcon::AlertTriangle,
        DeviceStatus::Unknown => StatusIcon::Activity,
    }
}

pub fn status_color_for(label: &str) -> ColorToken {
    status_color(DeviceStatus::parse(label))
}

pub fn status_icon_for(label: &str) -> StatusIcon {
    status_icon(DeviceStatus::parse(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_table() {
        assert_eq!(status_color(DeviceStatus::Running), ColorToken::Green);
        assert_eq!(status_color(DeviceStatus::Idle), ColorToken::Yellow);
        assert_eq!(status_color(DeviceStatus::Fault), ColorToken::Red);
        assert_eq!(status_color(DeviceStatus::Unknown), ColorToken::Gray);
    }

    #[test]
    fn icon_table() {
        assert_eq!(status_icon(DeviceStatus::Running), StatusIcon::CheckCircle);
        assert_eq!(status_icon(DeviceStatus::Idle), StatusIcon::Clock);
        assert_eq!(status_icon(DeviceStatus::Fault), StatusIcon::AlertTriangle);
        assert_eq!(status_icon(DeviceStatus::Unknown), StatusIcon::Activity);
    }

    #[test]
    fn unrecognized_labels_fall_back_to_gray() {
        for label in ["maintenance", "", "RUNNING!", "null"] {
            assert_eq!(status_color_for(label), ColorToken::Gray, "{label}");
            assert_eq!(status_icon_for(label), StatusIcon::Activity, "{label}");
        }
        assert_eq!(status_color_for("Running"), ColorToken::Green);
    }

    #[test]
    fn icon_class_matches_color() {
        for status in DeviceStatus::ALL {
            let icon = status_icon(status);
            let tint = format!("text-{}-500", status_color(status).as_str());
            assert!(icon.class().ends_with(&tint), "{status}: {}", icon.class());
        }
    }
}

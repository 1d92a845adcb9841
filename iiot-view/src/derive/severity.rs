use iiot_core::AlertSeverity;

use super::ColorToken;

/// Row classes for an alert: a tinted background and a left border.
pub fn severity_style(severity: AlertSeverity) -> &'static str {
    match severity {
        AlertSeverity::High => "bg-red-50 border-l-4 border-red-500",
        AlertSeverity::Medium => "bg-yellow-50 border-l-4 border-yellow-500",
        AlertSeverity::Low => "bg-green-50 border-l-4 border-green-500",
        AlertSeverity::Unknown => "bg-gray-50 border-l-4 border-gray-500",
    }
}

/// Color of the alert type badge.
pub fn severity_color(severity: AlertSeverity) -> ColorToken {
    match severity {
        AlertSeverity::High => ColorToken::Red,
        AlertSeverity::Medium => ColorToken::Yellow,
        AlertSeverity::Low => ColorToken::Green,
        AlertSeverity::Unknown => ColorToken::Gray,
    }
}

pub fn severity_style_for(label: &str) -> &'static str {
    severity_style(AlertSeverity::parse(label))
}

pub fn severity_color_for(label: &str) -> ColorToken {
    severity_color(AlertSeverity::parse(label))
}

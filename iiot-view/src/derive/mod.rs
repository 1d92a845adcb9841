//! Pure mappings from fact values to presentation attributes.
//!
//! Every mapping is total: closed enums are matched exhaustively and the
//! `*_for` variants accept raw labels, routing anything unrecognized to the
//! `unknown` arm.

mod kpi;
mod severity;
mod status;

use serde::Serialize;

pub use kpi::{BandThresholds, KpiBand, ThresholdError, band};
pub use severity::{severity_color, severity_color_for, severity_style, severity_style_for};
pub use status::{StatusIcon, status_color, status_color_for, status_icon, status_icon_for};

/// Named color token understood by the presentation layer's badge components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Green,
    Yellow,
    Red,
    Gray,
}

impl ColorToken {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorToken::Green => "green",
            ColorToken::Yellow => "yellow",
            ColorToken::Red => "red",
            ColorToken::Gray => "gray",
        }
    }
}

//! Selected-output formatting
//!
//! Resolves a possibly-directional result selection into the string the
//! results table shows for a requested direction.

use lbp_schema::{LinkDirection, SelectedModcod, SelectedOutput};

/// Placeholder for an empty slot
pub const EMPTY_VALUE: &str = "-";

fn format_modcod(modcod: &SelectedModcod) -> String {
    match (modcod.modulation.as_deref(), modcod.code_rate.as_deref()) {
        (Some(modulation), Some(code_rate)) => format!("{modulation} {code_rate}"),
        (Some(modulation), None) => modulation.to_string(),
        (None, Some(code_rate)) => code_rate.to_string(),
        (None, None) => modcod
            .id
            .clone()
            .unwrap_or_else(|| EMPTY_VALUE.to_string()),
    }
}

/// Format a selection for display
///
/// Flat selections ignore the requested direction. Directional selections
/// resolve only the requested slot when a direction is given; with no
/// direction, downlink is preferred, falling back to uplink. Empty slots
/// format as `-`.
#[must_use]
pub fn format_selection(value: &SelectedOutput, direction: Option<LinkDirection>) -> String {
    match value {
        SelectedOutput::Flat(modcod) => format_modcod(modcod),
        SelectedOutput::Directional { uplink, downlink } => {
            let slot = match direction {
                Some(LinkDirection::Uplink) => uplink.as_ref(),
                Some(LinkDirection::Downlink) => downlink.as_ref(),
                None => downlink.as_ref().or(uplink.as_ref()),
            };
            slot.map_or_else(|| EMPTY_VALUE.to_string(), format_modcod)
        }
    }
}

//! # Format Commands
//!
//! Input masks and BRL currency text for the form fields. These never
//! fail: any input produces a display string.

use serde::Serialize;
use tracing::debug;

use celidone_core::mask::{self, MaskType};
use celidone_core::money;

use crate::protocol::{AmountArg, MaskArg, TextArg};

/// Mask detection result.
///
/// ## Example Response
/// ```json
/// { "type": "cnpj", "mask": "##.###.###/####-##" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedMask {
    #[serde(rename = "type")]
    pub mask_type: MaskType,
    pub mask: Option<&'static str>,
}

pub fn apply_mask(arg: MaskArg) -> String {
    debug!(mask = %arg.mask, "apply_mask command");
    mask::apply_mask(&arg.value, &arg.mask)
}

pub fn remove_mask(arg: TextArg) -> String {
    debug!("remove_mask command");
    mask::remove_mask(&arg.value)
}

pub fn detect_mask_type(arg: TextArg) -> DetectedMask {
    let mask_type = mask::detect_mask_type(&arg.value);
    debug!(%mask_type, "detect_mask_type command");
    DetectedMask {
        mask_type,
        mask: mask_type.template(),
    }
}

pub fn auto_mask(arg: TextArg) -> String {
    debug!("auto_mask command");
    mask::auto_mask(&arg.value)
}

/// `null` formats as `R$ 0,00`.
pub fn format_currency(arg: AmountArg) -> String {
    debug!(value = ?arg.value, "format_currency command");
    money::format_currency(arg.value.unwrap_or(0.0))
}

pub fn parse_currency(arg: TextArg) -> f64 {
    debug!("parse_currency command");
    money::parse_currency(&arg.value)
}

pub fn mask_currency_input(arg: TextArg) -> String {
    debug!("mask_currency_input command");
    money::mask_currency_input(&arg.value)
}

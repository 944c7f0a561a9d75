//! Comparators for single-valued attributes.

use super::Fields;
use sdp_parser::Direction;

pub(crate) fn ptime(ptime: f64, fields: &mut Fields<'_>) {
    fields.float("milliseconds", ptime);
}

pub(crate) fn framerate(rate: f64, fields: &mut Fields<'_>) {
    fields.float("rate", rate);
}

pub(crate) fn mid(mid: &str, fields: &mut Fields<'_>) {
    fields.text("id", mid);
}

pub(crate) fn direction(direction: Direction, fields: &mut Fields<'_>) {
    fields.text("direction", direction.as_str());
}

pub(crate) fn generic(name: &str, value: Option<&str>, fields: &mut Fields<'_>) {
    fields.text("name", name);
    fields.optional_text("value", value);
}

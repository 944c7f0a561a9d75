//! `a=rtcp` comparator.
//!
//! Fields: port, then optionally network type, address type and address.
//! A single `Absent` after the port expects no address; a single `Any`
//! accepts either.

use super::Fields;
use crate::value::TypedValue;
use sdp_parser::Rtcp;

pub(crate) fn compare(rtcp: &Rtcp, fields: &mut Fields<'_>) {
    fields.int("port", i64::from(rtcp.port));

    match (&rtcp.address, fields.peek()) {
        (_, Some(TypedValue::Any)) if fields.remaining() == 1 => fields.skip_rest(),
        (None, None) => {}
        (None, Some(TypedValue::Absent)) => fields.optional_text("address", None),
        (None, Some(_)) => {
            fields.failure("address", "parsed rtcp has no address but the spec lists one");
            fields.skip_rest();
        }
        (Some(address), Some(TypedValue::Absent)) => {
            fields.optional_text("address", Some(&address.address))
        }
        (Some(address), Some(_)) => {
            fields.text("net_type", &address.net_type);
            fields.text("addr_type", &address.addr_type);
            fields.text("address", &address.address);
        }
        (Some(address), None) => fields.failure(
            "address",
            format!(
                "parsed address {} but the spec does not list one",
                address.address
            ),
        ),
    }
}

//! `a=rtpmap` comparator.
//!
//! Fields: payload type, encoding name, clock rate, then optionally the
//! encoding parameters (channel count) as an integer or `Absent`.

use super::Fields;
use sdp_parser::Rtpmap;

pub(crate) fn compare(rtpmap: &Rtpmap, fields: &mut Fields<'_>) {
    fields.int("payload_type", i64::from(rtpmap.payload_type));
    fields.text("encoding_name", &rtpmap.encoding_name);
    fields.int("clock_rate", i64::from(rtpmap.clock_rate));

    if fields.remaining() > 0 {
        fields.optional_int("channels", rtpmap.channels.map(i64::from));
    } else if let Some(channels) = rtpmap.channels {
        fields.failure(
            "channels",
            format!("parsed {} channel(s) but the spec does not list any", channels),
        );
    }
}

//! `a=fmtp` comparator.
//!
//! Fields: format, then a (name, value) pair per parameter in declaration
//! order. Values keep their kind: `width=1920` is compared as an integer,
//! `exactframerate=29.97` as a float, `TCS=SDR` as text and a bare
//! `interlace` against `Absent`.

use super::Fields;
use sdp_parser::Fmtp;

pub(crate) fn compare(fmtp: &Fmtp, fields: &mut Fields<'_>) {
    fields.int("format", i64::from(fmtp.format));

    let expected = (fields.remaining() + 1) / 2;
    fields.count("param_count", fmtp.params.len(), expected);

    for idx in 0..expected {
        match fmtp.params.get(idx) {
            Some(param) => {
                fields.text(&format!("params[{}].name", idx), &param.name);
                fields.param_value(&format!("params[{}].{}", idx, param.name), &param.value);
            }
            None => break,
        }
    }
    fields.skip_rest();
}

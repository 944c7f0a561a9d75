//! `a=source-filter` comparator.
//!
//! Fields: mode, network type, address type, destination, then one text
//! field per source address.

use super::Fields;
use sdp_parser::SourceFilter;

pub(crate) fn compare(filter: &SourceFilter, fields: &mut Fields<'_>) {
    fields.text("mode", filter.mode.as_str());
    fields.text("net_type", &filter.net_type);
    fields.text("addr_type", &filter.addr_type);
    fields.text("destination", &filter.destination);

    let expected = fields.remaining();
    fields.count("source_count", filter.sources.len(), expected);
    for (idx, source) in filter.sources.iter().take(expected).enumerate() {
        fields.text(&format!("sources[{}]", idx), source);
    }
    // Sources the parser did not produce are already counted above.
    fields.skip_rest();
}

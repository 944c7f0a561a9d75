//! `a=group` comparator.
//!
//! Fields: semantic, then (tag, media reference) per tag. Each parsed tag is
//! resolved against the `a=mid` values of the session's media sections; a
//! tag no media section claims resolves to [`MediaRef::Session`].

use super::Fields;
use crate::value::MediaRef;
use sdp_parser::{Group, Session};

pub(crate) fn compare(session: &Session, group: &Group, fields: &mut Fields<'_>) {
    fields.text("semantic", &group.semantic);

    let expected = (fields.remaining() + 1) / 2;
    fields.count("tag_count", group.tags.len(), expected);

    for (idx, tag) in group.tags.iter().take(expected).enumerate() {
        fields.text(&format!("tags[{}].name", idx), tag);
        let resolved = session
            .media_for_mid(tag)
            .map_or(MediaRef::Session, |(media_idx, _)| MediaRef::Media(media_idx));
        fields.media_ref(&format!("tags[{}].media", idx), resolved);
    }
    fields.skip_rest();
}

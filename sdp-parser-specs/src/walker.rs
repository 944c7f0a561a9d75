//! Walks a parsed [`Session`] alongside a [`SessionSpec`].

use crate::diagnostic::{self, Location};
use crate::dispatch::assert_attribute_in;
use crate::validator::{AttributeSpec, FormatSpec, MediaSpec, SessionSpec};
use sdp_parser::{Attribute, Format, Media, Session};
use tracing::debug;

/// Compare `session` with `spec` and return the number of failures.
///
/// A count mismatch is reported once and skips the list it concerns; the
/// rest of the tree is still compared. A [`MediaSpec`] without formats
/// leaves the media's formats unchecked. Neither tree is modified, so
/// repeated calls return the same count.
pub fn assert_session(session: &Session, spec: &SessionSpec) -> usize {
    let mut failures = 0;

    if count_matches("session.media_count", session.media_count(), spec.media_count()) {
        for (idx, (media, media_spec)) in session.medias.iter().zip(&spec.medias).enumerate() {
            failures += assert_media(session, idx, media, media_spec);
        }
    } else {
        failures += 1;
    }

    if count_matches(
        "session.attribute_count",
        session.attribute_count(),
        spec.session_attribute_count(),
    ) {
        failures += assert_attributes(session, "session", &session.attributes, &spec.attributes);
    } else {
        failures += 1;
    }

    debug!(failures, "session walk finished");
    failures
}

fn assert_media(session: &Session, idx: usize, media: &Media, spec: &MediaSpec) -> usize {
    let scope = format!("media[{}]", idx);
    let mut failures = 0;

    if !spec.formats.is_empty() {
        failures += assert_formats(&scope, media, spec);
    }

    if count_matches(
        &format!("{}.attribute_count", scope),
        media.attribute_count(),
        spec.attribute_count(),
    ) {
        failures += assert_attributes(session, &scope, &media.attributes, &spec.attributes);
    } else {
        failures += 1;
    }

    debug!(media = idx, failures, "media section compared");
    failures
}

fn assert_formats(scope: &str, media: &Media, spec: &MediaSpec) -> usize {
    if !count_matches(
        &format!("{}.format_count", scope),
        media.format_count(),
        spec.format_count(),
    ) {
        return 1;
    }
    media
        .formats
        .iter()
        .zip(&spec.formats)
        .enumerate()
        .map(|(idx, (format, format_spec))| {
            assert_format(&format!("{}.format[{}]", scope, idx), format, format_spec)
        })
        .sum()
}

fn assert_format(scope: &str, format: &Format, spec: &FormatSpec) -> usize {
    let location = Location::new(file!(), line!());
    let id = diagnostic::assert_int("parsed", i64::from(format.id), "expected", i64::from(spec.id));
    let sub_type = diagnostic::assert_text(
        "parsed",
        format.sub_type.as_str(),
        "expected",
        spec.sub_type.as_str(),
    );
    diagnostic::report(id, &format!("{}.id", scope), location) as usize
        + diagnostic::report(sub_type, &format!("{}.sub_type", scope), location) as usize
}

fn assert_attributes(
    session: &Session,
    scope: &str,
    attributes: &[Attribute],
    specs: &[AttributeSpec],
) -> usize {
    attributes
        .iter()
        .zip(specs)
        .enumerate()
        .map(|(idx, (attribute, spec))| {
            assert_attribute_in(
                session,
                attribute,
                spec,
                &format!("{}.attribute[{}]", scope, idx),
            )
        })
        .sum()
}

fn count_matches(label: &str, actual: usize, expected: usize) -> bool {
    let outcome = diagnostic::assert_int("parsed", actual as i64, "expected", expected as i64);
    !diagnostic::report(outcome, label, Location::new(file!(), line!()))
}

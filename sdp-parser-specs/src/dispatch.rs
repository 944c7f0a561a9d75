//! Attribute dispatch: routes a parsed attribute and its spec entry to the
//! comparator for the entry's kind.

use crate::comparators::{fmtp, group, rtcp, rtpmap, scalar, source_filter, Fields};
use crate::diagnostic::{self, Location};
use crate::validator::AttributeSpec;
use sdp_parser::{Attribute, Session};
use tracing::trace;

/// Compare one parsed attribute with its spec entry. Returns the number of
/// failures reported.
pub fn assert_attribute(session: &Session, attribute: &Attribute, spec: &AttributeSpec) -> usize {
    assert_attribute_in(session, attribute, spec, "attribute")
}

/// Like [`assert_attribute`], prefixing diagnostics with `scope`
/// (e.g. `media[1].attribute[3]`).
pub fn assert_attribute_in(
    session: &Session,
    attribute: &Attribute,
    spec: &AttributeSpec,
    scope: &str,
) -> usize {
    let expected_kind = match spec.comparator.attribute_kind() {
        Some(kind) => kind,
        None => {
            trace!(scope, "attribute not checked");
            return 0;
        }
    };

    if attribute.kind() != expected_kind {
        diagnostic::fail(
            &format!("{} {}", scope, spec.comparator),
            format!(
                "parsed a `{}` attribute where `{}` is expected",
                attribute.kind(),
                expected_kind
            ),
            Location::new(file!(), line!()),
        );
        return 1;
    }

    trace!(scope, comparator = %spec.comparator, "comparing attribute");
    let mut fields = Fields::new(scope, spec.comparator, &spec.fields);
    match attribute {
        Attribute::Rtpmap(attr) => rtpmap::compare(attr, &mut fields),
        Attribute::Fmtp(attr) => fmtp::compare(attr, &mut fields),
        Attribute::Ptime(value) => scalar::ptime(*value, &mut fields),
        Attribute::Framerate(value) => scalar::framerate(*value, &mut fields),
        Attribute::Group(attr) => group::compare(session, attr, &mut fields),
        Attribute::Mid(mid) => scalar::mid(mid, &mut fields),
        Attribute::SourceFilter(attr) => source_filter::compare(attr, &mut fields),
        Attribute::Rtcp(attr) => rtcp::compare(attr, &mut fields),
        Attribute::Direction(direction) => scalar::direction(*direction, &mut fields),
        Attribute::Generic { name, value } => {
            scalar::generic(name, value.as_deref(), &mut fields)
        }
    }
    fields.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::take_journal;
    use crate::validator::{Comparator, GroupSpec};
    use crate::value::{MediaRef, TypedValue};
    use sdp_parser::{parse, Direction, FilterMode};

    const SDP: &str = "v=0
o=- 1 1 IN IP4 10.0.0.1
s=dispatch
t=0 0
a=group:DUP primary secondary
a=group:LS primary orphan
a=sendonly
a=ts-refclk:ptp=IEEE1588-2008:39-A7-94-FF-FE-07-CB-D0:37
m=audio 5004 RTP/AVP 97
c=IN IP4 239.0.0.1/32
a=rtpmap:97 L24/48000/2
a=ptime:1
a=mid:primary
a=source-filter: incl IN IP4 239.0.0.1 10.0.0.1
a=rtcp:5005 IN IP4 10.0.0.1
m=audio 5006 RTP/AVP 97
c=IN IP4 239.0.0.2/32
a=rtpmap:97 L24/48000/2
a=mid:secondary
a=framerate:25
";

    fn session() -> Session {
        parse(SDP).unwrap()
    }

    #[test]
    fn test_matching_attributes() {
        let session = session();
        let media = &session.medias[0];

        let cases = vec![
            (
                &session.attributes[0],
                AttributeSpec::group(
                    GroupSpec::new("DUP")
                        .tag("primary", MediaRef::Media(0))
                        .tag("secondary", MediaRef::Media(1)),
                ),
            ),
            (
                &session.attributes[1],
                AttributeSpec::group(
                    GroupSpec::new("LS")
                        .tag("primary", MediaRef::Media(0))
                        .tag("orphan", MediaRef::Session),
                ),
            ),
            (
                &session.attributes[2],
                AttributeSpec::direction(Direction::SendOnly),
            ),
            (
                &session.attributes[3],
                AttributeSpec::generic(
                    "ts-refclk",
                    Some("ptp=IEEE1588-2008:39-A7-94-FF-FE-07-CB-D0:37"),
                ),
            ),
            (
                &media.attributes[0],
                AttributeSpec::rtpmap_channels(97, "L24", 48000, 2),
            ),
            (&media.attributes[1], AttributeSpec::ptime(1.0)),
            (&media.attributes[2], AttributeSpec::mid("primary")),
            (
                &media.attributes[3],
                AttributeSpec::source_filter(
                    FilterMode::Include,
                    "IN",
                    "IP4",
                    "239.0.0.1",
                    &["10.0.0.1"],
                ),
            ),
            (
                &media.attributes[4],
                AttributeSpec::rtcp(5005)
                    .field("IN")
                    .field("IP4")
                    .field("10.0.0.1"),
            ),
            (
                &session.medias[1].attributes[2],
                AttributeSpec::framerate(25.0),
            ),
        ];

        for (attribute, spec) in &cases {
            assert_eq!(
                assert_attribute(&session, attribute, spec),
                0,
                "{:?} vs {:?}",
                attribute,
                spec
            );
        }
    }

    #[test]
    fn test_ignore_accepts_anything() {
        let session = session();
        for attribute in &session.attributes {
            assert_eq!(assert_attribute(&session, attribute, &AttributeSpec::ignore()), 0);
        }
    }

    #[test]
    fn test_any_field_skips_one_slot() {
        take_journal();
        let session = session();
        let rtpmap = &session.medias[0].attributes[0];

        let spec = AttributeSpec::new(Comparator::Rtpmap)
            .field(97)
            .field("L24")
            .field(TypedValue::Any)
            .field(2);
        assert_eq!(assert_attribute(&session, rtpmap, &spec), 0);

        let spec = AttributeSpec::new(Comparator::Rtpmap)
            .field(97)
            .field("L16")
            .field(TypedValue::Any)
            .field(2);
        assert_eq!(assert_attribute(&session, rtpmap, &spec), 1);
        let journal = take_journal();
        assert_eq!(journal.len(), 1);
        assert!(journal[0].contains("rtpmap.encoding_name"));

        let mut group = AttributeSpec::group(
            GroupSpec::new("DUP")
                .tag("primary", MediaRef::Media(0))
                .tag("secondary", MediaRef::Session),
        );
        group.fields[4] = TypedValue::Any;
        assert_eq!(assert_attribute(&session, &session.attributes[0], &group), 0);
    }

    #[test]
    fn test_wrong_attribute_kind() {
        take_journal();
        let session = session();
        let failures = assert_attribute(
            &session,
            &session.medias[0].attributes[0],
            &AttributeSpec::fmtp(97),
        );
        assert_eq!(failures, 1);
        let journal = take_journal();
        assert!(journal[0].contains("parsed a `rtpmap` attribute where `fmtp` is expected"));
    }

    #[test]
    fn test_perturbed_field_names_comparator() {
        take_journal();
        let session = session();
        let failures = assert_attribute(
            &session,
            &session.medias[0].attributes[0],
            &AttributeSpec::rtpmap_channels(97, "L24", 44100, 2),
        );
        assert_eq!(failures, 1);
        let journal = take_journal();
        assert_eq!(journal.len(), 1);
        assert!(journal[0].contains("rtpmap.clock_rate"));
        assert!(journal[0].contains("parsed is 48000, expected is 44100"));
    }

    #[test]
    fn test_int_against_text_is_kind_mismatch() {
        take_journal();
        let session = session();
        let spec = AttributeSpec::new(Comparator::Mid).field(5);
        let failures = assert_attribute(&session, &session.medias[0].attributes[2], &spec);
        assert_eq!(failures, 1);
        assert!(take_journal()[0].contains("spec holds integer(5) where text is compared"));
    }

    #[test]
    fn test_short_field_list_fails() {
        take_journal();
        let session = session();
        let spec = AttributeSpec::new(Comparator::Rtpmap).field(97).field("L24");
        // clock_rate missing, channels parsed but not listed
        let failures = assert_attribute(&session, &session.medias[0].attributes[0], &spec);
        assert_eq!(failures, 2);
        let journal = take_journal();
        assert!(journal[0].contains("rtpmap.clock_rate"));
        assert!(journal[0].contains("spec has no field 2"));
    }

    #[test]
    fn test_extra_fields_fail() {
        let session = session();
        let spec = AttributeSpec::ptime(1.0).field(2.0);
        assert_eq!(
            assert_attribute(&session, &session.medias[0].attributes[1], &spec),
            1
        );
    }

    #[test]
    fn test_group_reference_mismatch() {
        take_journal();
        let session = session();
        let spec = AttributeSpec::group(
            GroupSpec::new("DUP")
                .tag("primary", MediaRef::Media(0))
                .tag("secondary", MediaRef::Session),
        );
        assert_eq!(assert_attribute(&session, &session.attributes[0], &spec), 1);
        let journal = take_journal();
        assert!(journal[0].contains("group.tags[1].media"));
        assert!(journal[0].contains("parsed is media[1], expected is session"));
    }

    #[test]
    fn test_generic_absent_value() {
        let session = parse("v=0\no=- 1 1 IN IP4 10.0.0.1\ns=x\nt=0 0\na=quality\n").unwrap();
        let spec = AttributeSpec::generic("quality", None);
        assert_eq!(assert_attribute(&session, &session.attributes[0], &spec), 0);
        let spec = AttributeSpec::generic("quality", Some("10"));
        assert_eq!(assert_attribute(&session, &session.attributes[0], &spec), 1);
    }

    #[test]
    fn test_scope_prefix() {
        take_journal();
        let session = session();
        assert_attribute_in(
            &session,
            &session.attributes[2],
            &AttributeSpec::direction(Direction::RecvOnly),
            "session.attribute[2]",
        );
        let journal = take_journal();
        assert!(journal[0].contains("session.attribute[2] direction.direction failed"));
    }
}

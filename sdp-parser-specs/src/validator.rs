//! Expected-shape trees.
//!
//! A [`SessionSpec`] mirrors the structure of a parsed
//! [`Session`](sdp_parser::Session): session attributes, then media sections
//! with their formats and attributes. Every list is positional; entry `i` of
//! a spec list is compared with entry `i` of the parsed list.
//!
//! ```
//! use sdp_parser::SubType;
//! use sdp_parser_specs::{AttributeSpec, FormatSpec, GroupSpec, MediaRef, MediaSpec, SessionSpec};
//!
//! let spec = SessionSpec::new()
//!     .attribute(AttributeSpec::group(
//!         GroupSpec::new("DUP")
//!             .tag("primary", MediaRef::Media(0))
//!             .tag("secondary", MediaRef::Media(1)),
//!     ))
//!     .media(
//!         MediaSpec::new()
//!             .format(FormatSpec::new(96, SubType::Raw))
//!             .attribute(AttributeSpec::rtpmap(96, "raw", 90000))
//!             .attribute(AttributeSpec::mid("primary")),
//!     )
//!     .media(
//!         MediaSpec::new()
//!             .format(FormatSpec::new(96, SubType::Raw))
//!             .attribute(AttributeSpec::rtpmap(96, "raw", 90000))
//!             .attribute(AttributeSpec::mid("secondary")),
//!     );
//!
//! assert_eq!(spec.media_count(), 2);
//! assert!(spec.validate().is_ok());
//! ```

use crate::errors::{SpecError, SpecResult};
use crate::value::{MediaRef, TypedValue};
use sdp_parser::{AttributeKind, Direction, FilterMode, SubType};
use std::fmt;

pub const MAX_MEDIAS: usize = 40;
pub const MAX_SESSION_ATTRIBUTES: usize = 20;
pub const MAX_MEDIA_ATTRIBUTES: usize = 20;
pub const MAX_MEDIA_FORMATS: usize = 10;
pub const MAX_ATTRIBUTE_FIELDS: usize = 10;
pub const MAX_GROUP_TAGS: usize = 10;
pub const MAX_FMTP_PARAMS: usize = 20;

/// Which comparator checks an attribute spec entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Rtpmap,
    Fmtp,
    Ptime,
    Framerate,
    Group,
    Mid,
    SourceFilter,
    Rtcp,
    Direction,
    Generic,
    /// Accepts any parsed attribute without looking at it.
    Ignore,
}

impl Comparator {
    /// The parsed attribute kind this comparator understands.
    pub fn attribute_kind(&self) -> Option<AttributeKind> {
        match self {
            Comparator::Rtpmap => Some(AttributeKind::Rtpmap),
            Comparator::Fmtp => Some(AttributeKind::Fmtp),
            Comparator::Ptime => Some(AttributeKind::Ptime),
            Comparator::Framerate => Some(AttributeKind::Framerate),
            Comparator::Group => Some(AttributeKind::Group),
            Comparator::Mid => Some(AttributeKind::Mid),
            Comparator::SourceFilter => Some(AttributeKind::SourceFilter),
            Comparator::Rtcp => Some(AttributeKind::Rtcp),
            Comparator::Direction => Some(AttributeKind::Direction),
            Comparator::Generic => Some(AttributeKind::Generic),
            Comparator::Ignore => None,
        }
    }

    /// Largest field list an entry for this comparator may carry.
    pub fn field_capacity(&self) -> usize {
        match self {
            Comparator::Group => 1 + 2 * MAX_GROUP_TAGS,
            Comparator::Fmtp => 1 + 2 * MAX_FMTP_PARAMS,
            _ => MAX_ATTRIBUTE_FIELDS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self.attribute_kind() {
            Some(kind) => kind.as_str(),
            None => "ignore",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expected shape of one attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSpec {
    pub comparator: Comparator,
    pub fields: Vec<TypedValue>,
}

impl AttributeSpec {
    pub fn new(comparator: Comparator) -> Self {
        Self {
            comparator,
            fields: Vec::new(),
        }
    }

    /// Append one expected field.
    pub fn field(mut self, value: impl Into<TypedValue>) -> Self {
        self.fields.push(value.into());
        self
    }

    pub fn ignore() -> Self {
        Self::new(Comparator::Ignore)
    }

    /// `a=rtpmap` without encoding parameters.
    pub fn rtpmap(payload_type: u32, encoding: &str, clock_rate: u32) -> Self {
        Self::new(Comparator::Rtpmap)
            .field(payload_type)
            .field(encoding)
            .field(clock_rate)
    }

    /// `a=rtpmap` with a channel count.
    pub fn rtpmap_channels(
        payload_type: u32,
        encoding: &str,
        clock_rate: u32,
        channels: u32,
    ) -> Self {
        Self::rtpmap(payload_type, encoding, clock_rate).field(channels)
    }

    /// `a=fmtp` header; chain [`param`](Self::param) and [`flag`](Self::flag).
    pub fn fmtp(format: u32) -> Self {
        Self::new(Comparator::Fmtp).field(format)
    }

    pub fn param(self, name: &str, value: impl Into<TypedValue>) -> Self {
        self.field(name).field(value)
    }

    /// A parameter given without a value.
    pub fn flag(self, name: &str) -> Self {
        self.field(name).field(TypedValue::Absent)
    }

    pub fn ptime(milliseconds: f64) -> Self {
        Self::new(Comparator::Ptime).field(milliseconds)
    }

    pub fn framerate(rate: f64) -> Self {
        Self::new(Comparator::Framerate).field(rate)
    }

    pub fn mid(id: &str) -> Self {
        Self::new(Comparator::Mid).field(id)
    }

    pub fn direction(direction: Direction) -> Self {
        Self::new(Comparator::Direction).field(direction.as_str())
    }

    pub fn rtcp(port: u16) -> Self {
        Self::new(Comparator::Rtcp).field(port)
    }

    pub fn source_filter(
        mode: FilterMode,
        net_type: &str,
        addr_type: &str,
        destination: &str,
        sources: &[&str],
    ) -> Self {
        let spec = Self::new(Comparator::SourceFilter)
            .field(mode.as_str())
            .field(net_type)
            .field(addr_type)
            .field(destination);
        sources.iter().fold(spec, |spec, src| spec.field(*src))
    }

    pub fn generic(name: &str, value: Option<&str>) -> Self {
        Self::new(Comparator::Generic).field(name).field(value)
    }

    /// Lower a [`GroupSpec`] into the group field layout:
    /// semantic, then tag name and media reference per tag.
    pub fn group(group: GroupSpec) -> Self {
        let spec = Self::new(Comparator::Group).field(group.semantic);
        group
            .tags
            .into_iter()
            .fold(spec, |spec, tag| spec.field(tag.name).field(tag.media))
    }
}

/// One expected `m=` format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub id: u32,
    pub sub_type: SubType,
}

impl FormatSpec {
    pub fn new(id: u32, sub_type: SubType) -> Self {
        Self { id, sub_type }
    }
}

/// One expected group tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTagSpec {
    pub name: String,
    /// The media section the tag must resolve to through `a=mid`;
    /// [`MediaRef::Session`] when it must not resolve to any.
    pub media: MediaRef,
}

/// Expected `a=group` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    pub semantic: String,
    pub tags: Vec<GroupTagSpec>,
}

impl GroupSpec {
    pub fn new(semantic: &str) -> Self {
        Self {
            semantic: semantic.to_string(),
            tags: Vec::new(),
        }
    }

    pub fn tag(mut self, name: &str, media: MediaRef) -> Self {
        self.tags.push(GroupTagSpec {
            name: name.to_string(),
            media,
        });
        self
    }
}

/// Expected media section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaSpec {
    pub formats: Vec<FormatSpec>,
    pub attributes: Vec<AttributeSpec>,
}

impl MediaSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: FormatSpec) -> Self {
        self.formats.push(format);
        self
    }

    pub fn attribute(mut self, attribute: AttributeSpec) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn format_count(&self) -> usize {
        self.formats.len()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }
}

/// Expected session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSpec {
    pub attributes: Vec<AttributeSpec>,
    pub medias: Vec<MediaSpec>,
}

impl SessionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, attribute: AttributeSpec) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn media(mut self, media: MediaSpec) -> Self {
        self.medias.push(media);
        self
    }

    pub fn media_count(&self) -> usize {
        self.medias.len()
    }

    pub fn session_attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Check every list against its capacity limit.
    pub fn validate(&self) -> SpecResult<()> {
        check_capacity("media list", self.medias.len(), MAX_MEDIAS)?;
        check_capacity(
            "session attribute list",
            self.attributes.len(),
            MAX_SESSION_ATTRIBUTES,
        )?;
        for (idx, attr) in self.attributes.iter().enumerate() {
            check_fields(&format!("session attribute {}", idx), attr)?;
        }

        for (media_idx, media) in self.medias.iter().enumerate() {
            check_capacity(
                &format!("media {} format list", media_idx),
                media.formats.len(),
                MAX_MEDIA_FORMATS,
            )?;
            check_capacity(
                &format!("media {} attribute list", media_idx),
                media.attributes.len(),
                MAX_MEDIA_ATTRIBUTES,
            )?;
            for (idx, attr) in media.attributes.iter().enumerate() {
                check_fields(&format!("media {} attribute {}", media_idx, idx), attr)?;
            }
        }
        Ok(())
    }
}

fn check_capacity(what: &str, count: usize, limit: usize) -> SpecResult<()> {
    if count > limit {
        Err(SpecError::capacity(what, count, limit))
    } else {
        Ok(())
    }
}

fn check_fields(what: &str, attr: &AttributeSpec) -> SpecResult<()> {
    check_capacity(
        &format!("{} ({}) field list", what, attr.comparator),
        attr.fields.len(),
        attr.comparator.field_capacity(),
    )
}

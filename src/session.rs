//! Parsed session graph.
//!
//! A [`Session`] owns its session-level attributes and its [`Media`]
//! sections, which in turn own their [`Format`]s and attributes. Every list
//! preserves the order in which the lines appeared in the source text.

use crate::attribute::Attribute;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// A fully parsed SDP document.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub version: u32,
    pub origin: Origin,
    pub name: String,
    pub information: Option<String>,
    pub uri: Option<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub connection: Option<Connection>,
    pub bandwidths: Vec<Bandwidth>,
    pub timings: Vec<Timing>,
    pub attributes: Vec<Attribute>,
    pub medias: Vec<Media>,
}

impl Session {
    pub fn media_count(&self) -> usize {
        self.medias.len()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Find the media section whose `a=mid` equals `mid`.
    pub fn media_for_mid(&self, mid: &str) -> Option<(usize, &Media)> {
        self.medias
            .iter()
            .enumerate()
            .find(|(_, media)| media.mid() == Some(mid))
    }
}

/// The `o=` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub username: String,
    pub session_id: u64,
    pub session_version: u64,
    pub net_type: String,
    pub addr_type: String,
    pub address: String,
}

/// A `c=` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub net_type: String,
    pub addr_type: String,
    pub address: String,
    /// Multicast TTL, IP4 only.
    pub ttl: Option<u8>,
    /// Number of consecutive multicast addresses.
    pub count: Option<u32>,
}

/// A `b=` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bandwidth {
    pub kind: String,
    pub value: u64,
}

/// A `t=` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub start: u64,
    pub stop: u64,
}

/// One `m=` section.
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    /// `video`, `audio`, `application`, ...
    pub kind: String,
    pub port: u16,
    pub port_count: Option<u16>,
    pub protocol: String,
    pub formats: Vec<Format>,
    pub information: Option<String>,
    pub connections: Vec<Connection>,
    pub bandwidths: Vec<Bandwidth>,
    pub attributes: Vec<Attribute>,
}

impl Media {
    pub fn format_count(&self) -> usize {
        self.formats.len()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn format(&self, id: u32) -> Option<&Format> {
        self.formats.iter().find(|fmt| fmt.id == id)
    }

    pub fn mid(&self) -> Option<&str> {
        self.attributes.iter().find_map(|attr| match attr {
            Attribute::Mid(mid) => Some(mid.as_str()),
            _ => None,
        })
    }
}

/// One payload type from the `m=` format list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    pub id: u32,
    pub sub_type: SubType,
}

/// Payload classification derived from the format's `a=rtpmap` encoding name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubType {
    /// No `a=rtpmap` for the format, or an encoding this parser does not know.
    Unknown,
    /// SMPTE ST 2110-20 uncompressed video.
    Raw,
    /// SMPTE ST 2110-40 ancillary data.
    Smpte291,
    /// SMPTE ST 2022-6 high bitrate media.
    Smpte2022_6,
    /// SMPTE ST 2110-22 JPEG XS.
    Jxsv,
    L16,
    L24,
    /// AES3 transparent transport.
    Am824,
    Pcmu,
    Pcma,
    Opus,
}

static ENCODINGS: Lazy<HashMap<&'static str, SubType>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert("raw", SubType::Raw);
    table.insert("smpte291", SubType::Smpte291);
    table.insert("smpte2022-6", SubType::Smpte2022_6);
    table.insert("jxsv", SubType::Jxsv);
    table.insert("l16", SubType::L16);
    table.insert("l24", SubType::L24);
    table.insert("am824", SubType::Am824);
    table.insert("pcmu", SubType::Pcmu);
    table.insert("pcma", SubType::Pcma);
    table.insert("opus", SubType::Opus);
    table
});

impl SubType {
    /// Classify an `a=rtpmap` encoding name, case-insensitively.
    pub fn from_encoding(name: &str) -> SubType {
        ENCODINGS
            .get(name.to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or(SubType::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubType::Unknown => "unknown",
            SubType::Raw => "raw",
            SubType::Smpte291 => "smpte291",
            SubType::Smpte2022_6 => "SMPTE2022-6",
            SubType::Jxsv => "jxsv",
            SubType::L16 => "L16",
            SubType::L24 => "L24",
            SubType::Am824 => "AM824",
            SubType::Pcmu => "PCMU",
            SubType::Pcma => "PCMA",
            SubType::Opus => "opus",
        }
    }
}

impl fmt::Display for SubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

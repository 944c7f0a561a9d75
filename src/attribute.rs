//! Typed `a=` attributes.

use std::fmt;

/// A parsed `a=` line.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Rtpmap(Rtpmap),
    Fmtp(Fmtp),
    /// `a=ptime:<milliseconds>`
    Ptime(f64),
    /// `a=framerate:<frames per second>`
    Framerate(f64),
    Group(Group),
    /// `a=mid:<identification-tag>`
    Mid(String),
    SourceFilter(SourceFilter),
    Rtcp(Rtcp),
    Direction(Direction),
    /// Any attribute without a dedicated variant.
    Generic { name: String, value: Option<String> },
}

/// Attribute kind, independent of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
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
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Rtpmap => "rtpmap",
            AttributeKind::Fmtp => "fmtp",
            AttributeKind::Ptime => "ptime",
            AttributeKind::Framerate => "framerate",
            AttributeKind::Group => "group",
            AttributeKind::Mid => "mid",
            AttributeKind::SourceFilter => "source-filter",
            AttributeKind::Rtcp => "rtcp",
            AttributeKind::Direction => "direction",
            AttributeKind::Generic => "generic",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `a=rtpmap:<payload type> <encoding name>/<clock rate>[/<encoding parameters>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rtpmap {
    pub payload_type: u32,
    pub encoding_name: String,
    pub clock_rate: u32,
    /// Channel count for audio encodings.
    pub channels: Option<u32>,
}

/// `a=fmtp:<format> <param>[;<param>]*`
#[derive(Debug, Clone, PartialEq)]
pub struct Fmtp {
    pub format: u32,
    pub params: Vec<FmtpParam>,
}

impl Fmtp {
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FmtpParam {
    pub name: String,
    pub value: ParamValue,
}

/// Value of one fmtp parameter, classified by its lexical shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Parameter given without `=`, e.g. `interlace`.
    Flag,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    fn classify(raw: &str) -> ParamValue {
        if let Ok(n) = raw.parse::<i64>() {
            return ParamValue::Integer(n);
        }
        if raw.contains('.') {
            if let Ok(f) = raw.parse::<f64>() {
                return ParamValue::Float(f);
            }
        }
        ParamValue::Text(raw.to_string())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Flag => f.write_str("(flag)"),
            ParamValue::Integer(n) => write!(f, "{}", n),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

/// `a=group:<semantics> <identification-tag>*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub semantic: String,
    pub tags: Vec<String>,
}

/// `a=source-filter: <mode> <nettype> <addrtype> <dest> <src>+`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFilter {
    pub mode: FilterMode,
    pub net_type: String,
    pub addr_type: String,
    pub destination: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Include,
    Exclude,
}

impl FilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Include => "incl",
            FilterMode::Exclude => "excl",
        }
    }
}

/// `a=rtcp:<port> [<nettype> <addrtype> <address>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rtcp {
    pub port: u16,
    pub address: Option<RtcpAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtcpAddress {
    pub net_type: String,
    pub addr_type: String,
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    SendRecv,
    SendOnly,
    RecvOnly,
    Inactive,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::SendRecv => "sendrecv",
            Direction::SendOnly => "sendonly",
            Direction::RecvOnly => "recvonly",
            Direction::Inactive => "inactive",
        }
    }

    fn from_name(name: &str) -> Option<Direction> {
        match name {
            "sendrecv" => Some(Direction::SendRecv),
            "sendonly" => Some(Direction::SendOnly),
            "recvonly" => Some(Direction::RecvOnly),
            "inactive" => Some(Direction::Inactive),
            _ => None,
        }
    }
}

impl Attribute {
    pub fn kind(&self) -> AttributeKind {
        match self {
            Attribute::Rtpmap(_) => AttributeKind::Rtpmap,
            Attribute::Fmtp(_) => AttributeKind::Fmtp,
            Attribute::Ptime(_) => AttributeKind::Ptime,
            Attribute::Framerate(_) => AttributeKind::Framerate,
            Attribute::Group(_) => AttributeKind::Group,
            Attribute::Mid(_) => AttributeKind::Mid,
            Attribute::SourceFilter(_) => AttributeKind::SourceFilter,
            Attribute::Rtcp(_) => AttributeKind::Rtcp,
            Attribute::Direction(_) => AttributeKind::Direction,
            Attribute::Generic { .. } => AttributeKind::Generic,
        }
    }

    /// Parse the text following `a=`.
    ///
    /// Unknown attribute names are kept as [`Attribute::Generic`]; known ones
    /// must be well formed.
    pub fn parse(input: &str) -> Result<Attribute, String> {
        let (name, value) = match input.split_once(':') {
            Some((name, value)) => (name, Some(value)),
            None => (input, None),
        };
        if name.is_empty() {
            return Err("attribute name is empty".to_string());
        }

        match (name, value) {
            ("rtpmap", Some(value)) => parse_rtpmap(value).map(Attribute::Rtpmap),
            ("fmtp", Some(value)) => parse_fmtp(value).map(Attribute::Fmtp),
            ("ptime", Some(value)) => parse_float("ptime", value).map(Attribute::Ptime),
            ("framerate", Some(value)) => {
                parse_float("framerate", value).map(Attribute::Framerate)
            }
            ("group", Some(value)) => parse_group(value).map(Attribute::Group),
            ("mid", Some(value)) => {
                let mid = value.trim();
                if mid.is_empty() {
                    Err("mid is empty".to_string())
                } else {
                    Ok(Attribute::Mid(mid.to_string()))
                }
            }
            ("source-filter", Some(value)) => {
                parse_source_filter(value).map(Attribute::SourceFilter)
            }
            ("rtcp", Some(value)) => parse_rtcp(value).map(Attribute::Rtcp),
            ("rtpmap", None)
            | ("fmtp", None)
            | ("ptime", None)
            | ("framerate", None)
            | ("group", None)
            | ("mid", None)
            | ("source-filter", None)
            | ("rtcp", None) => Err(format!("{} requires a value", name)),
            (_, None) => Ok(match Direction::from_name(name) {
                Some(direction) => Attribute::Direction(direction),
                None => Attribute::Generic {
                    name: name.to_string(),
                    value: None,
                },
            }),
            (_, Some(value)) => {
                if Direction::from_name(name).is_some() {
                    return Err(format!("{} does not take a value", name));
                }
                Ok(Attribute::Generic {
                    name: name.to_string(),
                    value: Some(value.to_string()),
                })
            }
        }
    }
}

fn parse_u32(what: &str, raw: &str) -> Result<u32, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("{} `{}` is not an unsigned integer", what, raw))
}

fn parse_float(what: &str, raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{} `{}` is not a number", what, raw))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{} `{}` is out of range", what, raw));
    }
    Ok(value)
}

fn parse_rtpmap(value: &str) -> Result<Rtpmap, String> {
    let (payload, encoding) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| "rtpmap needs `<payload> <encoding>/<clock>`".to_string())?;
    let payload_type = parse_u32("rtpmap payload type", payload)?;

    let mut parts = encoding.trim().split('/');
    let encoding_name = parts.next().unwrap_or_default();
    if encoding_name.is_empty() {
        return Err("rtpmap encoding name is empty".to_string());
    }
    let clock_rate = match parts.next() {
        Some(clock) => parse_u32("rtpmap clock rate", clock)?,
        None => return Err("rtpmap is missing its clock rate".to_string()),
    };
    let channels = parts
        .next()
        .map(|ch| parse_u32("rtpmap encoding parameters", ch))
        .transpose()?;
    if parts.next().is_some() {
        return Err("rtpmap has trailing encoding fields".to_string());
    }

    Ok(Rtpmap {
        payload_type,
        encoding_name: encoding_name.to_string(),
        clock_rate,
        channels,
    })
}

fn parse_fmtp(value: &str) -> Result<Fmtp, String> {
    let value = value.trim();
    let (format, rest) = match value.split_once(' ') {
        Some((format, rest)) => (format, rest),
        None => (value, ""),
    };
    let format = parse_u32("fmtp format", format)?;

    let mut params = Vec::new();
    for part in rest.split(';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let param = match part.split_once('=') {
            Some((name, raw)) => FmtpParam {
                name: name.trim().to_string(),
                value: ParamValue::classify(raw.trim()),
            },
            None => FmtpParam {
                name: part.to_string(),
                value: ParamValue::Flag,
            },
        };
        if param.name.is_empty() {
            return Err(format!("fmtp parameter `{}` has no name", part));
        }
        params.push(param);
    }

    Ok(Fmtp { format, params })
}

fn parse_group(value: &str) -> Result<Group, String> {
    let mut words = value.split_whitespace();
    let semantic = words
        .next()
        .ok_or_else(|| "group is missing its semantics".to_string())?;
    Ok(Group {
        semantic: semantic.to_string(),
        tags: words.map(str::to_string).collect(),
    })
}

fn parse_source_filter(value: &str) -> Result<SourceFilter, String> {
    let words: Vec<&str> = value.split_whitespace().collect();
    if words.len() < 5 {
        return Err(
            "source-filter needs `<mode> <nettype> <addrtype> <dest> <src>+`".to_string(),
        );
    }
    let mode = match words[0] {
        "incl" => FilterMode::Include,
        "excl" => FilterMode::Exclude,
        other => return Err(format!("unknown source-filter mode `{}`", other)),
    };
    Ok(SourceFilter {
        mode,
        net_type: words[1].to_string(),
        addr_type: words[2].to_string(),
        destination: words[3].to_string(),
        sources: words[4..].iter().map(|s| s.to_string()).collect(),
    })
}

fn parse_rtcp(value: &str) -> Result<Rtcp, String> {
    let words: Vec<&str> = value.split_whitespace().collect();
    let port = match words.first() {
        Some(port) => port
            .parse()
            .map_err(|_| format!("rtcp port `{}` is not a port number", port))?,
        None => return Err("rtcp is missing its port".to_string()),
    };
    let address = match words.len() {
        1 => None,
        4 => Some(RtcpAddress {
            net_type: words[1].to_string(),
            addr_type: words[2].to_string(),
            address: words[3].to_string(),
        }),
        _ => return Err("rtcp needs `<port> [<nettype> <addrtype> <address>]`".to_string()),
    };
    Ok(Rtcp { port, address })
}

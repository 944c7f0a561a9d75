//! Line-oriented SDP parser.

use crate::attribute::Attribute;
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::session::{Bandwidth, Connection, Format, Media, Origin, Session, SubType, Timing};
use tracing::{debug, trace};

/// Parse an SDP document into a [`Session`].
///
/// Lines may end in `\n` or `\r\n`; blank lines are skipped. Attribute and
/// format order is preserved exactly as written.
pub fn parse(content: &str) -> ParseResult<Session> {
    let mut builder = SessionBuilder::default();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end();
        if line.is_empty() {
            continue;
        }

        let (key, value) = split_line(line)
            .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidLine, line_no, line))?;

        if builder.version.is_none() {
            if key != 'v' {
                return Err(ParseError::new(
                    ParseErrorKind::MissingVersion,
                    line_no,
                    "document must start with a `v=` line",
                ));
            }
            if value.trim() != "0" {
                return Err(ParseError::new(
                    ParseErrorKind::UnsupportedVersion,
                    line_no,
                    format!("version `{}` is not supported", value),
                ));
            }
            builder.version = Some(0);
            continue;
        }

        builder.line(key, value, line_no)?;
    }

    builder.finish()
}

fn split_line(line: &str) -> Option<(char, &str)> {
    let (key, value) = line.split_once('=')?;
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() => Some((c, value)),
        _ => None,
    }
}

#[derive(Default)]
struct SessionBuilder {
    version: Option<u32>,
    origin: Option<Origin>,
    name: Option<String>,
    information: Option<String>,
    uri: Option<String>,
    emails: Vec<String>,
    phones: Vec<String>,
    connection: Option<Connection>,
    bandwidths: Vec<Bandwidth>,
    timings: Vec<Timing>,
    attributes: Vec<Attribute>,
    medias: Vec<Media>,
}

impl SessionBuilder {
    fn line(&mut self, key: char, value: &str, line_no: usize) -> ParseResult<()> {
        trace!(line = line_no, key = %key, "sdp line");
        match key {
            'v' => Err(ParseError::new(
                ParseErrorKind::InvalidLine,
                line_no,
                "duplicate `v=` line",
            )),
            'o' => {
                self.origin = Some(parse_origin(value, line_no)?);
                Ok(())
            }
            's' => {
                self.name = Some(value.to_string());
                Ok(())
            }
            'i' => {
                match self.medias.last_mut() {
                    Some(media) => media.information = Some(value.to_string()),
                    None => self.information = Some(value.to_string()),
                }
                Ok(())
            }
            'u' => {
                self.uri = Some(value.to_string());
                Ok(())
            }
            'e' => {
                self.emails.push(value.to_string());
                Ok(())
            }
            'p' => {
                self.phones.push(value.to_string());
                Ok(())
            }
            'c' => {
                let connection = parse_connection(value, line_no)?;
                match self.medias.last_mut() {
                    Some(media) => media.connections.push(connection),
                    None => self.connection = Some(connection),
                }
                Ok(())
            }
            'b' => {
                let bandwidth = parse_bandwidth(value, line_no)?;
                match self.medias.last_mut() {
                    Some(media) => media.bandwidths.push(bandwidth),
                    None => self.bandwidths.push(bandwidth),
                }
                Ok(())
            }
            't' => {
                self.timings.push(parse_timing(value, line_no)?);
                Ok(())
            }
            'm' => {
                self.medias.push(parse_media(value, line_no)?);
                Ok(())
            }
            'a' => self.attribute(value, line_no),
            other => {
                debug!(line = line_no, key = %other, "skipping unsupported sdp line");
                Ok(())
            }
        }
    }

    fn attribute(&mut self, value: &str, line_no: usize) -> ParseResult<()> {
        let attr = Attribute::parse(value)
            .map_err(|msg| ParseError::new(ParseErrorKind::InvalidAttribute, line_no, msg))?;

        let media = match self.medias.last_mut() {
            Some(media) => media,
            None => {
                if matches!(attr, Attribute::Rtpmap(_) | Attribute::Fmtp(_)) {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidAttribute,
                        line_no,
                        format!("`{}` is only valid inside a media section", attr.kind()),
                    ));
                }
                self.attributes.push(attr);
                return Ok(());
            }
        };

        let referenced = match &attr {
            Attribute::Rtpmap(rtpmap) => Some(rtpmap.payload_type),
            Attribute::Fmtp(fmtp) => Some(fmtp.format),
            _ => None,
        };
        if let Some(id) = referenced {
            if media.format(id).is_none() {
                return Err(ParseError::new(
                    ParseErrorKind::UnknownFormat,
                    line_no,
                    format!("payload type {} is not listed on the `m=` line", id),
                ));
            }
        }
        if let Attribute::Rtpmap(rtpmap) = &attr {
            let sub_type = SubType::from_encoding(&rtpmap.encoding_name);
            for fmt in media.formats.iter_mut().filter(|f| f.id == rtpmap.payload_type) {
                fmt.sub_type = sub_type;
            }
        }

        media.attributes.push(attr);
        Ok(())
    }

    fn finish(self) -> ParseResult<Session> {
        let version = self.version.ok_or_else(|| {
            ParseError::document(ParseErrorKind::MissingVersion, "document is empty")
        })?;
        let origin = self
            .origin
            .ok_or_else(|| ParseError::document(ParseErrorKind::MissingOrigin, "no `o=` line"))?;
        let name = self.name.ok_or_else(|| {
            ParseError::document(ParseErrorKind::MissingSessionName, "no `s=` line")
        })?;
        if self.timings.is_empty() {
            return Err(ParseError::document(
                ParseErrorKind::MissingTiming,
                "no `t=` line",
            ));
        }
        if self.connection.is_none() {
            if let Some(idx) = self.medias.iter().position(|m| m.connections.is_empty()) {
                return Err(ParseError::document(
                    ParseErrorKind::MissingConnection,
                    format!("media section {} has no connection information", idx),
                ));
            }
        }

        debug!(
            medias = self.medias.len(),
            attributes = self.attributes.len(),
            "parsed sdp session"
        );

        Ok(Session {
            version,
            origin,
            name,
            information: self.information,
            uri: self.uri,
            emails: self.emails,
            phones: self.phones,
            connection: self.connection,
            bandwidths: self.bandwidths,
            timings: self.timings,
            attributes: self.attributes,
            medias: self.medias,
        })
    }
}

fn parse_origin(value: &str, line_no: usize) -> ParseResult<Origin> {
    let invalid = |msg: &str| ParseError::new(ParseErrorKind::InvalidOrigin, line_no, msg);
    let words: Vec<&str> = value.split_whitespace().collect();
    if words.len() != 6 {
        return Err(invalid("origin needs six fields"));
    }
    Ok(Origin {
        username: words[0].to_string(),
        session_id: words[1]
            .parse()
            .map_err(|_| invalid("session id is not a number"))?,
        session_version: words[2]
            .parse()
            .map_err(|_| invalid("session version is not a number"))?,
        net_type: words[3].to_string(),
        addr_type: words[4].to_string(),
        address: words[5].to_string(),
    })
}

fn parse_connection(value: &str, line_no: usize) -> ParseResult<Connection> {
    let invalid = |msg: String| ParseError::new(ParseErrorKind::InvalidConnection, line_no, msg);
    let words: Vec<&str> = value.split_whitespace().collect();
    if words.len() != 3 {
        return Err(invalid(
            "connection needs `<nettype> <addrtype> <address>`".to_string(),
        ));
    }

    let mut parts = words[2].split('/');
    let address = parts.next().unwrap_or_default().to_string();
    let suffixes: Vec<&str> = parts.collect();
    let (ttl, count) = match (words[1], suffixes.as_slice()) {
        (_, []) => (None, None),
        ("IP4", [ttl]) => (Some(parse_suffix(ttl, &invalid)?), None),
        ("IP4", [ttl, count]) => (
            Some(parse_suffix(ttl, &invalid)?),
            Some(parse_suffix(count, &invalid)?),
        ),
        ("IP6", [count]) => (None, Some(parse_suffix(count, &invalid)?)),
        _ => return Err(invalid(format!("malformed address `{}`", words[2]))),
    };

    Ok(Connection {
        net_type: words[0].to_string(),
        addr_type: words[1].to_string(),
        address,
        ttl,
        count,
    })
}

fn parse_suffix<T: std::str::FromStr>(
    raw: &str,
    invalid: &dyn Fn(String) -> ParseError,
) -> ParseResult<T> {
    raw.parse()
        .map_err(|_| invalid(format!("`{}` is not a valid address suffix", raw)))
}

fn parse_bandwidth(value: &str, line_no: usize) -> ParseResult<Bandwidth> {
    let invalid = || {
        ParseError::new(
            ParseErrorKind::InvalidBandwidth,
            line_no,
            format!("bandwidth `{}` is not `<type>:<value>`", value),
        )
    };
    let (kind, amount) = value.split_once(':').ok_or_else(invalid)?;
    Ok(Bandwidth {
        kind: kind.to_string(),
        value: amount.trim().parse().map_err(|_| invalid())?,
    })
}

fn parse_timing(value: &str, line_no: usize) -> ParseResult<Timing> {
    let invalid = || {
        ParseError::new(
            ParseErrorKind::InvalidTiming,
            line_no,
            format!("timing `{}` is not `<start> <stop>`", value),
        )
    };
    let words: Vec<&str> = value.split_whitespace().collect();
    if words.len() != 2 {
        return Err(invalid());
    }
    Ok(Timing {
        start: words[0].parse().map_err(|_| invalid())?,
        stop: words[1].parse().map_err(|_| invalid())?,
    })
}

fn parse_media(value: &str, line_no: usize) -> ParseResult<Media> {
    let invalid = |msg: String| ParseError::new(ParseErrorKind::InvalidMedia, line_no, msg);
    let words: Vec<&str> = value.split_whitespace().collect();
    if words.len() < 4 {
        return Err(invalid(
            "media needs `<media> <port> <proto> <fmt>+`".to_string(),
        ));
    }

    let (port, port_count) = match words[1].split_once('/') {
        Some((port, count)) => (port, Some(count)),
        None => (words[1], None),
    };
    let port = port
        .parse()
        .map_err(|_| invalid(format!("port `{}` is not a number", port)))?;
    let port_count = port_count
        .map(|count| {
            count
                .parse()
                .map_err(|_| invalid(format!("port count `{}` is not a number", count)))
        })
        .transpose()?;

    let formats = words[3..]
        .iter()
        .map(|raw| {
            raw.parse()
                .map(|id| Format {
                    id,
                    sub_type: SubType::Unknown,
                })
                .map_err(|_| invalid(format!("format `{}` is not a payload type", raw)))
        })
        .collect::<ParseResult<Vec<_>>>()?;

    Ok(Media {
        kind: words[0].to_string(),
        port,
        port_count,
        protocol: words[2].to_string(),
        formats,
        information: None,
        connections: Vec::new(),
        bandwidths: Vec::new(),
        attributes: Vec::new(),
    })
}

//! Session Description Protocol parser.
//!
//! Turns SDP text into a [`Session`] graph: session-level fields and
//! attributes, then ordered [`Media`] sections with their [`Format`]s and
//! attributes. Attributes are typed ([`Attribute`]) so that consumers can
//! inspect their fields without re-parsing.
//!
//! ## Example
//!
//! ```
//! use sdp_parser::{parse, Attribute, SubType};
//!
//! let session = parse(
//!     "v=0\n\
//!      o=- 1 1 IN IP4 192.168.0.1\n\
//!      s=audio\n\
//!      c=IN IP4 239.0.0.1/32\n\
//!      t=0 0\n\
//!      m=audio 5004 RTP/AVP 97\n\
//!      a=rtpmap:97 L24/48000/2\n",
//! )
//! .unwrap();
//!
//! assert_eq!(session.media_count(), 1);
//! assert_eq!(session.medias[0].formats[0].sub_type, SubType::L24);
//! assert!(matches!(session.medias[0].attributes[0], Attribute::Rtpmap(_)));
//! ```

mod attribute;
mod error;
mod parser;
mod session;

pub use attribute::{
    Attribute, AttributeKind, Direction, FilterMode, Fmtp, FmtpParam, Group, ParamValue, Rtcp,
    RtcpAddress, Rtpmap, SourceFilter,
};
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use parser::parse;
pub use session::{Bandwidth, Connection, Format, Media, Origin, Session, SubType, Timing};

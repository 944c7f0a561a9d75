//! Parse one SDP document and check it against expectations.
//!
//! ```
//! use sdp_parser::{ParseErrorKind, SubType};
//! use sdp_parser_specs::{AttributeSpec, FormatSpec, MediaSpec, ParseOutcome, Scenario, SessionSpec};
//!
//! let sdp = "v=0\no=- 1 1 IN IP4 10.0.0.1\ns=-\nt=0 0\n\
//!            m=audio 5004 RTP/AVP 97\nc=IN IP4 239.0.0.1/32\na=rtpmap:97 L24/48000/2\n";
//!
//! let spec = SessionSpec::new().media(
//!     MediaSpec::new()
//!         .format(FormatSpec::new(97, SubType::L24))
//!         .attribute(AttributeSpec::rtpmap_channels(97, "L24", 48000, 2)),
//! );
//! assert_eq!(Scenario::accepted(sdp).spec(&spec).run(), 0);
//!
//! let rejected = Scenario::new("v=1\n", ParseOutcome::Rejected(ParseErrorKind::UnsupportedVersion));
//! assert_eq!(rejected.run(), 0);
//! ```

use crate::diagnostic::{self, Location};
use crate::validator::SessionSpec;
use crate::walker::assert_session;
use sdp_parser::{parse, ParseErrorKind, Session};
use std::fmt;
use tracing::debug;

/// What parsing a scenario's document must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    Accepted,
    Rejected(ParseErrorKind),
}

impl fmt::Display for ParseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseOutcome::Accepted => f.write_str("accepted"),
            ParseOutcome::Rejected(kind) => write!(f, "rejected with {}", kind),
        }
    }
}

/// Custom check over a parsed session, returning its failure count.
pub type Verifier<'a> = &'a dyn Fn(&Session) -> usize;

/// Parse `content` and compare the result with the expectations.
///
/// A parse outcome different from `expected` is one failure and nothing
/// else is checked. Otherwise, for an accepted document, the verifier's
/// count and the structural comparison against `spec` are added. A spec
/// exceeding its capacity limits counts as one failure and is not walked.
pub fn run_scenario(
    content: &str,
    expected: ParseOutcome,
    verifier: Option<Verifier<'_>>,
    spec: Option<&SessionSpec>,
) -> usize {
    let location = Location::new(file!(), line!());
    let session = match (parse(content), expected) {
        (Ok(session), ParseOutcome::Accepted) => session,
        (Err(err), ParseOutcome::Rejected(kind)) if err.kind == kind => {
            debug!(%kind, line = err.line, "rejected as expected");
            return 0;
        }
        (Ok(_), ParseOutcome::Rejected(kind)) => {
            diagnostic::fail(
                "parse",
                format!("document was accepted, expected rejection with {}", kind),
                location,
            );
            return 1;
        }
        (Err(err), expected) => {
            diagnostic::fail(
                "parse",
                format!("{}, expected the document to be {}", err, expected),
                location,
            );
            return 1;
        }
    };

    let mut failures = 0;
    if let Some(verifier) = verifier {
        failures += verifier(&session);
    }
    if let Some(spec) = spec {
        match spec.validate() {
            Ok(()) => failures += assert_session(&session, spec),
            Err(err) => {
                diagnostic::fail("spec", err.to_string(), location);
                failures += 1;
            }
        }
    }
    failures
}

/// Builder over [`run_scenario`].
pub struct Scenario<'a> {
    content: &'a str,
    expected: ParseOutcome,
    verifier: Option<Verifier<'a>>,
    spec: Option<&'a SessionSpec>,
}

impl<'a> Scenario<'a> {
    pub fn new(content: &'a str, expected: ParseOutcome) -> Self {
        Self {
            content,
            expected,
            verifier: None,
            spec: None,
        }
    }

    pub fn accepted(content: &'a str) -> Self {
        Self::new(content, ParseOutcome::Accepted)
    }

    pub fn rejected(content: &'a str, kind: ParseErrorKind) -> Self {
        Self::new(content, ParseOutcome::Rejected(kind))
    }

    pub fn verifier(mut self, verifier: Verifier<'a>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    pub fn spec(mut self, spec: &'a SessionSpec) -> Self {
        self.spec = Some(spec);
        self
    }

    pub fn run(&self) -> usize {
        run_scenario(self.content, self.expected, self.verifier, self.spec)
    }
}

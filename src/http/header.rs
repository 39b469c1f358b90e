//! Header line tokenizer.
//!
//! Splits a raw header block into `name: value` pairs and classifies each
//! name against the small allow-list of headers the server acts on.

use crate::http::parser::ParseError;
use crate::http::request::{Encoding, EncodingSet};

/// Request headers the parser recognises. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderName {
    Host,
    UserAgent,
    Accept,
    AcceptEncoding,
    ContentType,
    ContentLength,
}

impl HeaderName {
    /// # Example
    ///
    /// ```
    /// # use tinyserve::http::header::HeaderName;
    /// assert_eq!(HeaderName::from_str("User-Agent"), Some(HeaderName::UserAgent));
    /// assert_eq!(HeaderName::from_str("user-agent"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Host" => Some(HeaderName::Host),
            "User-Agent" => Some(HeaderName::UserAgent),
            "Accept" => Some(HeaderName::Accept),
            "Accept-Encoding" => Some(HeaderName::AcceptEncoding),
            "Content-Type" => Some(HeaderName::ContentType),
            "Content-Length" => Some(HeaderName::ContentLength),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderName::Host => "Host",
            HeaderName::UserAgent => "User-Agent",
            HeaderName::Accept => "Accept",
            HeaderName::AcceptEncoding => "Accept-Encoding",
            HeaderName::ContentType => "Content-Type",
            HeaderName::ContentLength => "Content-Length",
        }
    }
}

/// One `name: value` line borrowed from the request head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLine<'a> {
    /// Name exactly as sent
    pub name: &'a str,
    /// Value with a single leading space removed
    pub value: &'a str,
}

impl<'a> HeaderLine<'a> {
    /// The allow-listed header this line carries, if any.
    pub fn known(&self) -> Option<HeaderName> {
        HeaderName::from_str(self.name)
    }
}

/// Splits a header line on its first colon.
///
/// Only one leading space is stripped from the value, so `"X:  y"` yields
/// `" y"`. Returns `None` when the line has no colon.
pub fn split_header_line(line: &str) -> Option<HeaderLine<'_>> {
    let (name, value) = line.split_once(':')?;
    let value = value.strip_prefix(' ').unwrap_or(value);
    Some(HeaderLine { name, value })
}

/// Iterator over the lines of a header block (without the final blank line).
pub struct HeaderLines<'a> {
    lines: std::str::Split<'a, &'static str>,
}

/// Tokenizes a `\r\n`-separated header block.
///
/// Empty lines are skipped; a line without a colon yields
/// `ParseError::MalformedHeaders`.
pub fn header_lines(block: &str) -> HeaderLines<'_> {
    HeaderLines {
        lines: block.split("\r\n"),
    }
}

impl<'a> Iterator for HeaderLines<'a> {
    type Item = Result<HeaderLine<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            if line.is_empty() {
                continue;
            }
            return Some(split_header_line(line).ok_or(ParseError::MalformedHeaders));
        }
    }
}

/// Decodes an `Accept-Encoding` value into the set of encodings we support.
///
/// Tokens are separated by commas and/or spaces and compared exactly; unknown
/// tokens (including ones with `;q=` parameters) are ignored.
pub fn parse_encodings(value: &str) -> EncodingSet {
    let mut set = EncodingSet::NONE;

    for token in value.split([',', ' ']).filter(|t| !t.is_empty()) {
        match Encoding::from_token(token) {
            Some(encoding) => set.insert(encoding),
            None => tracing::trace!(token, "ignoring unsupported encoding"),
        }
    }

    set
}

use thiserror::Error;
use tracing::debug;

use crate::http::header::{header_lines, parse_encodings, HeaderName};
use crate::http::request::{Headers, Method, Request, Version};

const HEADERS_END: &[u8] = b"\r\n\r\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed request line")]
    MalformedRequestLine,
    #[error("malformed header block")]
    MalformedHeaders,
    #[error("invalid Content-Length")]
    InvalidContentLength,
    /// The head is complete but the buffer holds fewer body bytes than declared.
    #[error("incomplete body: expected {expected} bytes, have {available}")]
    Incomplete { expected: usize, available: usize },
}

/// Parses one request from the start of `buf`.
///
/// Returns the request and the number of bytes it occupies (head, blank line
/// and body). Never reads past the end of `buf`.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    // Look for header/body separator
    let headers_end = find_headers_end(buf).ok_or(ParseError::MalformedHeaders)?;
    let head = &buf[..headers_end];
    let body_bytes = &buf[headers_end + HEADERS_END.len()..];

    // Request line
    let line_end = find(head, b"\r\n").unwrap_or(head.len());
    let (method, target, version) = parse_request_line(&head[..line_end])?;

    // Headers
    let header_block = head.get(line_end + 2..).unwrap_or_default();
    let header_block =
        std::str::from_utf8(header_block).map_err(|_| ParseError::MalformedHeaders)?;
    let headers = parse_headers(header_block)?;

    // Body
    let content_length = headers.content_length.unwrap_or(0);
    let body = body_bytes
        .get(..content_length)
        .ok_or(ParseError::Incomplete {
            expected: content_length,
            available: body_bytes.len(),
        })?
        .to_vec();

    let request = Request {
        method,
        target,
        version,
        headers,
        body,
    };

    let total_consumed = headers_end + HEADERS_END.len() + content_length;
    Ok((request, total_consumed))
}

fn parse_request_line(line: &[u8]) -> Result<(Method, String, Version), ParseError> {
    let line = std::str::from_utf8(line).map_err(|_| ParseError::MalformedRequestLine)?;

    let (method_str, rest) = line
        .split_once(' ')
        .ok_or(ParseError::MalformedRequestLine)?;
    let (target, version_str) = rest
        .split_once(' ')
        .ok_or(ParseError::MalformedRequestLine)?;

    if !target.starts_with('/') {
        return Err(ParseError::MalformedRequestLine);
    }

    let method = Method::parse(method_str);
    if method == Method::Unknown {
        debug!(method = method_str, "unrecognised request method");
    }

    let version = Version::parse(version_str);
    if version == Version::Unknown {
        debug!(version = version_str, "unrecognised protocol version");
    }

    Ok((method, target.to_string(), version))
}

fn parse_headers(block: &str) -> Result<Headers, ParseError> {
    let mut headers = Headers::default();

    for line in header_lines(block) {
        let line = line?;

        let Some(name) = line.known() else {
            debug!(header = line.name, "skipping unhandled header");
            continue;
        };

        match name {
            HeaderName::Host => headers.host = Some(line.value.to_string()),
            HeaderName::UserAgent => headers.user_agent = Some(line.value.to_string()),
            HeaderName::Accept => headers.accept = Some(line.value.to_string()),
            HeaderName::AcceptEncoding => {
                headers.accept_encoding = parse_encodings(line.value);
            }
            HeaderName::ContentType => headers.content_type = Some(line.value.to_string()),
            HeaderName::ContentLength => {
                let length = line.value.parse::<usize>().map_err(|_| {
                    debug!(header = name.as_str(), value = line.value, "bad length");
                    ParseError::InvalidContentLength
                })?;
                headers.content_length = Some(length);
            }
        }
    }

    Ok(headers)
}

/// True once `buf` holds the blank line that ends a request head.
pub fn has_complete_head(buf: &[u8]) -> bool {
    find_headers_end(buf).is_some()
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    find(buf, HEADERS_END)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.target, "/");
        assert_eq!(parsed.headers.host.as_deref(), Some("example.com"));
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn request_line_only() {
        let req = b"GET /echo/x HTTP/1.1\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.target, "/echo/x");
        assert_eq!(parsed.headers, Headers::default());
        assert_eq!(consumed, req.len());
    }
}

/// HTTP request methods.
///
/// Only GET and POST are routed. Anything else still parses, as `Unknown`,
/// and is answered with 404 by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Upload a file
    POST,
    /// Any other token found in the method position
    Unknown,
}

impl Method {
    /// Parses an HTTP method from the request line.
    ///
    /// Matching is case-sensitive; unrecognised tokens map to `Method::Unknown`.
    ///
    /// # Example
    ///
    /// ```
    /// # use tinyserve::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("get"), Method::Unknown);
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            _ => Method::Unknown,
        }
    }
}

/// Protocol version from the request line. Only `HTTP/1.1` is recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Http11,
    Unknown,
}

impl Version {
    pub fn parse(s: &str) -> Self {
        if s == "HTTP/1.1" {
            Version::Http11
        } else {
            Version::Unknown
        }
    }
}

/// A content coding the server knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Gzip,
}

impl Encoding {
    /// Matches a single `Accept-Encoding` token exactly.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "gzip" => Some(Encoding::Gzip),
            _ => None,
        }
    }

    /// Value used in the `Content-Encoding` response header.
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Gzip => "gzip",
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Encoding::Gzip => 0x1,
        }
    }
}

/// Set of encodings a client declared acceptable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodingSet(u8);

impl EncodingSet {
    /// No encoding negotiated; responses go out uncompressed.
    pub const NONE: EncodingSet = EncodingSet(0);
    pub const GZIP: EncodingSet = EncodingSet(0x1);

    pub fn insert(&mut self, encoding: Encoding) {
        self.0 |= encoding.bit();
    }

    pub fn contains(&self, encoding: Encoding) -> bool {
        self.0 & encoding.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// The fixed set of request headers the server understands.
///
/// Every field is optional; headers outside this set are dropped by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    pub host: Option<String>,
    pub user_agent: Option<String>,
    pub accept: Option<String>,
    pub accept_encoding: EncodingSet,
    pub content_type: Option<String>,
    pub content_length: Option<usize>,
}

/// Represents a parsed HTTP request from a client.
///
/// Contains the request line, the recognised headers and a body of exactly
/// `Content-Length` bytes (empty when the header is absent or zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method (GET, POST, or Unknown)
    pub method: Method,
    /// The request target, verbatim (e.g., "/echo/abc")
    pub target: String,
    /// Protocol version from the request line
    pub version: Version,
    /// Recognised request headers
    pub headers: Headers,
    /// Request body for POST requests
    pub body: Vec<u8>,
}

impl Request {
    /// Declared body length, 0 when the header was not sent.
    pub fn content_length(&self) -> usize {
        self.headers.content_length.unwrap_or(0)
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.headers.user_agent.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.content_type.as_deref()
    }

    /// Encodings the client will accept for the response body.
    pub fn accepted_encodings(&self) -> EncodingSet {
        self.headers.accept_encoding
    }
}

/// Builder for constructing Request objects.
///
/// Mostly useful in tests and for callers that need a `Request` without going
/// through the wire parser.
pub struct RequestBuilder {
    method: Method,
    target: Option<String>,
    version: Version,
    headers: Headers,
    body: Vec<u8>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: Method::GET,
            target: None,
            version: Version::Http11,
            headers: Headers::default(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.headers.user_agent = Some(value.into());
        self
    }

    pub fn content_type(mut self, value: impl Into<String>) -> Self {
        self.headers.content_type = Some(value.into());
        self
    }

    pub fn accept_encoding(mut self, encoding: Encoding) -> Self {
        self.headers.accept_encoding.insert(encoding);
        self
    }

    /// Sets the body and a matching `Content-Length`.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self.headers.content_length = Some(self.body.len());
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let target = self.target.ok_or("target missing")?;
        if !target.starts_with('/') {
            return Err("target must start with '/'");
        }

        Ok(Request {
            method: self.method,
            target,
            version: self.version,
            headers: self.headers,
            body: self.body,
        })
    }
}

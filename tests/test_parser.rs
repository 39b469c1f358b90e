use tinyserve::http::parser::{ParseError, has_complete_head, parse_http_request};
use tinyserve::http::request::{Encoding, Method, Version};

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.target, "/");
    assert_eq!(parsed.version, Version::Http11);
    assert_eq!(parsed.headers.host.as_deref(), Some("example.com"));
    assert!(parsed.body.is_empty());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /files/out.bin HTTP/1.1\r\nContent-Type: application/octet-stream\r\nContent-Length: 5\r\n\r\nhello";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.target, "/files/out.bin");
    assert_eq!(parsed.content_type(), Some("application/octet-stream"));
    assert_eq!(parsed.content_length(), 5);
    assert_eq!(parsed.body, b"hello".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_body_length_matches_content_length() {
    for len in [0usize, 1, 17, 512, 1400] {
        let body = vec![b'x'; len];
        let mut req = format!("POST /files/a HTTP/1.1\r\nContent-Length: {}\r\n\r\n", len).into_bytes();
        req.extend_from_slice(&body);

        let (parsed, _) = parse_http_request(&req).unwrap();
        assert_eq!(parsed.body.len(), parsed.content_length());
        assert_eq!(parsed.body, body);
    }
}

#[test]
fn test_body_not_read_beyond_content_length() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 3\r\n\r\nabcdef";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"abc".to_vec());
    assert_eq!(consumed, req.len() - 3);
}

#[test]
fn test_body_ignored_without_content_length() {
    let req = b"POST /files/a HTTP/1.1\r\n\r\nstray";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert!(parsed.body.is_empty());
    assert_eq!(parsed.content_length(), 0);
}

#[test]
fn test_parse_request_with_zero_content_length() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 0\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.content_length, Some(0));
    assert_eq!(parsed.body, Vec::<u8>::new());
}

#[test]
fn test_parse_request_with_binary_body() {
    let req = b"POST /files/bin HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\x01\x02\x03";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, vec![0, 1, 2, 3]);
}

#[test]
fn test_parse_recognised_headers() {
    let req = b"GET /user-agent HTTP/1.1\r\nHost: localhost:4221\r\nUser-Agent: testclient/1\r\nAccept: */*\r\nAccept-Encoding: deflate, gzip\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.host.as_deref(), Some("localhost:4221"));
    assert_eq!(parsed.user_agent(), Some("testclient/1"));
    assert_eq!(parsed.headers.accept.as_deref(), Some("*/*"));
    assert!(parsed.accepted_encodings().contains(Encoding::Gzip));
}

#[test]
fn test_unrecognised_headers_are_skipped() {
    let req = b"GET / HTTP/1.1\r\nX-Custom: 1\r\nConnection: close\r\nHost: h\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.host.as_deref(), Some("h"));
}

#[test]
fn test_header_names_are_case_sensitive() {
    let req = b"GET / HTTP/1.1\r\nuser-agent: lower\r\ncontent-length: nope\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.user_agent(), None);
    assert_eq!(parsed.headers.content_length, None);
}

#[test]
fn test_unknown_accept_encoding_is_empty_set() {
    let req = b"GET /echo/hi HTTP/1.1\r\nAccept-Encoding: invalid-encoding\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert!(parsed.accepted_encodings().is_empty());
}

#[test]
fn test_target_is_not_decoded() {
    let req = b"GET /echo/a%20b?x=1 HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.target, "/echo/a%20b?x=1");
}

#[test]
fn test_unknown_method_is_not_an_error() {
    let req = b"DELETE /files/a HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::Unknown);
}

#[test]
fn test_unknown_version_is_not_an_error() {
    let req = b"GET / HTTP/1.0\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.version, Version::Unknown);
}

#[test]
fn test_missing_second_space_is_malformed_request_line() {
    let req = b"GET /\r\nHost: x\r\n\r\n";

    assert_eq!(
        parse_http_request(req).unwrap_err(),
        ParseError::MalformedRequestLine
    );
}

#[test]
fn test_missing_first_space_is_malformed_request_line() {
    assert_eq!(
        parse_http_request(b"GET\r\n\r\n").unwrap_err(),
        ParseError::MalformedRequestLine
    );
}

#[test]
fn test_target_without_leading_slash_is_malformed() {
    assert_eq!(
        parse_http_request(b"GET echo/abc HTTP/1.1\r\n\r\n").unwrap_err(),
        ParseError::MalformedRequestLine
    );
}

#[test]
fn test_missing_blank_line_is_malformed_headers() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";

    assert_eq!(
        parse_http_request(req).unwrap_err(),
        ParseError::MalformedHeaders
    );
}

#[test]
fn test_header_without_colon_is_malformed_headers() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n";

    assert_eq!(
        parse_http_request(req).unwrap_err(),
        ParseError::MalformedHeaders
    );
}

#[test]
fn test_invalid_content_length() {
    for value in ["abc", "-1", "12x", "", "99999999999999999999999999"] {
        let req = format!("POST /files/a HTTP/1.1\r\nContent-Length: {}\r\n\r\n", value);

        assert_eq!(
            parse_http_request(req.as_bytes()).unwrap_err(),
            ParseError::InvalidContentLength,
            "Content-Length {value:?}"
        );
    }
}

#[test]
fn test_short_body_is_incomplete() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";

    assert_eq!(
        parse_http_request(req).unwrap_err(),
        ParseError::Incomplete {
            expected: 10,
            available: 5
        }
    );
}

#[test]
fn test_garbage_never_panics() {
    let inputs: [&[u8]; 7] = [
        b"",
        b"\r\n\r\n",
        b" \r\n\r\n",
        b"  \r\n\r\n",
        b"\xff\xfe \xff HTTP/1.1\r\n\r\n",
        b"GET / HTTP/1.1\r\n\xff: \xff\r\n\r\n",
        b"GET /\x00 \r\n:\r\n\r\n",
    ];

    for input in inputs {
        let _ = parse_http_request(input);
    }
}

#[test]
fn test_has_complete_head() {
    assert!(has_complete_head(b"GET / HTTP/1.1\r\n\r\n"));
    assert!(has_complete_head(b"GET / HTTP/1.1\r\nHost: a\r\n\r\nbody"));
    assert!(!has_complete_head(b"GET / HTTP/1.1\r\nHost: a\r\n"));
    assert!(!has_complete_head(b""));
}

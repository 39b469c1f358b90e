use tinyserve::http::response::{Response, ResponseBuilder, StatusCode};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Created.as_u16(), 201);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::Created.reason_phrase(), "Created");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
}

#[test]
fn test_body_less_responses() {
    assert_eq!(
        Response::empty(StatusCode::Ok).to_bytes(),
        b"HTTP/1.1 200 OK\r\n\r\n".to_vec()
    );
    assert_eq!(
        Response::empty(StatusCode::Created).to_bytes(),
        b"HTTP/1.1 201 Created\r\n\r\n".to_vec()
    );
    assert_eq!(
        Response::not_found().to_bytes(),
        b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec()
    );
}

#[test]
fn test_text_response_serialization() {
    let response = Response::ok("text/plain", "abc");

    assert_eq!(
        response.to_bytes(),
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc".to_vec()
    );
}

#[test]
fn test_empty_body_still_has_length() {
    let response = Response::ok("text/plain", "");

    assert_eq!(
        response.to_bytes(),
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 0\r\n\r\n".to_vec()
    );
}

#[test]
fn test_extra_headers_follow_entity_headers_in_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .content_type("application/octet-stream")
        .header_line("Content-Encoding: gzip")
        .header_line("X-Second: 2")
        .body(vec![1, 2])
        .build();

    let mut expected = b"HTTP/1.1 200 OK\r\n\
Content-Type: application/octet-stream\r\n\
Content-Length: 2\r\n\
Content-Encoding: gzip\r\n\
X-Second: 2\r\n\r\n"
        .to_vec();
    expected.extend_from_slice(&[1, 2]);

    assert_eq!(response.to_bytes(), expected);
}

#[test]
fn test_content_type_omitted_without_body() {
    let response = ResponseBuilder::new(StatusCode::NotFound)
        .content_type("text/plain")
        .build();

    assert_eq!(response.to_bytes(), b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[test]
fn test_body_without_content_type() {
    let response = ResponseBuilder::new(StatusCode::Ok).body("x").build();

    assert_eq!(
        response.to_bytes(),
        b"HTTP/1.1 200 OK\r\nContent-Length: 1\r\n\r\nx".to_vec()
    );
}

#[test]
fn test_content_length_tracks_body_replacement() {
    let mut response = Response::ok("text/plain", "hello world");
    response.body = Some(vec![0; 4]);

    let bytes = response.to_bytes();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("Content-Length: 4\r\n"));
}

#[test]
fn test_serialization_is_idempotent() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .content_type("text/plain")
        .header_line("Content-Encoding: gzip")
        .body(b"payload".to_vec())
        .build();

    assert_eq!(response.to_bytes(), response.to_bytes());
}

#[test]
fn test_format_characters_are_written_literally() {
    let response = Response::ok("text/plain", "%s%n{}{0}");

    assert!(response.to_bytes().ends_with(b"\r\n\r\n%s%n{}{0}"));
}

#[test]
fn test_response_helpers() {
    let response = Response::ok("text/plain", b"test content".to_vec());
    assert_eq!(response.status, StatusCode::Ok);
    assert!(response.body.is_some());

    let response = Response::not_found();
    assert_eq!(response.status, StatusCode::NotFound);
    assert!(response.body.is_none());
    assert!(response.extra_headers.is_empty());
}

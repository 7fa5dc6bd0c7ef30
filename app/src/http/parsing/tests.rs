use pretty_assertions::assert_eq;
use test_case::test_case;

use crate::http::{parsing::ParseError, Headers, Method, Parse, Request};

#[test]
pub fn parse_should_read_minimal_http_request() {
    // Arrange
    let raw_request = concat!("GET / HTTP/1.1\r\n", "Host:localhost\r\n\r\n");
    // Act
    let request =
        Request::parse(raw_request.as_bytes()).expect("Failed to parse perfectly valid request");
    // Assert
    assert_eq!(Method::Get, *request.method());
    assert_eq!("/", request.request_target());
    let expected_headers = Headers::new(vec![("Host".into(), "localhost".into())]);
    assert_eq!(expected_headers, *request.headers());
}

#[test]
pub fn parse_should_read_request_with_query_and_negotiation_headers() {
    // Arrange
    let raw_request = concat!(
        "GET /t/welcome/42?format=json HTTP/1.1\r\n",
        "Host: forum.local\r\n",
        "Accept: application/json, text/javascript\r\n",
        "X-Requested-With: XMLHttpRequest\r\n\r\n"
    );
    // Act
    let request =
        Request::parse(raw_request.as_bytes()).expect("Failed to parse perfectly valid request");
    // Assert
    assert_eq!("/t/welcome/42", request.path());
    assert_eq!(Some("json".to_string()), request.query_param("format"));
    assert_eq!(
        Some("application/json, text/javascript"),
        request.header("accept")
    );
    assert_eq!(Some("XMLHttpRequest"), request.header("x-requested-with"));
}

#[test_case("GET /\r\nHost: localhost\r\n\r\n" ; "missing http version")]
#[test_case("GET / HTTP/1.0\r\nHost: localhost\r\n\r\n" ; "unsupported http version")]
#[test_case("GET  / HTTP/1.1\r\nHost: localhost\r\n\r\n" ; "double space")]
#[test_case("GET / HTTP/1.1 \r\nHost: localhost\r\n\r\n" ; "trailing whitespace")]
#[test_case("In the grim dark future there is only war.\r\n\r\n" ; "garbage")]
#[test_case("" ; "empty stream")]
pub fn parse_should_reject_invalid_request_line(raw_request: &str) {
    // Act
    let result = Request::parse(raw_request.as_bytes());
    // Assert
    assert_eq!(Some(ParseError::RequestLine), result.err());
}

#[test_case("GET / HTTP/1.1\r\nHost localhost\r\n\r\n" ; "missing colon")]
#[test_case("GET / HTTP/1.1\r\nHo st: localhost\r\n\r\n" ; "whitespace in name")]
#[test_case("GET / HTTP/1.1\r\nHost: localhost\r\n" ; "unterminated headers")]
#[test_case("GET / HTTP/1.1\r\nAccept: */*\r\n\r\n" ; "missing host")]
pub fn parse_should_reject_invalid_headers(raw_request: &str) {
    // Act
    let result = Request::parse(raw_request.as_bytes());
    // Assert
    assert_eq!(Some(ParseError::Header), result.err());
}

#[test]
pub fn parse_should_reject_too_many_headers() {
    // Arrange
    let mut raw_request = String::from("GET / HTTP/1.1\r\nHost: localhost\r\n");
    for i in 0..Headers::MAX_HEADER_NUMBER {
        raw_request.push_str(&format!("X-Header-{i}: {i}\r\n"));
    }
    raw_request.push_str("\r\n");
    // Act
    let result = Request::parse(raw_request.as_bytes());
    // Assert
    assert_eq!(Some(ParseError::Header), result.err());
}

#[test]
pub fn parse_should_reject_oversized_header() {
    // Arrange
    let value = "a".repeat(Headers::MAX_HEADER_SIZE);
    let raw_request = format!("GET / HTTP/1.1\r\nHost: localhost\r\nX-Big: {value}\r\n\r\n");
    // Act
    let result = Request::parse(raw_request.as_bytes());
    // Assert
    assert_eq!(Some(ParseError::Header), result.err());
}

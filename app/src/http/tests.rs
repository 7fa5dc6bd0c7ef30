use std::str::FromStr;

use pretty_assertions::assert_eq;
use test_case::test_case;

use crate::http::{Headers, Method};

#[test]
pub fn get_should_ignore_header_name_case() {
    // Arrange
    let mut sut = Headers::empty();
    sut.insert("X-Requested-With", "XMLHttpRequest");
    // Act
    let value = sut.get("x-requested-with");
    // Assert
    assert_eq!(Some("XMLHttpRequest"), value);
}

#[test]
pub fn get_should_return_first_value_of_repeated_header() {
    // Arrange
    let sut = Headers::new(vec![
        ("Accept".into(), "text/html".into()),
        ("Accept".into(), "application/json".into()),
    ]);
    // Act
    let value = sut.get("accept");
    // Assert
    assert_eq!(Some("text/html"), value);
}

#[test]
pub fn display_should_write_http_header_lines() {
    // Arrange
    let sut = Headers::new(vec![
        ("Content-Type".into(), "text/html".into()),
        ("Content-Length".into(), "4".into()),
    ]);
    // Act
    let display = sut.to_string();
    // Assert
    assert_eq!("Content-Type: text/html\r\nContent-Length: 4\r\n", display);
}

#[test_case("GET", Method::Get)]
#[test_case("OPTIONS", Method::Options)]
#[test_case("PURGE", Method::Extension("PURGE".into()))]
pub fn method_should_be_parsed_from_request_line_token(token: &str, expected: Method) {
    assert_eq!(Ok(expected), Method::from_str(token));
}

#[test]
pub fn method_should_not_be_parsed_from_empty_token() {
    assert_eq!(Err(()), Method::from_str(""));
}

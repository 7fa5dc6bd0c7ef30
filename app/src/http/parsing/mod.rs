use std::{
    error::Error,
    fmt::Display,
    io::{self, BufRead, Read},
    str::FromStr,
};

use super::{
    request::{BadRequestError, Request},
    Headers, Method, Parse,
};

#[cfg(test)]
mod tests;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParseError {
    RequestLine,
    Header,
}
impl Error for ParseError {}
impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::RequestLine => write!(f, "Invalid request line"),
            ParseError::Header => write!(f, "Invalid header line"),
        }
    }
}
impl From<BadRequestError> for ParseError {
    fn from(err: BadRequestError) -> Self {
        match err {
            BadRequestError::NoHostHeader => ParseError::Header,
            BadRequestError::MismatchedTargetHost => ParseError::Header,
            BadRequestError::FailedTargetParse(_) => ParseError::RequestLine,
        }
    }
}

/// Reads request line and headers. Bodies are not read, the forum only serves GET requests
impl<T: Read> Parse<T> for Request {
    type Err = ParseError;

    fn parse(stream: T) -> Result<Request, ParseError> {
        let mut reader = io::BufReader::new(stream);
        let request_line = RequestLine::parse(&mut reader)?;
        let headers = Headers::parse(&mut reader)?;
        let request = Request::new(request_line.method, request_line.request_target, headers)?;
        Ok(request)
    }
}

struct RequestLine {
    method: Method,
    request_target: String,
}
impl RequestLine {
    fn read_raw_request_line<T: Read>(reader: &mut io::BufReader<T>) -> Option<String> {
        let line = read_line(reader, Request::MAX_REQUEST_LINE_SIZE)?;
        String::from_utf8(line).ok()
    }
}
impl<T: Read> Parse<&mut io::BufReader<T>> for RequestLine {
    type Err = ParseError;

    fn parse(reader: &mut io::BufReader<T>) -> Result<Self, Self::Err> {
        let request_line = Self::read_raw_request_line(reader).ok_or(ParseError::RequestLine)?;
        if request_line.trim() != request_line {
            tracing::warn!("request line has surrounding whitespace");
            return Err(ParseError::RequestLine);
        }
        let parts: Vec<&str> = request_line.split(' ').collect();
        let [method, request_target, version] = parts[..] else {
            return Err(ParseError::RequestLine);
        };
        if version != "HTTP/1.1" || request_target.is_empty() {
            return Err(ParseError::RequestLine);
        }
        let request_line = RequestLine {
            method: Method::from_str(method).or(Err(ParseError::RequestLine))?,
            request_target: request_target.into(),
        };
        Ok(request_line)
    }
}

impl<T: Read> Parse<&mut io::BufReader<T>> for Headers {
    type Err = ParseError;

    fn parse(reader: &mut io::BufReader<T>) -> Result<Self, Self::Err> {
        let mut headers = Headers::empty();
        loop {
            let line = read_line(reader, Headers::MAX_HEADER_SIZE).ok_or(ParseError::Header)?;
            if line.is_empty() {
                break;
            }
            if headers.len() >= Headers::MAX_HEADER_NUMBER {
                tracing::warn!(
                    "Request header number exceeds limit of {}",
                    Headers::MAX_HEADER_NUMBER
                );
                return Err(ParseError::Header);
            }
            let line = String::from_utf8(line).or(Err(ParseError::Header))?;
            let (key, value) = line.split_once(':').ok_or(ParseError::Header)?;
            if key.is_empty() || key.chars().any(char::is_whitespace) {
                tracing::warn!("unexpected whitespace in header name: '{key}'");
                return Err(ParseError::Header);
            }
            headers.insert(key, value.trim());
        }
        Ok(headers)
    }
}

/// Reads a CRLF terminated line without the line break.
///
/// Returns [None] on EOF, IO errors or lines exceeding `max_size`
fn read_line<T: Read>(reader: &mut io::BufReader<T>, max_size: usize) -> Option<Vec<u8>> {
    let mut line = Vec::new();
    reader
        .take(max_size as u64 + 2)
        .read_until(b'\n', &mut line)
        .ok()?;
    if !line.ends_with(b"\r\n") {
        return None;
    }
    line.truncate(line.len() - 2);
    if line.len() > max_size {
        return None;
    }
    Some(line)
}

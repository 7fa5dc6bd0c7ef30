use std::fmt::Display;

use super::Headers;


#[derive(Debug, PartialEq, Eq)]
pub struct Response {
    status_code: StatusCode,
    headers: Headers,
    body: Vec<u8>,
}
impl Response {
    pub fn new(status_code: StatusCode, headers: Headers, body: Vec<u8>) -> Self {
        Self {
            status_code,
            headers,
            body,
        }
    }

    pub fn json(status_code: StatusCode, json: &serde_json::Value) -> Self {
        let mut headers = Headers::empty();
        headers.insert("Content-Type", "application/json; charset=utf-8");
        Self::new(status_code, headers, json.to_string().into_bytes())
    }

    pub fn html(status_code: StatusCode, html: String) -> Self {
        let mut headers = Headers::empty();
        headers.insert("Content-Type", "text/html; charset=utf-8");
        Self::new(status_code, headers, html.into_bytes())
    }

    pub fn http_version(&self) -> &str {
        "HTTP/1.1"
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("Content-Type")
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, invalid UTF-8 gets replaced
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Turns [Response] into an HTTP representation, adding the Content-Length
    pub fn into_bytes(self) -> Vec<u8> {
        let status_line = format!(
            "{} {} {}\r\n",
            self.http_version(),
            self.status_code.code(),
            self.status_code.reason_phrase()
        );
        let mut headers = self.headers;
        headers.insert("Content-Length", self.body.len().to_string());
        let mut raw_data = Vec::from(format!("{status_line}{headers}\r\n").as_bytes());
        raw_data.extend(self.body);
        raw_data
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound, Headers::empty(), Vec::new())
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::MethodNotAllowed, Headers::empty(), Vec::new())
    }

    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::InternalServerError, Headers::empty(), Vec::new())
    }

    pub fn bad_request() -> Self {
        Self::new(StatusCode::BadRequest, Headers::empty(), Vec::new())
    }
}
impl Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}\r\n{}",
            self.http_version(),
            self.status_code.code(),
            self.status_code.reason_phrase(),
            self.headers
        )
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum StatusCode {
    OK = 200,
    BadRequest = 400,
    Forbidden = 403,
    NotFound = 404,
    MethodNotAllowed = 405,
    InternalServerError = 500,
}
impl StatusCode {
    pub fn code(&self) -> u16 {
        *self as u16
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::OK => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}
impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

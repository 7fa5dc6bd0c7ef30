use std::{error::Error, fmt::Display};

use indexmap::IndexMap;

use super::{Headers, Method};


pub struct Request {
    method: Method,
    request_target: String,
    absolute_target: url::Url,
    headers: Headers,
    path_params: IndexMap<String, String>,
}
impl Request {
    pub const MAX_REQUEST_LINE_SIZE: usize = 8 * 1024;

    pub fn new(
        method: Method,
        request_target: impl Into<String>,
        headers: Headers,
    ) -> Result<Self, BadRequestError> {
        let request_target = request_target.into();
        let host = headers.get("host").ok_or(BadRequestError::NoHostHeader)?;
        let absolute_target = Self::resolve_absolute_target(&request_target, host)?;
        let request = Self {
            method,
            request_target,
            absolute_target,
            headers,
            path_params: IndexMap::new(),
        };
        Ok(request)
    }

    fn resolve_absolute_target(
        request_target: &str,
        host: &str,
    ) -> Result<url::Url, BadRequestError> {
        let host_url = url::Url::parse(&format!("http://{host}"))
            .map_err(BadRequestError::FailedTargetParse)?;
        if request_target.starts_with('/') {
            host_url
                .join(request_target)
                .map_err(BadRequestError::FailedTargetParse)
        } else {
            let absolute_target =
                url::Url::parse(request_target).map_err(BadRequestError::FailedTargetParse)?;
            if absolute_target.host() != host_url.host() {
                Err(BadRequestError::MismatchedTargetHost)
            } else {
                Ok(absolute_target)
            }
        }
    }

    /// HTTP Protocol version
    pub fn http_version(&self) -> &str {
        "HTTP/1.1"
    }

    /// Location of the resource as sent by the client. Can be relative or absolute
    pub fn request_target(&self) -> &str {
        &self.request_target
    }

    pub fn absolute_target(&self) -> &url::Url {
        &self.absolute_target
    }

    pub fn path(&self) -> &str {
        self.absolute_target.path()
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// First value of the query parameter, percent-decoded
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.absolute_target
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Value captured by the route that matched this request
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    pub fn set_path_params(&mut self, path_params: IndexMap<String, String>) {
        self.path_params = path_params;
    }

    pub fn matches_method(&self, method: &Method) -> bool {
        self.method() == method
    }
}
impl Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}\r\n{}",
            self.method,
            self.request_target,
            self.http_version(),
            self.headers
        )
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum BadRequestError {
    NoHostHeader,
    MismatchedTargetHost,
    FailedTargetParse(url::ParseError),
}
impl Error for BadRequestError {}
impl Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadRequestError::NoHostHeader => write!(f, "Request is missing the Host header"),
            BadRequestError::MismatchedTargetHost => {
                write!(f, "Request target does not match the Host header")
            }
            BadRequestError::FailedTargetParse(e) => write!(f, "Invalid request target: {e}"),
        }
    }
}

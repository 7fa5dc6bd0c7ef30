pub mod cancellation_token;

use cancellation_token::CancelReceiver;
use indexmap::IndexMap;
use regex::Regex;

use super::{Method, Parse, Request, Response};
use std::{
    error::Error,
    fmt::Display,
    io::{self, Write},
    net, panic, thread,
};

pub struct Server {
    listener: net::TcpListener,
    handler: Box<dyn TcpServe + Send + Sync>,
}
impl Server {
    /// Create low level TCP [Server]
    pub fn new(listener: net::TcpListener, handler: Box<dyn TcpServe + Send + Sync>) -> Self {
        Self { listener, handler }
    }

    /// Blocks execution and starts listening for connections.
    /// Connections get handled in independent threads
    pub fn start_listening(&mut self, cancel_receiver: CancelReceiver) {
        thread::scope(|s| {
            while !cancel_receiver.is_shutting_down() {
                let stream = match self.listener.accept() {
                    Ok(result) => result.0,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to accept connection");
                        continue;
                    }
                };
                let handler = &self.handler;
                s.spawn(move || {
                    let res = panic::catch_unwind(panic::AssertUnwindSafe(|| {
                        handler.serve_tcp(stream);
                    })); // Keep server alive when a request crashes handler
                    match res {
                        Ok(_) => tracing::debug!("Request handled exceptionless!"),
                        Err(e) => tracing::error!(panic = ?e, "Request failed"),
                    }
                });
            }
        });
    }
}

/// Serve implementation that routes HTTP [requests](Request) to the first matching [Endpoint]
pub struct HttpEndpointsServe {
    endpoints: Vec<Endpoint>,
}
impl HttpEndpointsServe {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self { endpoints }
    }
}
impl HttpServe for HttpEndpointsServe {
    fn serve_http(
        &self,
        client_addr: &net::SocketAddr,
        mut request: Request,
    ) -> Result<Response, InternalServerError> {
        let mut path_matched = false;
        for endpoint in &self.endpoints {
            let Some(path_params) = endpoint.match_path(request.path()) else {
                continue;
            };
            path_matched = true;
            if request.matches_method(&endpoint.method) {
                request.set_path_params(path_params);
                return endpoint.serve(client_addr, request);
            }
        }
        if path_matched {
            Ok(Response::method_not_allowed())
        } else {
            Ok(Response::not_found())
        }
    }
}

pub struct Endpoint {
    method: Method,
    path: Regex,
    handler: Box<dyn HttpServe + Sync + Send>,
}
impl Endpoint {
    /// Path is a regex matched against the whole request path.
    /// Named capture groups are passed to the handler as [path params](Request::path_param)
    pub fn new(
        method: Method,
        path: &str,
        handler: Box<dyn HttpServe + Sync + Send>,
    ) -> Result<Self, regex::Error> {
        let path = Regex::new(&format!("^(?:{path})$"))?;
        let endpoint = Self {
            method,
            path,
            handler,
        };
        Ok(endpoint)
    }

    fn match_path(&self, path: &str) -> Option<IndexMap<String, String>> {
        let captures = self.path.captures(path)?;
        let params = self
            .path
            .capture_names()
            .flatten()
            .filter_map(|name| {
                let value = captures.name(name)?;
                Some((name.to_string(), value.as_str().to_string()))
            })
            .collect();
        Some(params)
    }

    pub fn serve(
        &self,
        client_addr: &net::SocketAddr,
        request: Request,
    ) -> Result<Response, InternalServerError> {
        self.handler.serve_http(client_addr, request)
    }
}

pub trait TcpServe {
    fn serve_tcp(&self, stream: net::TcpStream);
}
pub trait HttpServe {
    fn serve_http(
        &self,
        client_addr: &net::SocketAddr,
        request: Request,
    ) -> Result<Response, InternalServerError>;
}
impl<T: HttpServe> TcpServe for T {
    fn serve_tcp(&self, stream: net::TcpStream) {
        let result = stream
            .try_clone()
            .and_then(|write_stream| handle_incoming_request(self, &stream, write_stream));
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to answer request");
        }
    }
}
fn handle_incoming_request(
    http_serve: &impl HttpServe,
    read_stream: &net::TcpStream,
    mut write_stream: net::TcpStream,
) -> io::Result<()> {
    let client_addr = read_stream.peer_addr()?;
    let response = match Request::parse(read_stream) {
        Ok(request) => {
            tracing::debug!("Incoming Request:\r\n{request}");
            match http_serve.serve_http(&client_addr, request) {
                Ok(res) => res,
                Err(e) => {
                    tracing::error!(error = %e, "Handler failed");
                    Response::internal_server_error()
                }
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting unparseable request");
            Response::bad_request()
        }
    };
    tracing::debug!("Outgoing Response:\r\n{response}");
    write_stream.write_all(&response.into_bytes())?;
    write_stream.flush()
}

/// Return this error in case an unrecoverable error happened
#[derive(Debug, PartialEq, Eq)]
pub struct InternalServerError;
impl InternalServerError {
    pub fn new() -> Self {
        Self {}
    }
}
impl Default for InternalServerError {
    fn default() -> Self {
        Self::new()
    }
}
impl Error for InternalServerError {}
impl Display for InternalServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unrecoverable error happened while processing request",)
    }
}

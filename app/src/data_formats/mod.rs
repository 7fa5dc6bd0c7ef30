use crate::http::Request;


/// Representation the client asked for
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RequestFormat {
    Html,
    Json,
}
impl RequestFormat {
    /// JSON is chosen if any of these is true:
    /// - `Accept` lists `application/json`
    /// - `X-Requested-With: XMLHttpRequest`
    /// - `?format=json`
    /// - the path ends with `.json`
    pub fn negotiate(request: &Request) -> Self {
        let accepts_json = request
            .header("accept")
            .is_some_and(|accept| accept.contains("application/json"));
        let is_xhr = request
            .header("x-requested-with")
            .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));
        let format_param = request
            .query_param("format")
            .is_some_and(|format| format == "json");
        let json_path = request.path().ends_with(".json");
        if accepts_json || is_xhr || format_param || json_path {
            RequestFormat::Json
        } else {
            RequestFormat::Html
        }
    }
}

/// Shape of the JSON body of error responses
pub trait AsJsonError {
    fn as_json_error(&self) -> serde_json::Value;
}

use std::{error::Error, fmt::Display};

use access_guide::forum::Viewer;
use regex::Regex;

use crate::http::Request;


#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    username: String,
}
impl CurrentUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn viewer(&self) -> Viewer {
        Viewer::new(&self.username)
    }
}

pub trait CurrentUserProvider {
    /// Returns [None] for anonymous requests
    fn current_user(&self, request: &Request) -> Result<Option<CurrentUser>, CurrentUserError>;
}

/// Takes the username from a header set by an authenticating reverse proxy
pub struct HeaderCurrentUserProvider {
    header: String,
    username_format: Regex,
}
impl HeaderCurrentUserProvider {
    pub const DEFAULT_HEADER: &'static str = "X-Forum-User";
    const USERNAME_FORMAT: &'static str = r"^[A-Za-z0-9_.\-]{1,60}$";

    pub fn new(header: impl Into<String>) -> Result<Self, regex::Error> {
        let provider = Self {
            header: header.into(),
            username_format: Regex::new(Self::USERNAME_FORMAT)?,
        };
        Ok(provider)
    }
}
impl CurrentUserProvider for HeaderCurrentUserProvider {
    fn current_user(&self, request: &Request) -> Result<Option<CurrentUser>, CurrentUserError> {
        let Some(username) = request.header(&self.header) else {
            return Ok(None);
        };
        if !self.username_format.is_match(username) {
            return Err(CurrentUserError::InvalidUsername(username.into()));
        }
        Ok(Some(CurrentUser::new(username)))
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum CurrentUserError {
    InvalidUsername(String),
}
impl Error for CurrentUserError {}
impl Display for CurrentUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurrentUserError::InvalidUsername(username) => {
                write!(f, "'{username}' is not a valid username")
            }
        }
    }
}

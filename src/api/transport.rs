use serde_json::Value;
use thiserror::Error;

/// The HTTP verb subset the backend interface uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Request body variants the backend accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
}

/// One backend call: method, path, query parameters and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Body::Json(body),
        }
    }

    pub fn post_form(path: impl Into<String>, fields: &[(&str, &str)]) -> Self {
        let fields = fields
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Body::Form(fields),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Failure of one round trip, before any component-level interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The backend could not be reached, or the connection failed mid-flight.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status. The body is never
    /// parsed as a success payload.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Narrow seam for one HTTP round trip. Production code goes through
/// [`HttpClient`](crate::api::client::HttpClient); tests substitute fakes.
pub trait Transport {
    /// Executes one round trip and returns the response body on a 2xx status.
    fn dispatch(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<String, TransportError>>;
}

use std::cell::RefCell;

use thiserror::Error;

use crate::api::models::RoleMap;
use crate::api::transport::{Request, Transport, TransportError};

#[derive(Debug, Error)]
pub enum RoleError {
    /// The backend was unreachable or the response body was undecodable.
    #[error("role request failed: {0}")]
    TransportFailed(String),
    /// The backend answered with a non-success status; `message` carries the
    /// body text when the backend supplied one.
    #[error("backend rejected the request ({status}): {message}")]
    BackendRejected { status: u16, message: String },
}

impl From<TransportError> for RoleError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(detail) => RoleError::TransportFailed(detail),
            TransportError::Status { status, body } => {
                let message = if body.trim().is_empty() {
                    format!("request rejected with HTTP {status}")
                } else {
                    body
                };
                RoleError::BackendRejected { status, message }
            }
        }
    }
}

/// Outcome of the most recent action of one kind. No history is retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Success(String),
    Failure(String),
}

/// Renders roles as `name: content` lines, one per role.
pub fn render_roles(roles: &RoleMap) -> String {
    roles
        .iter()
        .map(|(name, content)| format!("{name}: {content}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Client for the backend's role-preset store.
///
/// The backend is the source of truth; nothing is cached here. The four
/// operations are independent (no mutual exclusion, no retries) and each
/// records only its own last outcome, so out-of-order completion cannot
/// corrupt a neighbour's slot.
pub struct RoleRegistry<T> {
    transport: T,
    create_outcome: RefCell<Option<ActionOutcome>>,
    fetch_outcome: RefCell<Option<ActionOutcome>>,
    remove_outcome: RefCell<Option<ActionOutcome>>,
    list_error: RefCell<Option<String>>,
}

impl<T: Transport> RoleRegistry<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            create_outcome: RefCell::new(None),
            fetch_outcome: RefCell::new(None),
            remove_outcome: RefCell::new(None),
            list_error: RefCell::new(None),
        }
    }

    /// Creates a named role. The backend's raw text response is surfaced
    /// verbatim; only the HTTP status decides success.
    pub async fn create(&self, name: &str, content: &str) -> Result<String, RoleError> {
        let request = Request::post_form(
            "/Create_New_Role",
            &[("Role_name", name), ("Role_content", content)],
        );
        let result = self.transport.dispatch(request).await.map_err(RoleError::from);
        Self::record(&self.create_outcome, &result);
        result
    }

    /// Reads all roles, preserving the backend's key order.
    pub async fn list(&self) -> Result<RoleMap, RoleError> {
        let result = self.read_roles(Request::get("/Get_Roles")).await;
        *self.list_error.borrow_mut() = result.as_ref().err().map(ToString::to_string);
        result
    }

    /// Reads one role by name.
    ///
    /// The decoded object is folded last-write-wins: should the backend ever
    /// return more than one entry, only the final one is surfaced.
    pub async fn fetch(&self, name: &str) -> Result<RoleMap, RoleError> {
        let request = Request::get("/Get_Roles").with_query("name", name);
        let result = self.read_roles(request).await.map(|mut roles| {
            let mut surfaced = RoleMap::new();
            if let Some((name, content)) = roles.pop() {
                surfaced.insert(name, content);
            }
            surfaced
        });
        let outcome = match &result {
            Ok(roles) => ActionOutcome::Success(render_roles(roles)),
            Err(err) => ActionOutcome::Failure(err.to_string()),
        };
        *self.fetch_outcome.borrow_mut() = Some(outcome);
        result
    }

    /// Deletes a named role; raw text response surfaced verbatim.
    pub async fn remove(&self, name: &str) -> Result<String, RoleError> {
        let request = Request::post_form("/Delete_Role", &[("Role_name", name)]);
        let result = self.transport.dispatch(request).await.map_err(RoleError::from);
        Self::record(&self.remove_outcome, &result);
        result
    }

    async fn read_roles(&self, request: Request) -> Result<RoleMap, RoleError> {
        let body = self.transport.dispatch(request).await.map_err(RoleError::from)?;
        serde_json::from_str(&body)
            .map_err(|err| RoleError::TransportFailed(format!("undecodable role listing: {err}")))
    }

    fn record(slot: &RefCell<Option<ActionOutcome>>, result: &Result<String, RoleError>) {
        let outcome = match result {
            Ok(message) => ActionOutcome::Success(message.clone()),
            Err(err) => ActionOutcome::Failure(err.to_string()),
        };
        *slot.borrow_mut() = Some(outcome);
    }

    pub fn last_create(&self) -> Option<ActionOutcome> {
        self.create_outcome.borrow().clone()
    }

    pub fn last_fetch(&self) -> Option<ActionOutcome> {
        self.fetch_outcome.borrow().clone()
    }

    pub fn last_remove(&self) -> Option<ActionOutcome> {
        self.remove_outcome.borrow().clone()
    }

    pub fn last_list_error(&self) -> Option<String> {
        self.list_error.borrow().clone()
    }
}

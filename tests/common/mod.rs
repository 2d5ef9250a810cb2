//! Fake transports shared by the integration tests. The role store mirrors
//! the backend's observed status codes and plain-text bodies.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use indexmap::IndexMap;
use toula_cli::api::transport::{Body, Method, Request, Transport, TransportError};

/// Scripted `/chat` backend: pops one pre-programmed result per call.
pub struct ScriptedChat {
    replies: RefCell<VecDeque<Result<String, TransportError>>>,
    calls: Rc<Cell<usize>>,
}

impl ScriptedChat {
    pub fn new(replies: Vec<Result<String, TransportError>>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// Handle onto the call counter, usable after the transport moves into a
    /// session.
    pub fn calls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }

    pub fn reply(response: &str, token_info: &str) -> Result<String, TransportError> {
        Ok(format!(
            r#"{{"response": "{response}", "token_info": "{token_info}"}}"#
        ))
    }
}

impl Transport for ScriptedChat {
    async fn dispatch(&self, request: Request) -> Result<String, TransportError> {
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/chat");
        self.calls.set(self.calls.get() + 1);
        self.replies
            .borrow_mut()
            .pop_front()
            .expect("unexpected extra /chat call")
    }
}

/// Transport whose round trip never resolves.
pub struct StalledTransport;

impl Transport for StalledTransport {
    async fn dispatch(&self, _request: Request) -> Result<String, TransportError> {
        std::future::pending().await
    }
}

/// Transport that fails every call with a clone of the given error.
pub struct FailingTransport(pub TransportError);

impl Transport for FailingTransport {
    async fn dispatch(&self, _request: Request) -> Result<String, TransportError> {
        Err(self.0.clone())
    }
}

/// Transport answering every call with a fixed raw body.
pub struct CannedBody(pub &'static str);

impl Transport for CannedBody {
    async fn dispatch(&self, _request: Request) -> Result<String, TransportError> {
        Ok(self.0.to_string())
    }
}

/// Stateful stand-in for the backend role store.
pub struct FakeRoleStore {
    roles: RefCell<IndexMap<String, String>>,
}

impl FakeRoleStore {
    pub fn new() -> Self {
        Self {
            roles: RefCell::new(IndexMap::new()),
        }
    }

    pub fn with_roles(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        store.roles.borrow_mut().extend(
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string())),
        );
        store
    }

    fn form_field(body: &Body, key: &str) -> String {
        match body {
            Body::Form(fields) => fields
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .expect("missing form field"),
            other => panic!("expected a form body, got {other:?}"),
        }
    }
}

impl Transport for FakeRoleStore {
    async fn dispatch(&self, request: Request) -> Result<String, TransportError> {
        match (request.method, request.path.as_str()) {
            (Method::Post, "/Create_New_Role") => {
                let name = Self::form_field(&request.body, "Role_name");
                let content = Self::form_field(&request.body, "Role_content");
                let mut roles = self.roles.borrow_mut();
                if roles.contains_key(&name) {
                    Err(TransportError::Status {
                        status: 400,
                        body: "Role with this name already exists".to_string(),
                    })
                } else {
                    roles.insert(name, content);
                    Ok("Role created".to_string())
                }
            }
            (Method::Get, "/Get_Roles") => {
                let roles = self.roles.borrow();
                match request.query.iter().find(|(k, _)| k == "name") {
                    Some((_, name)) => match roles.get(name) {
                        Some(content) => {
                            let mut single = IndexMap::new();
                            single.insert(name.clone(), content.clone());
                            Ok(serde_json::to_string(&single).unwrap())
                        }
                        None => Err(TransportError::Status {
                            status: 404,
                            body: "Role not found".to_string(),
                        }),
                    },
                    None => Ok(serde_json::to_string(&*roles).unwrap()),
                }
            }
            (Method::Post, "/Delete_Role") => {
                let name = Self::form_field(&request.body, "Role_name");
                let mut roles = self.roles.borrow_mut();
                if roles.shift_remove(&name).is_some() {
                    Ok("Role deleted".to_string())
                } else {
                    Err(TransportError::Status {
                        status: 404,
                        body: "Role not found".to_string(),
                    })
                }
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }
}

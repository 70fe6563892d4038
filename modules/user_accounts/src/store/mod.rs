//! Client-side session state container.
//!
//! Follows the same status contract as the todo store: mark loading and
//! clear the previous error, run the use-case, then record either the
//! result or the failure's message.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::contract::model::{Credentials, NewUser, User};
use crate::domain::service::Service;

/// Observable session state.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub struct SessionStore {
    service: Arc<Service>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new(service: Arc<Service>) -> Self {
        Self {
            service,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    pub async fn sign_up(&self, data: NewUser) {
        self.begin();
        match self.service.create_user(data).await {
            Ok(user) => {
                let mut state = self.state.write();
                state.user = Some(user);
                state.is_loading = false;
            }
            Err(e) => self.finish_err(e.to_string()),
        }
    }

    pub async fn sign_in(&self, credentials: Credentials) {
        self.begin();
        match self.service.sign_in(credentials).await {
            Ok(session) => {
                let mut state = self.state.write();
                state.user = Some(session.user);
                state.token = Some(session.token);
                state.is_loading = false;
            }
            Err(e) => self.finish_err(e.to_string()),
        }
    }

    pub fn sign_out(&self) {
        let mut state = self.state.write();
        state.user = None;
        state.token = None;
        state.error = None;
    }

    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    fn begin(&self) {
        let mut state = self.state.write();
        state.is_loading = true;
        state.error = None;
    }

    fn finish_err(&self, message: String) {
        let mut state = self.state.write();
        state.error = Some(message);
        state.is_loading = false;
    }
}

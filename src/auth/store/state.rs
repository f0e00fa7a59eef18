use serde::Serialize;

use crate::auth::{AuthError, User};
use crate::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<AuthError>,
}

impl UiState for AuthState {}

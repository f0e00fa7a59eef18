use crate::auth::store::event::AuthMessage;
use crate::auth::store::state::AuthState;
use crate::mvi::Reducer;

pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Message = AuthMessage;

    fn reduce(state: Self::State, message: Self::Message) -> Self::State {
        match message {
            AuthMessage::SetLoading(is_loading) => AuthState {
                is_loading,
                error: None,
                ..state
            },
            AuthMessage::UserChanged(user) => AuthState {
                is_authenticated: user.is_some(),
                user,
                ..state
            },
            AuthMessage::UserReceived(user) => AuthState {
                user: Some(user),
                is_authenticated: true,
                is_loading: false,
                error: None,
            },
            AuthMessage::SignedOut => AuthState::default(),
            AuthMessage::Completed => AuthState {
                is_loading: false,
                error: None,
                ..state
            },
            AuthMessage::Failed(error) => AuthState {
                is_loading: false,
                error: Some(error),
                ..state
            },
            AuthMessage::ClearError => AuthState {
                error: None,
                ..state
            },
        }
    }
}

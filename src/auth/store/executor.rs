use std::future::Future;
use std::sync::Arc;

use crate::auth::store::event::{AuthAction, AuthLabel, AuthMessage};
use crate::auth::store::intent::AuthIntent;
use crate::auth::store::state::AuthState;
use crate::auth::{AuthError, AuthRepository, User};
use crate::mvi::{ContextOf, Executor};

type Context = ContextOf<AuthExecutor>;

pub(super) struct AuthExecutor {
    repository: Arc<dyn AuthRepository>,
}

impl AuthExecutor {
    pub(super) fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }
}

/// Mark the store loading, run `operation`, and hand a success to
/// `on_success`. Failures become [`AuthMessage::Failed`].
fn run<T, Fut, F>(context: &Context, operation: &'static str, future: Fut, on_success: F)
where
    T: Send + 'static,
    Fut: Future<Output = Result<T, AuthError>> + Send + 'static,
    F: FnOnce(T, &Context) + Send + 'static,
{
    context.dispatch(AuthMessage::SetLoading(true));
    let ctx = context.clone();
    context.launch(async move {
        match future.await {
            Ok(value) => {
                tracing::debug!(store = "auth", operation, "operation succeeded");
                on_success(value, &ctx);
            }
            Err(error) => {
                tracing::warn!(
                    store = "auth",
                    operation,
                    error_type = error.error_type(),
                    "operation failed"
                );
                ctx.dispatch(AuthMessage::Failed(error));
            }
        }
    });
}

fn signed_in(user: User, context: &Context) {
    context.dispatch(AuthMessage::UserReceived(user));
    context.publish(AuthLabel::NavigateToHome);
}

fn user_updated(user: User, context: &Context) {
    context.dispatch(AuthMessage::UserReceived(user));
}

fn otp_sent(_: (), context: &Context) {
    context.dispatch(AuthMessage::Completed);
    context.publish(AuthLabel::ShowOtpSent);
}

impl Executor for AuthExecutor {
    type Intent = AuthIntent;
    type Action = AuthAction;
    type State = AuthState;
    type Message = AuthMessage;
    type Label = AuthLabel;

    fn execute_intent(&mut self, intent: AuthIntent, context: &Context) {
        let op = intent.tag();
        tracing::debug!(store = "auth", intent = op, "executing intent");
        let repo = Arc::clone(&self.repository);

        match intent {
            AuthIntent::SignUpWithEmail {
                email,
                password,
                display_name,
            } => run(
                context,
                op,
                async move {
                    repo.sign_up_with_email(&email, &password, display_name.as_deref())
                        .await
                },
                signed_in,
            ),
            AuthIntent::SignUpWithPhone {
                phone,
                password,
                display_name,
            } => run(
                context,
                op,
                async move {
                    repo.sign_up_with_phone(&phone, &password, display_name.as_deref())
                        .await
                },
                signed_in,
            ),
            AuthIntent::SignInWithEmail { email, password } => run(
                context,
                op,
                async move { repo.sign_in_with_email(&email, &password).await },
                signed_in,
            ),
            AuthIntent::SignInWithPhone { phone, password } => run(
                context,
                op,
                async move { repo.sign_in_with_phone(&phone, &password).await },
                signed_in,
            ),
            AuthIntent::SignInWithEmailOtp { email, otp } => run(
                context,
                op,
                async move { repo.sign_in_with_email_otp(&email, &otp).await },
                signed_in,
            ),
            AuthIntent::SignInWithPhoneOtp { phone, otp } => run(
                context,
                op,
                async move { repo.sign_in_with_phone_otp(&phone, &otp).await },
                signed_in,
            ),
            AuthIntent::SendEmailOtp { email } => run(
                context,
                op,
                async move { repo.send_email_otp(&email).await },
                otp_sent,
            ),
            AuthIntent::SendPhoneOtp { phone } => run(
                context,
                op,
                async move { repo.send_phone_otp(&phone).await },
                otp_sent,
            ),
            AuthIntent::SignOut => run(
                context,
                op,
                async move { repo.sign_out().await },
                |(), ctx| {
                    ctx.dispatch(AuthMessage::SignedOut);
                    ctx.publish(AuthLabel::NavigateToAuth);
                },
            ),
            AuthIntent::ResetPassword { email } => run(
                context,
                op,
                async move { repo.reset_password(&email).await },
                |(), ctx| {
                    ctx.dispatch(AuthMessage::Completed);
                    ctx.publish(AuthLabel::ShowPasswordResetSent);
                },
            ),
            AuthIntent::UpdatePassword {
                current_password,
                new_password,
            } => run(
                context,
                op,
                async move {
                    repo.update_password(&current_password, &new_password)
                        .await
                },
                user_updated,
            ),
            AuthIntent::UpdateEmail {
                new_email,
                password,
            } => run(
                context,
                op,
                async move { repo.update_email(&new_email, &password).await },
                user_updated,
            ),
            AuthIntent::UpdatePhone {
                new_phone,
                password,
            } => run(
                context,
                op,
                async move { repo.update_phone(&new_phone, &password).await },
                user_updated,
            ),
            AuthIntent::UpdateDisplayName { display_name } => run(
                context,
                op,
                async move { repo.update_display_name(&display_name).await },
                user_updated,
            ),
            AuthIntent::UpdateAvatarUrl { avatar_url } => run(
                context,
                op,
                async move { repo.update_avatar_url(&avatar_url).await },
                user_updated,
            ),
            AuthIntent::DeleteAccount { password } => run(
                context,
                op,
                async move { repo.delete_account(&password).await },
                |(), ctx| {
                    ctx.dispatch(AuthMessage::SignedOut);
                    ctx.publish(AuthLabel::ShowAccountDeleted);
                    ctx.publish(AuthLabel::NavigateToAuth);
                },
            ),
            AuthIntent::RefreshSession => run(
                context,
                op,
                async move { repo.refresh_session().await },
                user_updated,
            ),
            AuthIntent::ClearError => context.dispatch(AuthMessage::ClearError),
        }
    }

    fn execute_action(&mut self, action: AuthAction, context: &Context) {
        match action {
            AuthAction::UserChanged(user) => context.dispatch(AuthMessage::UserChanged(user)),
        }
    }
}

use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthIntent {
    SignUpWithEmail {
        email: String,
        password: String,
        display_name: Option<String>,
    },
    SignUpWithPhone {
        phone: String,
        password: String,
        display_name: Option<String>,
    },
    SignInWithEmail { email: String, password: String },
    SignInWithPhone { phone: String, password: String },
    SignInWithEmailOtp { email: String, otp: String },
    SignInWithPhoneOtp { phone: String, otp: String },
    SendEmailOtp { email: String },
    SendPhoneOtp { phone: String },
    SignOut,
    ResetPassword { email: String },
    UpdatePassword {
        current_password: String,
        new_password: String,
    },
    UpdateEmail { new_email: String, password: String },
    UpdatePhone { new_phone: String, password: String },
    UpdateDisplayName { display_name: String },
    UpdateAvatarUrl { avatar_url: String },
    DeleteAccount { password: String },
    RefreshSession,
    ClearError,
}

impl Intent for AuthIntent {}

impl AuthIntent {
    /// Variant name without payload. Safe to log: carries no credentials.
    pub fn tag(&self) -> &'static str {
        match self {
            AuthIntent::SignUpWithEmail { .. } => "sign_up_with_email",
            AuthIntent::SignUpWithPhone { .. } => "sign_up_with_phone",
            AuthIntent::SignInWithEmail { .. } => "sign_in_with_email",
            AuthIntent::SignInWithPhone { .. } => "sign_in_with_phone",
            AuthIntent::SignInWithEmailOtp { .. } => "sign_in_with_email_otp",
            AuthIntent::SignInWithPhoneOtp { .. } => "sign_in_with_phone_otp",
            AuthIntent::SendEmailOtp { .. } => "send_email_otp",
            AuthIntent::SendPhoneOtp { .. } => "send_phone_otp",
            AuthIntent::SignOut => "sign_out",
            AuthIntent::ResetPassword { .. } => "reset_password",
            AuthIntent::UpdatePassword { .. } => "update_password",
            AuthIntent::UpdateEmail { .. } => "update_email",
            AuthIntent::UpdatePhone { .. } => "update_phone",
            AuthIntent::UpdateDisplayName { .. } => "update_display_name",
            AuthIntent::UpdateAvatarUrl { .. } => "update_avatar_url",
            AuthIntent::DeleteAccount { .. } => "delete_account",
            AuthIntent::RefreshSession => "refresh_session",
            AuthIntent::ClearError => "clear_error",
        }
    }
}

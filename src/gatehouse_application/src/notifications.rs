//! Out-of-band messages carrying verification and reset tokens.

use askama::Template;
use gatehouse_core::{AccountError, Email, EmailClient};

pub const VERIFICATION_SUBJECT: &str = "Verify your email";
pub const RESET_SUBJECT: &str = "Reset your password";

#[derive(Template)]
#[template(
    ext = "txt",
    source = "Hi {{ name }},\n\nWelcome aboard. Use the code below to verify your email address.\n\n{{ token }}\n"
)]
pub struct VerificationEmail<'a> {
    pub name: &'a str,
    pub token: &'a str,
}

#[derive(Template)]
#[template(
    ext = "txt",
    source = "Hi {{ name }},\n\nSomeone asked to reset the password of this account. If it was you, use the code below. Otherwise you can ignore this message.\n\n{{ token }}\n"
)]
pub struct ResetEmail<'a> {
    pub name: &'a str,
    pub token: &'a str,
}

/// Renders `message` and hands it to the email client.
pub async fn deliver<E, M>(
    email_client: &E,
    recipient: &Email,
    subject: &str,
    message: &M,
) -> Result<(), AccountError>
where
    E: EmailClient,
    M: Template + Sync,
{
    let content = message
        .render()
        .map_err(|e| AccountError::Internal(e.to_string()))?;

    email_client
        .send_email(recipient, subject, &content)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Email delivery failed");
            AccountError::Delivery(e)
        })
}

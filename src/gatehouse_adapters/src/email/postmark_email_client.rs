use gatehouse_application::notifications::{RESET_SUBJECT, VERIFICATION_SUBJECT};
use gatehouse_core::{Email, EmailClient};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Sends account mail through the Postmark HTTP API.
///
/// Messages go out as `"<sender_name>" <sender>` and are tagged by kind, so verification and
/// reset mail can be told apart in Postmark's activity feed.
#[derive(Clone)]
pub struct PostmarkEmailClient {
    http_client: Client,
    endpoint: Url,
    from: String,
    authorization_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: &str,
        sender_name: &str,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Result<Self, url::ParseError> {
        let endpoint = Url::parse(base_url)?.join("/email")?;

        Ok(Self {
            http_client,
            endpoint,
            from: format!("\"{sender_name}\" <{}>", sender.as_str()),
            authorization_token,
        })
    }
}

/// Postmark tag for a message, derived from its subject.
fn tag_for(subject: &str) -> Option<&'static str> {
    match subject {
        VERIFICATION_SUBJECT => Some("email-verification"),
        RESET_SUBJECT => Some("password-reset"),
        _ => None,
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending email", skip_all, fields(subject = subject))]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        let request_body = SendEmailRequest {
            from: &self.from,
            to: recipient.as_str(),
            subject,
            text_body: content,
            tag: tag_for(subject),
            message_stream: MESSAGE_STREAM,
        };

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        match response.json::<PostmarkError>().await {
            Ok(error) => Err(format!(
                "Postmark rejected the message ({status}, code {}): {}",
                error.error_code, error.message
            )),
            Err(_) => Err(format!("Postmark rejected the message ({status})")),
        }
    }
}

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
    message_stream: &'a str,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct PostmarkError {
    error_code: i64,
    message: String,
}

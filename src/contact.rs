//! Contact-form relay: validates a submission and sends an owner notification
//! plus a visitor confirmation through a pluggable mail relay.

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

pub const OWNER_ADDRESS_ENV: &str = "CONTACT_OWNER_ADDRESS";
pub const SENDER_ADDRESS_ENV: &str = "CONTACT_SENDER_ADDRESS";

#[derive(Debug, Clone, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Error)]
#[error("mail relay failed: {0}")]
pub struct RelayError(pub String);

/// Outbound mail transport.
pub trait MailRelay {
    fn send(&mut self, message: &MailMessage) -> Result<(), RelayError>;
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("method {0} not allowed")]
    MethodNotAllowed(String),
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("missing required fields")]
    MissingFields,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("missing environment variable {0}")]
    MissingConfig(&'static str),
    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl ContactError {
    pub fn status(&self) -> u16 {
        match self {
            ContactError::MethodNotAllowed(_) => 405,
            ContactError::MalformedBody(_)
            | ContactError::MissingFields
            | ContactError::InvalidEmail => 400,
            ContactError::MissingConfig(_) | ContactError::Relay(_) => 500,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ContactError::MethodNotAllowed(_) => "Method Not Allowed",
            ContactError::MalformedBody(_) | ContactError::MissingFields => "Missing required fields",
            ContactError::InvalidEmail => "Invalid email address",
            ContactError::MissingConfig(_) | ContactError::Relay(_) => {
                "An internal server error occurred."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactConfig {
    pub owner_address: String,
    pub sender_address: String,
    pub owner_name: String,
}

impl ContactConfig {
    pub fn from_env() -> Result<Self, ContactError> {
        let owner_address = std::env::var(OWNER_ADDRESS_ENV)
            .map_err(|_| ContactError::MissingConfig(OWNER_ADDRESS_ENV))?;
        let sender_address = std::env::var(SENDER_ADDRESS_ENV)
            .map_err(|_| ContactError::MissingConfig(SENDER_ADDRESS_ENV))?;
        Ok(Self {
            owner_address,
            sender_address,
            owner_name: "Portfolio Owner".to_string(),
        })
    }
}

/// HTTP-shaped reply: status code plus a JSON body `{ "message": ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ContactResponse {
    fn ok() -> Self {
        Self {
            status: 200,
            body: json!({ "message": "Message sent successfully!" }),
        }
    }

    fn from_error(err: &ContactError) -> Self {
        Self {
            status: err.status(),
            body: json!({ "message": err.public_message() }),
        }
    }
}

/// Handle one contact-form request end to end.
pub fn handle_contact(
    method: &str,
    body: &str,
    config: &ContactConfig,
    relay: &mut impl MailRelay,
) -> ContactResponse {
    match relay_submission(method, body, config, relay) {
        Ok(()) => ContactResponse::ok(),
        Err(err) => {
            if err.status() >= 500 {
                error!(%err, "error handling contact form");
            }
            ContactResponse::from_error(&err)
        }
    }
}

fn relay_submission(
    method: &str,
    body: &str,
    config: &ContactConfig,
    relay: &mut impl MailRelay,
) -> Result<(), ContactError> {
    if !method.eq_ignore_ascii_case("POST") {
        return Err(ContactError::MethodNotAllowed(method.to_string()));
    }
    let submission: ContactSubmission = serde_json::from_str(body)?;
    submission.validate()?;

    let (to_owner, to_visitor) = compose_messages(&submission, config);
    relay.send(&to_owner)?;
    relay.send(&to_visitor)?;
    info!(from = %submission.email, "contact message relayed");
    Ok(())
}

impl ContactSubmission {
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.message.trim().is_empty() {
            return Err(ContactError::MissingFields);
        }
        if !is_plausible_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn compose_messages(submission: &ContactSubmission, config: &ContactConfig) -> (MailMessage, MailMessage) {
    let name = escape_html(submission.name.trim());
    let email = escape_html(submission.email.trim());
    let message = escape_html(&submission.message).replace('\n', "<br>");

    let to_owner = MailMessage {
        from: format!("Portfolio Contact Form <{}>", config.sender_address),
        to: config.owner_address.clone(),
        subject: format!("New Message from {} via your Portfolio", submission.name.trim()),
        html: format!(
            "<div style=\"font-family: sans-serif; line-height: 1.6;\">\
             <h2>New Contact Form Submission</h2>\
             <p><strong>Name:</strong> {name}</p>\
             <p><strong>Email:</strong> <a href=\"mailto:{email}\">{email}</a></p>\
             <hr><h3>Message:</h3><p>{message}</p></div>"
        ),
    };

    let to_visitor = MailMessage {
        from: format!("{} <{}>", config.owner_name, config.sender_address),
        to: submission.email.trim().to_string(),
        subject: "Thank you for your message!".to_string(),
        html: format!(
            "<div style=\"font-family: sans-serif; line-height: 1.6;\">\
             <h2>Thank You For Reaching Out!</h2>\
             <p>Hi {name},</p>\
             <p>I have successfully received your message and will get back to you as soon as possible.</p></div>"
        ),
    };

    (to_owner, to_visitor)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

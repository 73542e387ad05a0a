//! Contact form relay.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::client::ApiClient;

/// A submitted contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

/// What the backend said about a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactOutcome {
    pub success: bool,
    pub message: String,
}

/// Backend acknowledgement; both fields are optional in practice.
#[derive(Debug, Default, Deserialize)]
struct ContactAck {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

const SENT_MESSAGE: &str = "Your message has been sent.";
const FAILED_MESSAGE: &str = "Could not send your message right now. Please try again later.";

#[derive(Debug, Clone)]
pub struct HttpContactService {
    client: Arc<ApiClient>,
}

impl HttpContactService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContactService for HttpContactService {
    async fn submit(&self, form: ContactForm) -> ContactOutcome {
        match self.client.post::<ContactAck, _>("contact", &form).await {
            Ok(ack) => ContactOutcome {
                success: ack.success.unwrap_or(true),
                message: ack.message.unwrap_or_else(|| SENT_MESSAGE.to_owned()),
            },
            Err(error) => {
                warn!("contact form submission failed: {error}");
                ContactOutcome {
                    success: false,
                    message: FAILED_MESSAGE.to_owned(),
                }
            }
        }
    }
}

/// Relays contact form submissions to the backend.
#[automock]
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Submit a contact form; network failures become a polite refusal.
    async fn submit(&self, form: ContactForm) -> ContactOutcome;
}

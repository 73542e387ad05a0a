//! Contact Form Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use boltpromo_app::domain::ContactForm;

use crate::{extensions::*, state::State};

/// A contact form submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactRequest {
    /// Sender's name
    pub name: String,
    /// Sender's email address
    pub email: String,
    /// Optional subject line
    pub subject: Option<String>,
    /// Message body
    pub message: String,
}

/// Contact form acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactResponse {
    /// Whether the message was accepted
    pub success: bool,
    /// Human-readable outcome
    pub message: String,
}

fn validate(form: &ContactRequest) -> Result<(), StatusError> {
    if form.name.trim().is_empty() {
        return Err(StatusError::bad_request().brief("Name is required"));
    }

    if form.email.trim().is_empty() || !form.email.contains('@') {
        return Err(StatusError::bad_request().brief("A valid email is required"));
    }

    if form.message.trim().is_empty() {
        return Err(StatusError::bad_request().brief("Message is required"));
    }

    Ok(())
}

/// Contact Form Handler
///
/// Validates the form and relays it to the backend. Backend failures come
/// back as `success: false`, not as HTTP errors.
#[endpoint(tags("contact"), summary = "Submit contact form")]
pub(crate) async fn handler(
    form: JsonBody<ContactRequest>,
    depot: &mut Depot,
) -> Result<Json<ContactResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let form = form.into_inner();

    validate(&form)?;

    let outcome = state
        .app
        .contact
        .submit(ContactForm {
            name: form.name,
            email: form.email,
            subject: form.subject,
            message: form.message,
        })
        .await;

    Ok(Json(ContactResponse {
        success: outcome.success,
        message: outcome.message,
    }))
}

//! Connect (contact form) route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use oakline_core::{Inquiry, ProjectKind};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{add_breadcrumb, capture};
use crate::filters;
use crate::middleware::SessionCart;
use crate::models::SiteChrome;
use crate::routes::checkout::capitalize;
use crate::state::AppState;

const DELIVERY_FAILED: &str =
    "We couldn't send your message just now. Please try again in a few minutes.";

/// Connect form data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConnectForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project: String,
    pub message: String,
}

/// Connect page query parameters.
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub project: Option<String>,
}

/// Project type dropdown option.
pub struct ProjectOption {
    pub slug: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn project_options(selected: &str) -> Vec<ProjectOption> {
    let selected = ProjectKind::parse(selected).unwrap_or_default();
    ProjectKind::ALL
        .into_iter()
        .map(|kind| ProjectOption {
            slug: kind.slug(),
            label: kind.label(),
            selected: kind == selected,
        })
        .collect()
}

/// Connect form template.
#[derive(Template, WebTemplate)]
#[template(path = "connect/show.html")]
pub struct ConnectTemplate {
    pub chrome: SiteChrome,
    pub form: ConnectForm,
    pub projects: Vec<ProjectOption>,
    pub error: Option<String>,
}

/// Thank-you page template.
#[derive(Template, WebTemplate)]
#[template(path = "connect/thanks.html")]
pub struct ThanksTemplate {
    pub chrome: SiteChrome,
    pub name: String,
    pub email: String,
}

/// Display the connect form, optionally preselecting a project type.
#[instrument(skip(cart))]
pub async fn show(cart: SessionCart, Query(query): Query<ConnectQuery>) -> impl IntoResponse {
    let form = ConnectForm {
        project: query.project.unwrap_or_default(),
        ..ConnectForm::default()
    };

    ConnectTemplate {
        chrome: cart.chrome(),
        projects: project_options(&form.project),
        form,
        error: None,
    }
}

/// Validate and deliver an inquiry.
///
/// Invalid input re-renders the form with `422 Unprocessable Entity`;
/// a delivery failure re-renders it with `502 Bad Gateway`.
#[instrument(skip(state, cart, form))]
pub async fn submit(
    State(state): State<AppState>,
    cart: SessionCart,
    Form(form): Form<ConnectForm>,
) -> Response {
    let inquiry = match Inquiry::new(
        &form.name,
        &form.email,
        Some(&form.phone),
        &form.project,
        &form.message,
    ) {
        Ok(inquiry) => inquiry,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected connect form");
            return form_error(&cart, form, StatusCode::UNPROCESSABLE_ENTITY, capitalize(&e.to_string()));
        }
    };

    match state.inquiries().deliver(&inquiry).await {
        Ok(delivery) => {
            tracing::info!(?delivery, project = inquiry.project.slug(), "Inquiry received");
            add_breadcrumb("connect", "Inquiry sent", Some(&[("project", inquiry.project.slug())]));
            ThanksTemplate {
                chrome: cart.chrome(),
                name: inquiry.name,
                email: inquiry.email,
            }
            .into_response()
        }
        Err(e) => {
            capture(&e, "Failed to deliver inquiry");
            form_error(&cart, form, StatusCode::BAD_GATEWAY, DELIVERY_FAILED.to_string())
        }
    }
}

fn form_error(cart: &SessionCart, form: ConnectForm, status: StatusCode, message: String) -> Response {
    let template = ConnectTemplate {
        chrome: cart.chrome(),
        projects: project_options(&form.project),
        form,
        error: Some(message),
    };
    (status, template).into_response()
}

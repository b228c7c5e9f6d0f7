//! Client page.

use actix_web::{HttpResponse, http::header::ContentType};
use hitcount_shared::{CallState, HTTP_ERROR_PREFIX, IDLE_LABEL, LOADING_LABEL};

const TEMPLATE: &str = include_str!("../../assets/index.html");

/// GET / - the page, rendered in its idle state.
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render(&CallState::default()))
}

fn render(state: &CallState) -> String {
    TEMPLATE
        .replace("{{button_label}}", state.button_label())
        .replace("{{result}}", &state.render_html())
        .replace("{{idle_label}}", IDLE_LABEL)
        .replace("{{loading_label}}", LOADING_LABEL)
        .replace("{{http_error_prefix}}", HTTP_ERROR_PREFIX)
}

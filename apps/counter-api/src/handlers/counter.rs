//! Counter endpoint.

use actix_web::{HttpResponse, web};
use hitcount_core::COUNTER_KEY;
use hitcount_shared::CounterResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api - increment the shared counter and return its new value.
///
/// Not idempotent: a failure after the store applied the increment still
/// advances the counter.
pub async fn increment(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let count = state.store.incr_and_get(COUNTER_KEY).await?;
    tracing::debug!(count = count, "Counter incremented");

    Ok(HttpResponse::Ok().json(CounterResponse::new(count)))
}

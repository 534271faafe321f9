//! HTTP endpoint handlers. These are thin wrappers that forward to the library.
//! Each handler is instrumented and logs input sizes and basic result info.

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;
use tracing::{info, instrument};

use crate::cep::{Address, CepError};
use crate::currency::format_amount;
use crate::datetime::{DateError, DateStyle};
use crate::mask;
use crate::object::filter_data;
use crate::protocol::*;
use crate::state::AppState;

/// Failures a handler reports as `{"error": ...}` with a matching status.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Cep(#[from] CepError),
  #[error(transparent)]
  Date(#[from] DateError),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, error) = match &self {
      ApiError::Cep(CepError::InvalidCep(_)) => (StatusCode::BAD_REQUEST, self.to_string()),
      ApiError::Cep(CepError::NotFound(_)) => (StatusCode::NOT_FOUND, self.to_string()),
      ApiError::Cep(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
      ApiError::Date(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
    };
    (status, Json(ErrorOut { error })).into_response()
  }
}

/// Apply the requested mask. Only `phone` keeps a `null` value as `null`.
pub fn apply_mask(kind: MaskKind, value: Option<&str>, max: Option<usize>) -> Option<String> {
  let text = value.unwrap_or_default();
  match kind {
    MaskKind::Phone => mask::format_phone(value),
    MaskKind::Date => Some(mask::format_date_input(text)),
    MaskKind::HourMinute => Some(mask::format_hour_minute_input(text)),
    MaskKind::Hour => Some(mask::format_hour_input(text)),
    MaskKind::PostalCode => Some(mask::format_postal_code(text)),
    MaskKind::CreditCard => Some(mask::format_credit_card(text)),
    MaskKind::Amount => Some(format_amount(text, max.unwrap_or(DEFAULT_AMOUNT_MAX))),
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(body), fields(shape = ?body.shape, value_len = body.value.as_ref().map(String::len)))]
pub async fn http_post_mask(Json(body): Json<MaskIn>) -> impl IntoResponse {
  let formatted = apply_mask(body.shape, body.value.as_deref(), body.max);
  Json(MaskOut { formatted })
}

#[instrument(level = "info", skip(state, body), fields(style = ?body.style, value_len = body.value.len()))]
pub async fn http_post_date(
  State(state): State<Arc<AppState>>,
  Json(body): Json<DateIn>,
) -> Result<Json<DateOut>, ApiError> {
  let formatted = match body.style {
    DateStyle::Date => state.dates.format_date(&body.value),
    style => state.dates.format(&body.value, style)?,
  };
  Ok(Json(DateOut { formatted }))
}

#[instrument(level = "info", skip(state, cep), fields(%cep))]
pub async fn http_get_cep(
  State(state): State<Arc<AppState>>,
  Path(cep): Path<String>,
) -> Result<Json<Address>, ApiError> {
  let address = state.cep.lookup(&cep).await?;
  info!(target: "cep", city = %address.city, uf = %address.state, "HTTP CEP served");
  Ok(Json(address))
}

#[instrument(level = "info", skip(body), fields(term_len = body.term.len(), records = body.data.len()))]
pub async fn http_post_filter(Json(body): Json<FilterIn>) -> impl IntoResponse {
  let data = filter_data(&body.term, &body.data);
  info!(target: "formkit", kept = data.len(), "HTTP filter applied");
  Json(FilterOut { data })
}

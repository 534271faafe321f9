//! Postal-code (CEP) lookup against ViaCEP.
//!
//! One GET per lookup, no retry. Calls are instrumented and log the CEP, status
//! and latency. Failures come back as [`CepError`], never as an address.

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::config::CepConfig;
use crate::mask::only_digits;
use crate::util::trunc_for_log;

const CEP_DIGITS: usize = 8;

/// Address record as ViaCEP returns it. Field names stay on the wire; missing ones are empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
  #[serde(default)]
  pub cep: String,
  #[serde(default, rename = "logradouro")]
  pub street: String,
  #[serde(default, rename = "complemento")]
  pub complement: String,
  #[serde(default, rename = "bairro")]
  pub neighborhood: String,
  #[serde(default, rename = "localidade")]
  pub city: String,
  #[serde(default, rename = "uf")]
  pub state: String,
  #[serde(default)]
  pub ibge: String,
  #[serde(default)]
  pub gia: String,
  #[serde(default)]
  pub ddd: String,
  #[serde(default)]
  pub siafi: String,
}

#[derive(Debug, Error)]
pub enum CepError {
  #[error("CEP must have 8 digits, got {0:?}")]
  InvalidCep(String),
  #[error("CEP {0} not found")]
  NotFound(String),
  #[error("CEP service returned HTTP {0}")]
  Status(StatusCode),
  #[error("CEP request failed: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("CEP response is not an address: {0}")]
  Decode(#[from] serde_json::Error),
}

#[derive(Clone, Debug)]
pub struct CepClient {
  client: reqwest::Client,
  base_url: String,
}

impl CepClient {
  pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CepError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Ok(Self { client, base_url })
  }

  pub fn from_config(cfg: &CepConfig) -> Result<Self, CepError> {
    Self::new(cfg.base_url.clone(), Duration::from_secs(cfg.timeout_secs))
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Look up `cep`. Punctuation is ignored ("01001-000" works), but exactly eight
  /// digits must remain or no request is sent.
  #[instrument(level = "info", skip(self), fields(base_url = %self.base_url))]
  pub async fn lookup(&self, cep: &str) -> Result<Address, CepError> {
    let digits = only_digits(cep);
    if digits.len() != CEP_DIGITS {
      warn!(target: "cep", cep = %trunc_for_log(cep, 32), "Rejected CEP before lookup");
      return Err(CepError::InvalidCep(cep.to_string()));
    }

    let url = format!("{}/{}/json/", self.base_url, digits);
    let started = Instant::now();
    let res = self
      .client
      .get(&url)
      .header(USER_AGENT, "formkit/0.1")
      .header(ACCEPT, "application/json")
      .send()
      .await
      .map_err(|e| {
        error!(target: "cep", %digits, error = %e, "CEP request failed");
        CepError::from(e)
      })?;

    let status = res.status();
    if !status.is_success() {
      error!(target: "cep", %digits, %status, elapsed = ?started.elapsed(), "CEP service error status");
      return Err(CepError::Status(status));
    }

    let body = res.text().await.map_err(|e| {
      error!(target: "cep", %digits, error = %e, "Failed reading CEP response body");
      CepError::from(e)
    })?;
    info!(target: "cep", %digits, %status, bytes = body.len(), elapsed = ?started.elapsed(), "CEP response received");

    parse_address(&digits, &body)
  }
}

fn parse_address(digits: &str, body: &str) -> Result<Address, CepError> {
  let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
    error!(target: "cep", %digits, body = %trunc_for_log(body, 200), error = %e, "CEP response is not JSON");
    CepError::from(e)
  })?;

  // ViaCEP answers 200 with {"erro": true} (or "true") for unknown codes.
  let missing = match value.get("erro") {
    Some(serde_json::Value::Bool(b)) => *b,
    Some(serde_json::Value::String(s)) => s == "true",
    _ => false,
  };
  if missing {
    warn!(target: "cep", %digits, "CEP not found");
    return Err(CepError::NotFound(digits.to_string()));
  }

  serde_json::from_value(value).map_err(|e| {
    error!(target: "cep", %digits, error = %e, "CEP response has unexpected shape");
    CepError::from(e)
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::{extract::Path, http::StatusCode as HttpStatus, response::IntoResponse, routing::get, Json, Router};
  use tokio::net::TcpListener;

  async fn viacep_stub(Path(cep): Path<String>) -> axum::response::Response {
    match cep.as_str() {
      "01001000" => Json(serde_json::json!({
        "cep": "01001-000",
        "logradouro": "Praça da Sé",
        "complemento": "lado ímpar",
        "bairro": "Sé",
        "localidade": "São Paulo",
        "uf": "SP",
        "ibge": "3550308",
        "gia": "1004",
        "ddd": "11",
        "siafi": "7107",
        "regiao": "Sudeste"
      }))
      .into_response(),
      "99999999" => Json(serde_json::json!({ "erro": true })).into_response(),
      "88888888" => Json(serde_json::json!({ "erro": "true" })).into_response(),
      "12121212" => "<html>maintenance</html>".into_response(),
      _ => HttpStatus::BAD_REQUEST.into_response(),
    }
  }

  async fn stub_base_url() -> String {
    let app = Router::new().route("/ws/:cep/json/", get(viacep_stub));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/ws/", addr)
  }

  async fn client() -> CepClient {
    CepClient::new(stub_base_url().await, Duration::from_secs(5)).unwrap()
  }

  #[tokio::test]
  async fn resolves_known_cep() {
    let c = client().await;
    let addr = c.lookup("01001-000").await.unwrap();
    assert_eq!(addr.cep, "01001-000");
    assert_eq!(addr.street, "Praça da Sé");
    assert_eq!(addr.neighborhood, "Sé");
    assert_eq!(addr.city, "São Paulo");
    assert_eq!(addr.state, "SP");
    assert_eq!(addr.ddd, "11");
  }

  #[tokio::test]
  async fn unknown_cep_is_not_found() {
    let c = client().await;
    assert!(matches!(c.lookup("99999999").await, Err(CepError::NotFound(d)) if d == "99999999"));
    assert!(matches!(c.lookup("88888-888").await, Err(CepError::NotFound(_))));
  }

  #[tokio::test]
  async fn malformed_cep_never_hits_the_network() {
    let c = CepClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
    assert!(matches!(c.lookup("1234").await, Err(CepError::InvalidCep(_))));
    assert!(matches!(c.lookup("123456789").await, Err(CepError::InvalidCep(_))));
    assert!(matches!(c.lookup("").await, Err(CepError::InvalidCep(_))));
  }

  #[tokio::test]
  async fn error_status_and_bad_body_are_errors() {
    let c = client().await;
    assert!(matches!(c.lookup("00000000").await, Err(CepError::Status(s)) if s == StatusCode::BAD_REQUEST));
    assert!(matches!(c.lookup("12121212").await, Err(CepError::Decode(_))));
  }

  #[tokio::test]
  async fn unreachable_service_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let c = CepClient::new(format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    assert!(matches!(c.lookup("01001000").await, Err(CepError::Transport(_))));
  }

  #[test]
  fn base_url_trailing_slash_is_trimmed() {
    let c = CepClient::new("https://viacep.com.br/ws/", Duration::from_secs(1)).unwrap();
    assert_eq!(c.base_url(), "https://viacep.com.br/ws");
  }

  #[test]
  fn address_keeps_viacep_field_names_on_the_wire() {
    let addr = parse_address("01001000", r#"{"cep":"01001-000","uf":"SP"}"#).unwrap();
    assert_eq!(addr.state, "SP");
    assert_eq!(addr.city, "");
    let out = serde_json::to_value(&addr).unwrap();
    assert_eq!(out["uf"], "SP");
    assert_eq!(out["localidade"], "");
  }
}

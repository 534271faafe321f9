//! Application state: the CEP client, the date formatter and the loaded config.
//!
//! Built once at startup and shared read-only behind an `Arc`.

use tracing::{info, instrument, warn};

use crate::cep::{CepClient, CepError};
use crate::config::ServiceConfig;
use crate::datetime::{DateFormatter, PtBr};

#[derive(Clone, Debug)]
pub struct AppState {
    pub cep: CepClient,
    pub dates: DateFormatter<PtBr>,
    pub config: ServiceConfig,
}

impl AppState {
    /// Build state from config. An out-of-range display offset falls back to Brasília time.
    #[instrument(level = "info", skip_all)]
    pub fn from_config(config: ServiceConfig) -> Result<Self, CepError> {
        let cep = CepClient::from_config(&config.cep)?;
        info!(target: "formkit", base_url = %cep.base_url(), timeout_secs = config.cep.timeout_secs, "CEP lookup configured");

        let minutes = config.dates.utc_offset_minutes;
        let dates = DateFormatter::with_offset_minutes(PtBr, minutes).unwrap_or_else(|| {
            warn!(target: "formkit", utc_offset_minutes = minutes, "Invalid display offset; using Brasília time");
            DateFormatter::default()
        });
        info!(target: "formkit", offset = %dates.offset(), "Date display offset");

        Ok(Self { cep, dates, config })
    }
}

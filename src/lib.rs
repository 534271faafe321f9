//! formkit · form input helpers
//!
//! Masking for partially typed form fields (dates, times, CEP, cards, phones,
//! money), pt-BR date rendering, forgiving JSON record access and a ViaCEP
//! lookup client. The `formkit` binary serves these over HTTP.

pub mod cep;
pub mod config;
pub mod currency;
pub mod datetime;
pub mod mask;
pub mod object;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod util;

pub use cep::{Address, CepClient, CepError};
pub use config::ServiceConfig;
pub use currency::format_amount;
pub use datetime::{DateError, DateFormatter, DateLocale, DateStyle, Moment, PtBr};
pub use mask::{
  format_credit_card, format_date_input, format_hour_input, format_hour_minute_input,
  format_phone, format_postal_code, only_digits, Mark, Shape,
};

//! ViaCEP directory client
//!
//! `GET {base}/ws/{cep}/json/`. ViaCEP answers 200 with `{"erro": true}` for
//! unknown codes (older deployments send the string `"true"`).

use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use imobifx_core::models::Address;
use imobifx_core::validation::format_cep;
use serde::Deserialize;
use serde_json::Value;

use crate::address::{AddressDirectory, DirectoryError};

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    cep: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    erro: Option<Value>,
}

impl ViaCepResponse {
    fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

#[derive(Clone)]
pub struct ViaCepClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    /// Client whose requests all give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for ViaCEP")?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AddressDirectory for ViaCepClient {
    #[tracing::instrument(skip(self), fields(http.host = %self.base_url))]
    async fn lookup(&self, cep_digits: &str) -> Result<Address, DirectoryError> {
        let url = format!("{}/ws/{}/json/", self.base_url, cep_digits);
        let start = Instant::now();

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Unavailable(format!(
                "ViaCEP returned status {}",
                status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))?;

        tracing::debug!(
            cep = %cep_digits,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "ViaCEP lookup completed"
        );

        let parsed: ViaCepResponse = serde_json::from_slice(&body)
            .map_err(|e| DirectoryError::InvalidResponse(e.to_string()))?;

        if parsed.is_not_found() {
            return Err(DirectoryError::NotFound);
        }

        let cep = if parsed.cep.is_empty() {
            format_cep(cep_digits)
        } else {
            parsed.cep
        };

        Ok(Address {
            cep,
            street: parsed.logradouro,
            neighborhood: parsed.bairro,
            city: parsed.localidade,
            state: parsed.uf,
        })
    }
}

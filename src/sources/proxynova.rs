// src/sources/proxynova.rs
use async_trait::async_trait;
use serde::Deserialize;

use super::Source;
use crate::core::Target;
use crate::error::SourceError;
use crate::utils::HttpClient;

const COMB_API: &str = "https://api.proxynova.com/comb";

#[derive(Debug, Deserialize)]
struct CombResponse {
    #[serde(default)]
    lines: Vec<String>,
}

/// ProxyNova COMB search: raw `login:password` lines from the combined breach dump
pub struct ProxyNovaSource {
    client: HttpClient,
}

impl ProxyNovaSource {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Source for ProxyNovaSource {
    fn name(&self) -> &str {
        "proxynova"
    }

    fn description(&self) -> &str {
        "Credential lines from the ProxyNova COMB search"
    }

    async fn query(&self, target: &Target) -> Result<Vec<String>, SourceError> {
        let response: CombResponse = self
            .client
            .get_json(COMB_API, &[("query", target.value())])
            .await?
            .ok_or(SourceError::NotFound)?;

        Ok(findings(response, target))
    }
}

/// COMB matches substrings loosely; keep only lines that mention the target, ignoring case.
fn findings(response: CombResponse, target: &Target) -> Vec<String> {
    let needle = target.value().to_lowercase();
    response
        .lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty() && line.to_lowercase().contains(&needle))
        .collect()
}

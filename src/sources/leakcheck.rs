// src/sources/leakcheck.rs
use async_trait::async_trait;
use serde::Deserialize;

use super::Source;
use crate::core::{Target, TargetKind};
use crate::error::SourceError;
use crate::utils::HttpClient;

const PUBLIC_API: &str = "https://leakcheck.io/api/public";

#[derive(Debug, Deserialize)]
struct PublicResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default)]
    sources: Vec<BreachSource>,
}

#[derive(Debug, Deserialize)]
struct BreachSource {
    name: String,
    #[serde(default)]
    date: Option<String>,
}

/// LeakCheck public API: lists the breaches an email or username appears in
pub struct LeakCheckSource {
    client: HttpClient,
}

impl LeakCheckSource {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    fn findings(response: PublicResponse) -> Result<Vec<String>, SourceError> {
        if !response.success {
            return match response.error.as_deref() {
                Some(message) if message.eq_ignore_ascii_case("not found") => Err(SourceError::NotFound),
                Some(message) => Err(SourceError::Parse(format!("API error: {}", message))),
                None => Err(SourceError::Parse("API reported failure".to_string())),
            };
        }

        let fields = response.fields.join("|");
        Ok(response
            .sources
            .into_iter()
            .map(|source| {
                let date = source.date.filter(|d| !d.is_empty()).unwrap_or_else(|| "unknown".to_string());
                if fields.is_empty() {
                    format!("source:{}, date:{}", source.name, date)
                } else {
                    format!("source:{}, date:{}, fields:{}", source.name, date, fields)
                }
            })
            .collect())
    }
}

#[async_trait]
impl Source for LeakCheckSource {
    fn name(&self) -> &str {
        "leakcheck"
    }

    fn description(&self) -> &str {
        "Breach names and exposed fields from the LeakCheck public API"
    }

    async fn query(&self, target: &Target) -> Result<Vec<String>, SourceError> {
        // The public endpoint only searches emails and usernames.
        if target.kind() == TargetKind::Domain {
            return Ok(Vec::new());
        }

        match self.client.get_json(PUBLIC_API, &[("check", target.value())]).await? {
            Some(response) => Self::findings(response),
            None => Err(SourceError::NotFound),
        }
    }
}

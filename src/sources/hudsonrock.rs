// src/sources/hudsonrock.rs
use async_trait::async_trait;
use serde::Deserialize;

use super::Source;
use crate::core::{Target, TargetKind};
use crate::error::SourceError;
use crate::utils::HttpClient;

const OSINT_API: &str = "https://cavalier.hudsonrock.com/api/json/v2/osint-tools";

#[derive(Debug, Deserialize)]
struct EmailResponse {
    #[serde(default)]
    stealers: Vec<Stealer>,
}

#[derive(Debug, Deserialize)]
struct Stealer {
    #[serde(default)]
    computer_name: Option<String>,
    #[serde(default)]
    operating_system: Option<String>,
    #[serde(default)]
    date_compromised: Option<String>,
    #[serde(default)]
    top_logins: Vec<String>,
    #[serde(default)]
    top_passwords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DomainResponse {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    employees: u64,
    #[serde(default)]
    users: u64,
    #[serde(default)]
    third_parties: u64,
}

/// Hudson Rock Cavalier: infostealer infections tied to an email or a domain
pub struct HudsonRockSource {
    client: HttpClient,
}

impl HudsonRockSource {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    fn email_findings(response: EmailResponse) -> Vec<String> {
        response
            .stealers
            .into_iter()
            .map(|stealer| {
                let mut parts = Vec::new();
                if let Some(date) = stealer.date_compromised {
                    parts.push(format!("date_compromised:{}", date));
                }
                if let Some(name) = stealer.computer_name {
                    parts.push(format!("computer_name:{}", name));
                }
                if let Some(os) = stealer.operating_system {
                    parts.push(format!("operating_system:{}", os));
                }
                if !stealer.top_logins.is_empty() {
                    parts.push(format!("logins:{}", stealer.top_logins.join("|")));
                }
                if !stealer.top_passwords.is_empty() {
                    parts.push(format!("passwords:{}", stealer.top_passwords.join("|")));
                }
                parts.join(", ")
            })
            .filter(|line| !line.is_empty())
            .collect()
    }

    fn domain_findings(response: DomainResponse) -> Vec<String> {
        if response.total == 0 {
            return Vec::new();
        }

        vec![format!(
            "total:{}, employees:{}, users:{}, third_parties:{}",
            response.total, response.employees, response.users, response.third_parties
        )]
    }
}

#[async_trait]
impl Source for HudsonRockSource {
    fn name(&self) -> &str {
        "hudsonrock"
    }

    fn description(&self) -> &str {
        "Infostealer infections from the Hudson Rock Cavalier OSINT API"
    }

    async fn query(&self, target: &Target) -> Result<Vec<String>, SourceError> {
        match target.kind() {
            TargetKind::Email => {
                let url = format!("{}/search-by-email", OSINT_API);
                let response = self.client.get_json(&url, &[("email", target.value())]).await?;
                Ok(response.map(Self::email_findings).unwrap_or_default())
            }
            TargetKind::Domain => {
                let url = format!("{}/search-by-domain", OSINT_API);
                let response = self.client.get_json(&url, &[("domain", target.value())]).await?;
                Ok(response.map(Self::domain_findings).unwrap_or_default())
            }
            TargetKind::Unknown => Ok(Vec::new()),
        }
    }
}

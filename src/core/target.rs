// src/core/target.rs
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const MAX_DOMAIN_LEN: usize = 253;

static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$")
        .expect("domain pattern is valid")
});

static EMAIL_LOCAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
        .expect("email local-part pattern is valid")
});

/// Syntactic kind of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Email,
    Domain,
    Unknown,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetKind::Email => "email",
            TargetKind::Domain => "domain",
            TargetKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(TargetKind::Email),
            "domain" => Ok(TargetKind::Domain),
            other => Err(format!("unknown target type: {}", other)),
        }
    }
}

/// A single identifier to check, trimmed and classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    value: String,
    kind: TargetKind,
}

impl Target {
    /// Trim and classify one raw input line. Returns `None` for blank input.
    pub fn classify(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }

        Some(Self {
            value: value.to_string(),
            kind: classify_kind(value),
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn is_email(&self) -> bool {
        self.kind == TargetKind::Email
    }

    pub fn is_domain(&self) -> bool {
        self.kind == TargetKind::Domain
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

fn classify_kind(value: &str) -> TargetKind {
    if is_email(value) {
        TargetKind::Email
    } else if is_domain(value) {
        TargetKind::Domain
    } else {
        TargetKind::Unknown
    }
}

/// Check whether a string is a syntactically valid domain name
pub fn is_domain(value: &str) -> bool {
    value.len() <= MAX_DOMAIN_LEN && DOMAIN_RE.is_match(value)
}

/// Check whether a string is a syntactically valid email address
pub fn is_email(value: &str) -> bool {
    match value.rsplit_once('@') {
        Some((local, domain)) => {
            local.len() <= 64 && EMAIL_LOCAL_RE.is_match(local) && is_domain(domain)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_are_rejected() {
        assert!(Target::classify("").is_none());
        assert!(Target::classify("   ").is_none());
        assert!(Target::classify("\t\r\n").is_none());
    }

    #[test]
    fn test_input_is_trimmed() {
        let target = Target::classify("  user@example.com \r").unwrap();
        assert_eq!(target.value(), "user@example.com");
        assert_eq!(target.kind(), TargetKind::Email);
    }

    #[test]
    fn test_emails() {
        for raw in ["user@example.com", "first.last+tag@mail.example.co.uk", "a_b@x-y.io"] {
            assert!(Target::classify(raw).unwrap().is_email(), "{raw} should be an email");
        }
        for raw in ["notanemail", "@example.com", "user@", "user@localhost", "a..b@example.com", "a b@example.com"] {
            assert!(!Target::classify(raw).unwrap().is_email(), "{raw} should not be an email");
        }
    }

    #[test]
    fn test_domains() {
        for raw in ["example.com", "sub.example.co.uk", "xn--80ak6aa92e.com"] {
            assert_eq!(Target::classify(raw).unwrap().kind(), TargetKind::Domain, "{raw}");
        }
        for raw in ["not a domain", "example", "-bad.com", "bad-.com", "example.c0m", "user@example.com"] {
            assert!(!Target::classify(raw).unwrap().is_domain(), "{raw} should not be a domain");
        }
    }

    #[test]
    fn test_unknown() {
        let target = Target::classify("notanemail").unwrap();
        assert_eq!(target.kind(), TargetKind::Unknown);
        assert_eq!(target.to_string(), "notanemail");
    }

    #[test]
    fn test_domain_length_limit() {
        let label = "a".repeat(63);
        let long = format!("{label}.{label}.{label}.{label}.com");
        assert!(long.len() > MAX_DOMAIN_LEN);
        assert!(!is_domain(&long));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("EMAIL".parse::<TargetKind>().unwrap(), TargetKind::Email);
        assert_eq!("domain".parse::<TargetKind>().unwrap(), TargetKind::Domain);
        assert!("phone".parse::<TargetKind>().is_err());
    }
}

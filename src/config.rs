// src/config.rs

use std::env;

use url::Url;

use crate::error::{Result, WatchError};

pub const DEFAULT_REGISTRAR_URL: &str =
    "https://oracle-www.dartmouth.edu/dart/groucho/timetable.display_courses";
pub const DEFAULT_TARGET_CRN: &str = "91714";
pub const DEFAULT_TERM: &str = "202409";
pub const DEFAULT_DEPT: &str = "COSC";
pub const DEFAULT_RESEND_API_BASE: &str = "https://api.resend.com";

/// Runtime settings, read once at startup and handed to each component.
#[derive(Debug, Clone)]
pub struct Config {
    pub registrar_url: Url,
    pub term: String,
    pub dept: String,
    pub target_crn: String,
    pub proxy_url: Option<Url>,
    pub email: EmailConfig,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_base: Url,
    pub api_key: String,
    pub from: String,
    pub to: String,
}

impl Config {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require =
            |key: &str| get(key).ok_or_else(|| WatchError::Config(format!("{} is not set", key)));

        let registrar_url = parse_url(
            "REGISTRAR_URL",
            &get("REGISTRAR_URL").unwrap_or_else(|| DEFAULT_REGISTRAR_URL.to_string()),
        )?;
        let api_base = parse_url(
            "RESEND_API_BASE",
            &get("RESEND_API_BASE").unwrap_or_else(|| DEFAULT_RESEND_API_BASE.to_string()),
        )?;
        let proxy_url = get("PROXY_URL")
            .map(|raw| parse_url("PROXY_URL", &raw))
            .transpose()?;

        Ok(Config {
            registrar_url,
            term: get("REGISTRAR_TERM").unwrap_or_else(|| DEFAULT_TERM.to_string()),
            dept: get("REGISTRAR_DEPT").unwrap_or_else(|| DEFAULT_DEPT.to_string()),
            target_crn: get("TARGET_CRN").unwrap_or_else(|| DEFAULT_TARGET_CRN.to_string()),
            proxy_url,
            email: EmailConfig {
                api_base,
                api_key: require("RESEND_API_KEY")?,
                from: require("NOTIFY_FROM")?,
                to: require("NOTIFY_TO")?,
            },
        })
    }
}

fn parse_url(key: &str, raw: &str) -> Result<Url> {
    Url::parse(raw.trim()).map_err(|e| WatchError::Config(format!("{}={:?}: {}", key, raw, e)))
}

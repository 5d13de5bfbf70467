use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;

pub const DEFAULT_ACTIVITY_RETENTION: usize = 500;

// Shared development fallback; production deployments must override it.
const DEFAULT_JWT_SECRET: &str = "dev-secret-change-in-production";

// Operations API configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct OpsApiConfig {
    // HTTP API bind address.
    pub bind_addr: SocketAddr,
    // Metrics HTTP listener bind address.
    pub metrics_bind: SocketAddr,
    // Shared secret for bearer-token verification.
    pub jwt_secret: String,
    // Lifetime of tokens minted by the dev issuer.
    pub token_ttl_secs: u64,
    // Clock-skew allowance when validating token expiry.
    pub token_leeway_secs: u64,
    // Enables the POST /v1/auth/token dev issuer endpoint.
    pub dev_auth_enabled: bool,
    // Seeds demo users and an event on startup.
    pub seed_demo_data: bool,
    // Max entries kept in the in-memory activity feed.
    pub activity_retention: usize,
}

#[derive(Debug, Deserialize)]
struct OpsApiConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    jwt_secret: Option<String>,
    token_ttl_secs: Option<u64>,
    token_leeway_secs: Option<u64>,
    dev_auth_enabled: Option<bool>,
    seed_demo_data: Option<bool>,
    activity_retention: Option<usize>,
}

impl OpsApiConfig {
    pub fn from_env() -> Result<Self> {
        // Environment variables provide defaults for local development.
        let bind_addr = std::env::var("ENCORE_API_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .with_context(|| "parse ENCORE_API_BIND")?;
        let metrics_bind = std::env::var("ENCORE_METRICS_BIND")
            .unwrap_or_else(|_| "0.0.0.0:9090".to_string())
            .parse()
            .with_context(|| "parse ENCORE_METRICS_BIND")?;
        let jwt_secret =
            std::env::var("ENCORE_JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
        // Eight hours by default, one festival shift.
        let token_ttl_secs = std::env::var("ENCORE_TOKEN_TTL_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(8 * 3600);
        let token_leeway_secs = std::env::var("ENCORE_TOKEN_LEEWAY_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(60);
        let dev_auth_enabled = std::env::var("ENCORE_DEV_AUTH")
            .ok()
            .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let seed_demo_data = std::env::var("ENCORE_SEED_DEMO")
            .ok()
            .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let activity_retention = std::env::var("ENCORE_ACTIVITY_RETENTION")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_ACTIVITY_RETENTION);
        Ok(Self {
            bind_addr,
            metrics_bind,
            jwt_secret,
            token_ttl_secs,
            token_leeway_secs,
            dev_auth_enabled,
            seed_demo_data,
            activity_retention,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("ENCORE_API_CONFIG") {
            // YAML overrides allow ops-friendly config files.
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read ENCORE_API_CONFIG: {path}"))?;
            let override_cfg: OpsApiConfigOverride =
                serde_yaml::from_str(&contents).with_context(|| "parse opsapi config yaml")?;
            if let Some(value) = override_cfg.bind_addr {
                config.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
            }
            if let Some(value) = override_cfg.metrics_bind {
                config.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
            }
            if let Some(value) = override_cfg.jwt_secret {
                config.jwt_secret = value;
            }
            if let Some(value) = override_cfg.token_ttl_secs
                && value > 0
            {
                config.token_ttl_secs = value;
            }
            if let Some(value) = override_cfg.token_leeway_secs {
                config.token_leeway_secs = value;
            }
            if let Some(value) = override_cfg.dev_auth_enabled {
                config.dev_auth_enabled = value;
            }
            if let Some(value) = override_cfg.seed_demo_data {
                config.seed_demo_data = value;
            }
            if let Some(value) = override_cfg.activity_retention
                && value > 0
            {
                config.activity_retention = value;
            }
        }
        Ok(config)
    }
}

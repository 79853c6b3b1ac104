use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_GENERATION_ENDPOINT: &str = "https://models.github.ai/inference";
pub const DEFAULT_GENERATION_MODEL: &str = "openai/gpt-4.1";

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Settings for the outbound text-generation service.
///
/// `api_key == None` means the service is not configured and lesson plans are
/// produced by the offline fallback generator.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GENERATION_ENDPOINT.into(),
            model: DEFAULT_GENERATION_MODEL.into(),
            api_key: None,
            temperature: 1.0,
            top_p: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub session: SessionConfig,
    pub generation: GenerationConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let bind_addr = bind_addr(
            std::env::var("APP_HOST").ok().as_deref(),
            std::env::var("APP_PORT").ok().as_deref(),
        )?;
        let session = SessionConfig {
            secret: std::env::var("SECRET_KEY").context("SECRET_KEY is not set")?,
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "lessonforge".into()),
            audience: std::env::var("SESSION_AUDIENCE")
                .unwrap_or_else(|_| "lessonforge-teachers".into()),
            ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24),
        };
        let generation = GenerationConfig {
            endpoint: std::env::var("GENERATION_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_GENERATION_ENDPOINT.into()),
            model: std::env::var("GENERATION_MODEL")
                .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.into()),
            api_key: std::env::var("GENERATION_API_KEY")
                .or_else(|_| std::env::var("GITHUB_TOKEN"))
                .ok()
                .filter(|v| !v.trim().is_empty()),
            ..GenerationConfig::default()
        };
        Ok(Self {
            database_url,
            bind_addr,
            session,
            generation,
        })
    }
}

/// Listen address from `APP_HOST` / `APP_PORT`, defaulting to `0.0.0.0:8080`.
fn bind_addr(host: Option<&str>, port: Option<&str>) -> anyhow::Result<SocketAddr> {
    let host: IpAddr = host
        .unwrap_or("0.0.0.0")
        .parse()
        .context("APP_HOST must be an IP address")?;
    let port: u16 = port
        .unwrap_or("8080")
        .parse()
        .context("APP_PORT must be a port number")?;
    Ok(SocketAddr::new(host, port))
}

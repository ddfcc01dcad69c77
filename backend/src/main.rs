//! Backend entry-point: loads settings, wires the HTTP server and waits on it.

mod server;

use std::net::{IpAddr, SocketAddr};

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use bookswap::AppSettings;
use bookswap::inbound::http::health::HealthState;
use server::{ServerConfig, create_server};

fn load_session_key(settings: &AppSettings) -> std::io::Result<Key> {
    let key_path = settings.session_key_file();
    match std::fs::read(&key_path) {
        // `Key::derive_from` panics below 32 bytes of key material.
        Ok(bytes) if bytes.len() < 32 => Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("session key at {} is shorter than 32 bytes", key_path.display()),
        )),
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) if cfg!(debug_assertions) || settings.allow_ephemeral_session_key => {
            warn!(path = %key_path.display(), error = %e, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(e) => Err(std::io::Error::other(format!(
            "failed to read session key at {}: {e}",
            key_path.display()
        ))),
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let host: IpAddr = settings.host().parse().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid bind host {}: {e}", settings.host()),
        )
    })?;

    let config = ServerConfig::new(
        load_session_key(&settings)?,
        settings.cookie_secure,
        SameSite::Lax,
        SocketAddr::new(host, settings.port()),
    )
    .with_approval_policy(settings.approval_policy());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

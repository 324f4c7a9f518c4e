//! Backend entry-point: loads settings, prepares adapters and runs the HTTP
//! server.

mod server;

use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;
use zeroize::Zeroize;

use course_backend::config::AppSettings;
use course_backend::inbound::http::health::HealthState;
use course_backend::outbound::cache::{RedisCacheConfig, RedisCourseCache};
use course_backend::outbound::mail::HttpMailSink;
use course_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::ServerConfig;

fn load_session_key(settings: &AppSettings) -> Result<Key> {
    let key_path = settings.session_key_file();
    match std::fs::read(&key_path) {
        Ok(mut bytes) => {
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) => {
            if cfg!(debug_assertions) || settings.session_allow_ephemeral {
                warn!(path = %key_path.display(), %error, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(eyre!(
                    "failed to read session key at {}: {error}",
                    key_path.display()
                ))
            }
        }
    }
}

async fn attach_database(config: ServerConfig, settings: &AppSettings) -> Result<ServerConfig> {
    let Some(database_url) = settings.database_url.clone() else {
        warn!("no database configured; serving fixture courses");
        return Ok(config);
    };

    let migrations_url = database_url.clone();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migrations_url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("failed to apply migrations")?;
    info!(applied, "database migrations applied");

    let mut pool_config = PoolConfig::new(database_url);
    if let Some(size) = settings.db_pool_size {
        pool_config = pool_config.with_max_size(size);
    }
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| eyre!("failed to build database pool: {}", err.message()))?;
    Ok(config.with_db_pool(pool))
}

async fn attach_cache(config: ServerConfig, settings: &AppSettings) -> Result<ServerConfig> {
    let Some(redis_url) = settings.redis_url.clone() else {
        warn!("no redis configured; course caching disabled");
        return Ok(config);
    };
    let mut cache_config = RedisCacheConfig::new(redis_url);
    if let Some(size) = settings.redis_pool_size {
        cache_config.max_size = size;
    }
    let cache = RedisCourseCache::connect(cache_config)
        .await
        .wrap_err("failed to connect to redis")?;
    Ok(config.with_cache(Arc::new(cache)))
}

fn attach_mail(config: ServerConfig, settings: &AppSettings) -> Result<ServerConfig> {
    let Some(relay_url) = settings.mail_relay_url.as_deref() else {
        warn!("no mail relay configured; question replies are not emailed");
        return Ok(config);
    };
    let endpoint = Url::parse(relay_url).wrap_err("invalid mail relay url")?;
    let sink = HttpMailSink::new(endpoint, settings.mail_timeout())
        .wrap_err("failed to build mail client")?;
    Ok(config.with_mail(Arc::new(sink)))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let key = load_session_key(&settings)?;
    let bind_addr = settings.bind_addr()?;
    let course_content = settings.course_content_config()?;

    let config = ServerConfig::new(key, settings.cookie_secure(), SameSite::Lax, bind_addr)
        .with_course_content(course_content);
    let config = attach_database(config, &settings).await?;
    let config = attach_cache(config, &settings).await?;
    let config = attach_mail(config, &settings)?;

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;
    info!(%bind_addr, "course backend listening");
    server.await?;
    Ok(())
}

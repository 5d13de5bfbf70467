//! Encore operations API entry point.
//!
//! # Purpose
//! Wires configuration, storage, token verification, and the HTTP router,
//! then starts the API server and the metrics listener.
//!
//! # Notes
//! The `build_state` helper keeps wiring testable and minimizes main setup
//! logic.
mod api;
mod app;
mod auth;
mod config;
mod model;
mod observability;
mod store;

use app::{AppState, build_router};
use auth::{TokenIssuer, TokenVerifier};
use model::UserRecord;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use store::{OpsStore, StoreConfig, memory::InMemoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::OpsApiConfig::from_env_or_yaml().expect("opsapi config");
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: config::OpsApiConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics_handle = observability::init_observability("encore-opsapi");
    let state = build_state(&config).await?;
    let metrics_task = tokio::spawn(observability::serve_metrics(
        metrics_handle,
        config.metrics_bind,
    ));

    let app = build_router(state);

    let addr = config.bind_addr;
    tracing::info!(%addr, "operations api listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tokio::pin!(shutdown);
    tokio::select! {
        result = axum::serve(listener, app.into_make_service()) => {
            result?;
        }
        _ = &mut shutdown => {}
    }

    metrics_task.abort();
    let _ = metrics_task.await;
    Ok(())
}

async fn build_state(config: &config::OpsApiConfig) -> anyhow::Result<AppState> {
    let store: Arc<dyn OpsStore + Send + Sync> = Arc::new(InMemoryStore::new(StoreConfig {
        activity_retention: config.activity_retention,
    }));

    if config.seed_demo_data {
        seed_demo_users(store.as_ref()).await?;
    }

    Ok(AppState {
        api_version: "v1".to_string(),
        store,
        issuer: Arc::new(TokenIssuer::new(
            &config.jwt_secret,
            Duration::from_secs(config.token_ttl_secs),
        )),
        verifier: Arc::new(TokenVerifier::new(
            &config.jwt_secret,
            config.token_leeway_secs,
        )),
        dev_auth_enabled: config.dev_auth_enabled,
        token_ttl_secs: config.token_ttl_secs,
    })
}

// One user per role, each carrying the role's default matrix.
async fn seed_demo_users(store: &(dyn OpsStore + Send + Sync)) -> anyhow::Result<()> {
    use encore_rbac::Role;

    let demo_users = [
        ("admin@encore.dev", "Site Admin", Role::Admin),
        ("ops@encore.dev", "Operations Lead", Role::OperationsLead),
        ("production@encore.dev", "Production Lead", Role::ProductionLead),
        ("security@encore.dev", "Security Lead", Role::SecurityLead),
        ("viewer@encore.dev", "Read Only", Role::Viewer),
    ];
    for (email, name, role) in demo_users {
        match store.create_user(UserRecord::new(email, name, role)).await {
            Ok(user) => tracing::info!(email = %user.email, role = %user.role, "seeded demo user"),
            Err(store::StoreError::Conflict(_)) => {}
            Err(err) => return Err(anyhow::anyhow!(err)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn test_config() -> config::OpsApiConfig {
        config::OpsApiConfig {
            bind_addr: "127.0.0.1:0".parse().expect("bind"),
            metrics_bind: "127.0.0.1:0".parse().expect("metrics"),
            jwt_secret: "test-secret".to_string(),
            token_ttl_secs: 600,
            token_leeway_secs: 5,
            dev_auth_enabled: true,
            seed_demo_data: true,
            activity_retention: 50,
        }
    }

    #[tokio::test]
    async fn build_state_seeds_demo_users() {
        let state = build_state(&test_config()).await.expect("state");
        assert_eq!(state.api_version, "v1");
        let admin = state
            .store
            .find_user_by_email("admin@encore.dev")
            .await
            .expect("seeded admin");
        assert_eq!(admin.role, encore_rbac::Role::Admin);
    }

    #[tokio::test]
    async fn build_state_without_seed_is_empty() {
        let mut config = test_config();
        config.seed_demo_data = false;
        let state = build_state(&config).await.expect("state");
        assert!(state.store.list_users().await.expect("users").is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn run_with_shutdown_starts_and_stops() {
        run_with_shutdown(test_config(), async {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        })
        .await
        .expect("run should stop cleanly");
    }
}

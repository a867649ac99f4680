/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config 読み込み → casbin Enforcer 生成 → Router 組み立て
 * - Middleware の適用 (authz は /api/v1 のみ、http は全体)
 * - axum::serve() で起動
 */
use std::{panic, process};

use axum::{Router, routing::get};
use casbin::{CoreApi, DefaultModel, Enforcer, FileAdapter};
use casbin_authz::{Authorizer, middleware};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, v1::handlers::health::health};
use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG=info,casbin_authz=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Engine faults surface here as panics; make sure they reach the log.
        tracing::error!(%info, "panic");

        // Development: an engine fault takes the whole process down.
        // Production: default hook, only the affected connection is dropped.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<(), AppError> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {} (engine fault: {})",
        config.app_env,
        config.addr,
        config.on_engine_fault
    );

    let enforcer = build_enforcer(&config).await?;
    let authz = Authorizer::with_basic_auth(enforcer).on_engine_fault(config.on_engine_fault);

    let app = build_router(AppState::new(), authz, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_enforcer(config: &Config) -> Result<Enforcer, AppError> {
    let model = DefaultModel::from_file(&config.casbin_model_path).await?;
    let adapter = FileAdapter::new(config.casbin_policy_path.clone());
    let enforcer = Enforcer::new(model, adapter).await?;

    tracing::info!(
        model = %config.casbin_model_path,
        policy = %config.casbin_policy_path,
        "casbin enforcer loaded"
    );

    Ok(enforcer)
}

fn build_router(
    state: AppState,
    authz: Authorizer<Enforcer, fn(&axum::extract::Request) -> Vec<String>>,
    config: &Config,
) -> Router {
    let v1 = middleware::authz::apply(api::v1::routes(), authz);

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", v1)
        .with_state(state);

    middleware::http::apply(router, config.request_timeout)
}

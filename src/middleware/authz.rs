//! Authorization middleware: subjects → engine → next handler or `403`.
//!
//! Outcome per request:
//! - first allowed subject: the request continues untouched
//! - no allowed subject (including no subject at all): `403 Forbidden`, empty body
//! - engine error: see [`EngineFaultPolicy`](crate::EngineFaultPolicy)

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::authorizer::Authorizer;
use crate::enforcer::Enforce;

/// Protects every route of `router` with `authz`.
///
/// Example:
/// ```ignore
/// let authz = Authorizer::with_basic_auth(enforcer);
/// let v1 = middleware::authz::apply(api::v1::routes(), authz);
/// app = app.nest("/api/v1", v1);
/// ```
///
/// Routes added after this call are not protected.
pub fn apply<S, E, F>(router: Router<S>, authz: Authorizer<E, F>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    E: Enforce + 'static,
    F: Fn(&Request) -> Vec<String> + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(authz, authorize::<E, F>))
}

/// The middleware function, for callers composing layers themselves
/// (`axum::middleware::from_fn_with_state(authz, authorize)`).
pub async fn authorize<E, F>(
    State(authz): State<Authorizer<E, F>>,
    req: Request,
    next: Next,
) -> Response
where
    E: Enforce + 'static,
    F: Fn(&Request) -> Vec<String> + Send + Sync + 'static,
{
    let decision = authz.check_permission(&req);

    match decision {
        Ok(true) => next.run(req).await,
        Ok(false) => StatusCode::FORBIDDEN.into_response(),
        Err(err) => authz.engine_fault(err),
    }
}

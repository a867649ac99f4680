/*
 * Responsibility
 * - Hold the engine handle + subject extractor (configuration only, no I/O)
 * - Decide a request: OR over subjects, short-circuit on the first allow
 * - Decide what an engine failure turns into (EngineFaultPolicy)
 */
use std::{fmt, str::FromStr, sync::Arc};

use axum::{
    extract::{OriginalUri, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::enforcer::Enforce;
use crate::subject::basic_auth_subjects;

/// What the middleware does when the engine returns `Err`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EngineFaultPolicy {
    /// Re-raise the engine error as a panic payload. The request gets no
    /// response from the middleware and the handler is not called.
    #[default]
    Panic,
    /// Respond `500 Internal Server Error` with an empty body.
    InternalServerError,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown engine fault policy: {0:?} (expected \"panic\" or \"internal_server_error\")")]
pub struct ParseEngineFaultPolicyError(String);

impl FromStr for EngineFaultPolicy {
    type Err = ParseEngineFaultPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "panic" => Ok(Self::Panic),
            "internal_server_error" | "internal" | "500" => Ok(Self::InternalServerError),
            _ => Err(ParseEngineFaultPolicyError(s.to_string())),
        }
    }
}

impl fmt::Display for EngineFaultPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineFaultPolicy::Panic => write!(f, "panic"),
            EngineFaultPolicy::InternalServerError => write!(f, "internal_server_error"),
        }
    }
}

/// Authorizes requests against an [`Enforce`] engine.
///
/// Cheap to clone; the engine and the extractor are shared, the engine fault
/// policy belongs to each handle.
pub struct Authorizer<E, S> {
    inner: Arc<Inner<E, S>>,
    on_engine_fault: EngineFaultPolicy,
}

struct Inner<E, S> {
    enforcer: E,
    subjects: S,
}

impl<E, S> Clone for Authorizer<E, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            on_engine_fault: self.on_engine_fault,
        }
    }
}

impl<E, S> fmt::Debug for Authorizer<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authorizer")
            .field("on_engine_fault", &self.on_engine_fault)
            .finish_non_exhaustive()
    }
}

impl<E> Authorizer<E, fn(&Request) -> Vec<String>>
where
    E: Enforce,
{
    /// Authorizer using the Basic auth username as the only subject.
    pub fn with_basic_auth(enforcer: E) -> Self {
        Self::new(enforcer, basic_auth_subjects)
    }
}

impl<E, S> Authorizer<E, S>
where
    E: Enforce,
    S: Fn(&Request) -> Vec<String> + Send + Sync,
{
    pub fn new(enforcer: E, subjects: S) -> Self {
        Self {
            inner: Arc::new(Inner { enforcer, subjects }),
            on_engine_fault: EngineFaultPolicy::default(),
        }
    }

    /// Replaces the engine fault policy (default: [`EngineFaultPolicy::Panic`]).
    ///
    /// Applies to this handle and to clones made from it afterwards.
    pub fn on_engine_fault(mut self, policy: EngineFaultPolicy) -> Self {
        self.on_engine_fault = policy;
        self
    }

    pub fn engine_fault_policy(&self) -> EngineFaultPolicy {
        self.on_engine_fault
    }

    pub fn enforcer(&self) -> &E {
        &self.inner.enforcer
    }

    /// Checks the subject/path/method combination of the request.
    ///
    /// Returns `Ok(true)` on the first subject the engine allows, `Ok(false)`
    /// when every subject (possibly none) is denied. An engine error stops the
    /// iteration and is returned as is.
    pub fn check_permission(&self, req: &Request) -> Result<bool, E::Error> {
        let object = match req.extensions().get::<OriginalUri>() {
            Some(OriginalUri(uri)) => uri.path(),
            None => req.uri().path(),
        };
        let action = req.method().as_str();

        for subject in (self.inner.subjects)(req) {
            let allowed = self.inner.enforcer.enforce(&subject, object, action)?;
            tracing::debug!(subject = %subject, object, action, allowed, "enforce");
            if allowed {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Turns an engine error into the configured outcome.
    pub(crate) fn engine_fault(&self, err: E::Error) -> Response {
        match self.on_engine_fault {
            EngineFaultPolicy::Panic => {
                tracing::error!(error = %err, "enforcement engine failed");
                std::panic::panic_any(err)
            }
            EngineFaultPolicy::InternalServerError => {
                tracing::error!(error = %err, "enforcement engine failed; responding 500");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

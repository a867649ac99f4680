/*
 * Responsibility
 * - The single query this crate needs from a policy engine: (sub, obj, act) -> allowed?
 * - Engine specific adapters live behind cargo features (casbin)
 */
use std::sync::Arc;

/// A policy-enforcement engine.
///
/// Implementations answer whether `subject` may perform `action` on `object`.
/// The call is synchronous and may be issued concurrently from many requests,
/// so it must not block for long.
///
/// `Err(_)` means the engine itself failed (not a denial). The authorizer
/// treats it as fatal, see [`crate::EngineFaultPolicy`].
pub trait Enforce: Send + Sync {
    type Error: std::error::Error + Send + 'static;

    fn enforce(&self, subject: &str, object: &str, action: &str) -> Result<bool, Self::Error>;
}

impl<T: Enforce + ?Sized> Enforce for Arc<T> {
    type Error = T::Error;

    fn enforce(&self, subject: &str, object: &str, action: &str) -> Result<bool, Self::Error> {
        (**self).enforce(subject, object, action)
    }
}

impl<T: Enforce + ?Sized> Enforce for &T {
    type Error = T::Error;

    fn enforce(&self, subject: &str, object: &str, action: &str) -> Result<bool, Self::Error> {
        (**self).enforce(subject, object, action)
    }
}

#[cfg(feature = "casbin")]
impl Enforce for casbin::Enforcer {
    type Error = casbin::Error;

    fn enforce(&self, subject: &str, object: &str, action: &str) -> Result<bool, Self::Error> {
        casbin::CoreApi::enforce(self, (subject, object, action))
    }
}

//! Request authorization middleware for axum backed by a policy-enforcement engine.
//!
//! The middleware asks an [`Enforce`] engine whether any subject of the incoming
//! request may perform the request method on the request path:
//!
//! - subjects come from a pluggable extractor (`Fn(&Request) -> Vec<String>`),
//!   HTTP Basic auth by default
//! - the first allowed subject lets the request through
//! - otherwise the request ends with `403 Forbidden` and an empty body
//!
//! ```ignore
//! let enforcer = casbin::Enforcer::new("model.conf", "policy.csv").await?;
//! let authz = Authorizer::with_basic_auth(enforcer);
//! let api = middleware::authz::apply(api::v1::routes(), authz);
//! ```

pub mod authorizer;
pub mod enforcer;
pub mod middleware;
pub mod subject;

pub use authorizer::{Authorizer, EngineFaultPolicy, ParseEngineFaultPolicyError};
pub use enforcer::Enforce;
pub use subject::{Subjects, basic_auth, basic_auth_subjects, extension_subjects};

/*
 * Responsibility
 * - Derive the subjects (who is asking) of a request
 * - Default: username of HTTP Basic credentials
 * - Alternative: subjects stored in request extensions by an upstream auth layer
 */
use axum::{
    extract::Request,
    http::{HeaderMap, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};

const BASIC_PREFIX: &str = "Basic ";

/// Subjects resolved by an authentication layer running before the authorizer.
///
/// Insert it into the request extensions and use [`extension_subjects`] as the
/// authorizer's extractor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subjects(pub Vec<String>);

/// Parses `Authorization: Basic <base64(user:pass)>`.
///
/// Only the first `Authorization` header is considered. The scheme is matched
/// case-insensitively and the credentials are split at the first `:`.
pub fn basic_auth(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let scheme = value.get(..BASIC_PREFIX.len())?;
    if !scheme.eq_ignore_ascii_case(BASIC_PREFIX) {
        return None;
    }

    let decoded = STANDARD.decode(&value[BASIC_PREFIX.len()..]).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;

    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Default extractor: the Basic auth username as the only subject.
///
/// Always returns exactly one element. Missing or malformed credentials give
/// `""`, which is still queried against the engine (a rule written for the
/// empty identity would match it).
pub fn basic_auth_subjects(req: &Request) -> Vec<String> {
    let username = basic_auth(req.headers())
        .map(|(username, _)| username)
        .unwrap_or_default();

    vec![username]
}

/// Subjects placed in the request extensions as [`Subjects`].
///
/// Returns an empty list when nothing was inserted, which the authorizer
/// denies without querying the engine.
pub fn extension_subjects(req: &Request) -> Vec<String> {
    req.extensions()
        .get::<Subjects>()
        .map(|subjects| subjects.0.clone())
        .unwrap_or_default()
}

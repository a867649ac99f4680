/*
 * Responsibility
 * - authz: subject/path/method authorization against an enforcement engine
 * - http: transport concerns (request id, body limit, timeout, access log)
 */
pub mod authz;
pub mod http;

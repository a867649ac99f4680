/*
 * Responsibility
 * - 環境変数 (.env 含む) の読み込み
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use casbin_authz::EngineFaultPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub casbin_model_path: String,
    pub casbin_policy_path: String,
    pub on_engine_fault: EngineFaultPolicy,

    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from `var` lookups (the process env in `from_env`).
    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match var("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(var("APP_ENV"));

        let casbin_model_path =
            var("CASBIN_MODEL_PATH").unwrap_or_else(|| "config/model.conf".to_string());

        let casbin_policy_path =
            var("CASBIN_POLICY_PATH").unwrap_or_else(|| "config/policy.csv".to_string());

        let on_engine_fault = match var("AUTHZ_ON_ENGINE_FAULT") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid("AUTHZ_ON_ENGINE_FAULT"))?,
            None => EngineFaultPolicy::default(),
        };

        let request_timeout_seconds: u64 = match var("REQUEST_TIMEOUT_SECONDS") {
            Some(v) => v
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?,
            None => 30,
        };

        Ok(Self {
            addr,
            app_env,
            casbin_model_path,
            casbin_policy_path,
            on_engine_fault,
            request_timeout: Duration::from_secs(request_timeout_seconds),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.casbin_model_path, "config/model.conf");
        assert_eq!(config.casbin_policy_path, "config/policy.csv");
        assert_eq!(config.on_engine_fault, EngineFaultPolicy::Panic);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_configured_values() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("APP_ENV", "PROD"),
            ("AUTHZ_ON_ENGINE_FAULT", "internal_server_error"),
            ("REQUEST_TIMEOUT_SECONDS", "5"),
        ])
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
        assert_eq!(config.on_engine_fault, EngineFaultPolicy::InternalServerError);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_engine_fault_policy_fails_startup() {
        assert_eq!(
            config_from(&[("AUTHZ_ON_ENGINE_FAULT", "retry")]).err(),
            Some(ConfigError::Invalid("AUTHZ_ON_ENGINE_FAULT"))
        );
    }

    #[test]
    fn zero_or_garbage_timeout_fails_startup() {
        for value in ["0", "soon", "-1"] {
            assert_eq!(
                config_from(&[("REQUEST_TIMEOUT_SECONDS", value)]).err(),
                Some(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS")),
                "{value}"
            );
        }
    }

    #[test]
    fn non_numeric_port_fails_startup() {
        for value in ["http", "70000"] {
            assert_eq!(
                config_from(&[("PORT", value)]).err(),
                Some(ConfigError::Invalid("PORT")),
                "{value}"
            );
        }
    }
}

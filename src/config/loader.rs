use std::env;
use std::path::{Path, PathBuf};

use crate::config::dto::{ProxyConfig, SyncConfig};
use crate::config::env_file::EnvFile;
use crate::core::error::AppError;
use crate::features::libcal::RoomItemId;

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_OUTPUT_PATH: &str = "src/roomMeta.json";
pub const DEFAULT_BASE_URL: &str = "https://uri.libcal.com/api/1.1";

const TOKEN_KEY: &str = "VITE_LIBCAL_TOKEN";
const BASE_URL_KEY: &str = "VITE_LIBCAL_BASE_URL";
const ROOM_ITEM_IDS_KEY: &str = "VITE_ROOM_ITEM_IDS";

const DEFAULT_PROXY_PORT: u16 = 5173;
const DEFAULT_LIBCAL_PROXY_TARGET: &str = "https://uri.libcal.com";
const DEFAULT_TOKEN_REFRESH_TARGET: &str = "http://localhost:3001";

pub fn load_sync_config(env_path: &Path, output_path: PathBuf) -> Result<SyncConfig, AppError> {
    let env_file = EnvFile::read(env_path)?;
    tracing::debug!(path = %env_path.display(), keys = env_file.len(), "loaded env file");
    sync_config_from_env(&env_file, env_path, output_path)
}

pub fn sync_config_from_env(
    env_file: &EnvFile,
    env_path: &Path,
    output_path: PathBuf,
) -> Result<SyncConfig, AppError> {
    let token = env_file
        .get(TOKEN_KEY)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            AppError::configuration(format!(
                "No {TOKEN_KEY} found in {}. Please add your LibCal token and retry.",
                env_path.display()
            ))
        })?
        .to_string();

    let room_item_ids = parse_room_item_ids(env_file.get(ROOM_ITEM_IDS_KEY));
    if room_item_ids.is_empty() {
        return Err(AppError::configuration(format!(
            "No {ROOM_ITEM_IDS_KEY} found in {}. Please configure the room ids.",
            env_path.display()
        )));
    }

    Ok(SyncConfig {
        token,
        base_url: resolve_base_url(env_file.get(BASE_URL_KEY)),
        room_item_ids,
        output_path,
    })
}

/// Falls back to the LibCal origin unless the value carries an `http://` or
/// `https://` scheme (any case). Trailing slashes are trimmed from whichever
/// URL is chosen, configured ones included, so `{base}/space/items` never
/// contains `//`.
pub fn resolve_base_url(configured: Option<&str>) -> String {
    configured
        .filter(|value| has_http_scheme(value))
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

pub fn parse_room_item_ids(raw: Option<&str>) -> Vec<RoomItemId> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(RoomItemId::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Proxy settings from the process environment, falling back to the env file
/// read with the same grammar the sync command uses.
pub fn load_proxy_config(env_path: &Path, port: Option<u16>) -> Result<ProxyConfig, AppError> {
    let env_file = EnvFile::read(env_path)?;
    proxy_config_from_env(&env_file, port, |key| env::var(key).ok())
}

pub fn proxy_config_from_env(
    env_file: &EnvFile,
    port: Option<u16>,
    process_env: impl Fn(&str) -> Option<String>,
) -> Result<ProxyConfig, AppError> {
    let lookup =
        |key: &str| process_env(key).or_else(|| env_file.get(key).map(str::to_string));

    let port = match port {
        Some(port) => port,
        None => lookup("PROXY_PORT")
            .map(|value| value.parse::<u16>())
            .transpose()
            .map_err(|err| AppError::configuration(format!("invalid PROXY_PORT: {err}")))?
            .unwrap_or(DEFAULT_PROXY_PORT),
    };

    let libcal_target = proxy_target(
        "LIBCAL_PROXY_TARGET",
        lookup("LIBCAL_PROXY_TARGET"),
        DEFAULT_LIBCAL_PROXY_TARGET,
    )?;
    let token_refresh_target = proxy_target(
        "TOKEN_REFRESH_TARGET",
        lookup("TOKEN_REFRESH_TARGET"),
        DEFAULT_TOKEN_REFRESH_TARGET,
    )?;

    Ok(ProxyConfig {
        port,
        libcal_target,
        token_refresh_target,
    })
}

fn proxy_target(key: &str, value: Option<String>, default: &str) -> Result<String, AppError> {
    let value = value.unwrap_or_else(|| default.to_string());
    if !has_http_scheme(&value) {
        return Err(AppError::configuration(format!(
            "{key} must be an http(s) URL, got {value:?}"
        )));
    }

    Ok(value.trim_end_matches('/').to_string())
}

fn has_http_scheme(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(content: &str) -> Result<SyncConfig, AppError> {
        sync_config_from_env(
            &EnvFile::parse(content),
            Path::new(".env"),
            PathBuf::from(DEFAULT_OUTPUT_PATH),
        )
    }

    #[test]
    fn builds_typed_config() {
        let config = config_from(
            "VITE_LIBCAL_TOKEN=\"abc123\"\nVITE_LIBCAL_BASE_URL=https://example.edu/api/1.1/\nVITE_ROOM_ITEM_IDS= 101 , 102,,103 ",
        )
        .expect("valid config");

        assert_eq!(config.token, "abc123");
        assert_eq!(config.base_url, "https://example.edu/api/1.1");
        let ids: Vec<&str> = config.room_item_ids.iter().map(RoomItemId::as_str).collect();
        assert_eq!(ids, vec!["101", "102", "103"]);
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = config_from("VITE_ROOM_ITEM_IDS=1").expect_err("token required");
        assert!(matches!(err, AppError::Configuration(ref message) if message.contains(TOKEN_KEY)));
    }

    #[test]
    fn empty_token_is_fatal() {
        let err = config_from("VITE_LIBCAL_TOKEN=\"\"\nVITE_ROOM_ITEM_IDS=1").expect_err("empty");
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn token_is_checked_before_ids() {
        let err = config_from("").expect_err("empty config");
        assert!(matches!(err, AppError::Configuration(ref message) if message.contains(TOKEN_KEY)));
    }

    #[test]
    fn blank_id_list_is_fatal() {
        let err = config_from("VITE_LIBCAL_TOKEN=t\nVITE_ROOM_ITEM_IDS=\" , \"")
            .expect_err("no ids");
        assert!(
            matches!(err, AppError::Configuration(ref message) if message.contains(ROOM_ITEM_IDS_KEY))
        );
    }

    #[test]
    fn non_http_base_url_falls_back() {
        assert_eq!(resolve_base_url(Some("ftp://example.com")), DEFAULT_BASE_URL);
        assert_eq!(resolve_base_url(Some("")), DEFAULT_BASE_URL);
        assert_eq!(resolve_base_url(None), DEFAULT_BASE_URL);
        assert_eq!(
            resolve_base_url(Some("HTTP://localhost:8080")),
            "HTTP://localhost:8080"
        );
    }

    #[test]
    fn proxy_keys_after_unclosed_quote_are_read() {
        let env_file = EnvFile::parse(
            "VITE_ROOM_ITEM_IDS=\"1, 2\nPROXY_PORT=8088\nTOKEN_REFRESH_TARGET=http://127.0.0.1:4000/\n",
        );

        let config = proxy_config_from_env(&env_file, None, |_| None).expect("proxy config");

        assert_eq!(config.port, 8088);
        assert_eq!(config.token_refresh_target, "http://127.0.0.1:4000");
        assert_eq!(config.libcal_target, DEFAULT_LIBCAL_PROXY_TARGET);
    }

    #[test]
    fn process_env_overrides_env_file_for_proxy() {
        let env_file = EnvFile::parse("PROXY_PORT=8088\nLIBCAL_PROXY_TARGET=https://file.example");

        let config = proxy_config_from_env(&env_file, None, |key| match key {
            "PROXY_PORT" => Some("9000".to_string()),
            "LIBCAL_PROXY_TARGET" => Some("https://env.example/".to_string()),
            _ => None,
        })
        .expect("proxy config");

        assert_eq!(config.port, 9000);
        assert_eq!(config.libcal_target, "https://env.example");
        assert_eq!(config.token_refresh_target, DEFAULT_TOKEN_REFRESH_TARGET);
    }

    #[test]
    fn cli_port_wins_and_bad_targets_are_rejected() {
        let env_file = EnvFile::parse("PROXY_PORT=not-a-port");
        let config = proxy_config_from_env(&env_file, Some(7000), |_| None).expect("cli port");
        assert_eq!(config.port, 7000);

        let err = proxy_config_from_env(&env_file, None, |_| None).expect_err("bad port");
        assert!(matches!(err, AppError::Configuration(ref message) if message.contains("PROXY_PORT")));

        let env_file = EnvFile::parse("TOKEN_REFRESH_TARGET=localhost:3001");
        let err = proxy_config_from_env(&env_file, None, |_| None).expect_err("no scheme");
        assert!(
            matches!(err, AppError::Configuration(ref message) if message.contains("TOKEN_REFRESH_TARGET"))
        );
    }

    #[test]
    fn configured_base_url_loses_trailing_slashes() {
        assert_eq!(
            resolve_base_url(Some("https://example.edu/api/1.1//")),
            "https://example.edu/api/1.1"
        );
    }
}

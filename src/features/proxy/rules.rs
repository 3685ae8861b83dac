use crate::config::ProxyConfig;

pub const LIBCAL_PREFIX: &str = "/api";
pub const LIBCAL_VERSIONED_PREFIX: &str = "/api/1.1";
pub const TOKEN_REFRESH_PREFIX: &str = "/token-refresh";

/// A path-prefix forward: requests under `prefix` go to `target`, with the
/// prefix swapped for `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRule {
    pub prefix: &'static str,
    pub replacement: &'static str,
    pub target: String,
    pub reattach_authorization: bool,
}

impl ProxyRule {
    pub fn libcal(target: impl Into<String>) -> Self {
        Self {
            prefix: LIBCAL_PREFIX,
            replacement: LIBCAL_VERSIONED_PREFIX,
            target: target.into(),
            reattach_authorization: true,
        }
    }

    pub fn token_refresh(target: impl Into<String>) -> Self {
        Self {
            prefix: TOKEN_REFRESH_PREFIX,
            replacement: "",
            target: target.into(),
            reattach_authorization: false,
        }
    }

    /// Rewrites a request path, or `None` when the rule does not apply.
    /// `/api` matches `/api` and `/api/...` but never `/apis`.
    pub fn rewrite_path(&self, path: &str) -> Option<String> {
        let rest = path.strip_prefix(self.prefix)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }

        let rewritten = format!("{}{rest}", self.replacement);
        if rewritten.is_empty() {
            Some("/".to_string())
        } else {
            Some(rewritten)
        }
    }

    pub fn upstream_url(&self, path_and_query: &str) -> Option<String> {
        let (path, query) = match path_and_query.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path_and_query, None),
        };

        let path = self.rewrite_path(path)?;
        Some(match query {
            Some(query) => format!("{}{path}?{query}", self.target),
            None => format!("{}{path}", self.target),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProxyRules {
    rules: Vec<ProxyRule>,
}

impl ProxyRules {
    pub fn new(rules: Vec<ProxyRule>) -> Self {
        Self { rules }
    }

    pub fn from_config(config: &ProxyConfig) -> Self {
        Self::new(vec![
            ProxyRule::libcal(config.libcal_target.clone()),
            ProxyRule::token_refresh(config.token_refresh_target.clone()),
        ])
    }

    /// First matching rule and the upstream URL it produces.
    pub fn route(&self, path_and_query: &str) -> Option<(&ProxyRule, String)> {
        self.rules
            .iter()
            .find_map(|rule| rule.upstream_url(path_and_query).map(|url| (rule, url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ProxyRules {
        ProxyRules::from_config(&ProxyConfig {
            port: 0,
            libcal_target: "https://uri.libcal.com".to_string(),
            token_refresh_target: "http://localhost:3001".to_string(),
        })
    }

    #[test]
    fn api_prefix_is_versioned() {
        let binding = rules();
        let (rule, url) = binding.route("/api/space/items/42").expect("api rule");
        assert_eq!(url, "https://uri.libcal.com/api/1.1/space/items/42");
        assert!(rule.reattach_authorization);
    }

    #[test]
    fn query_string_is_preserved() {
        let (_, url) = rules()
            .route("/api/space/bookings?date=2024-05-01&limit=20")
            .expect("api rule");
        assert_eq!(
            url,
            "https://uri.libcal.com/api/1.1/space/bookings?date=2024-05-01&limit=20"
        );
    }

    #[test]
    fn token_refresh_prefix_is_stripped() {
        let binding = rules();
        let (rule, url) = binding.route("/token-refresh/oauth/token").expect("refresh rule");
        assert_eq!(url, "http://localhost:3001/oauth/token");
        assert!(!rule.reattach_authorization);

        let (_, url) = rules().route("/token-refresh").expect("bare prefix");
        assert_eq!(url, "http://localhost:3001/");

        let (_, url) = rules().route("/token-refresh?grant=client").expect("query only");
        assert_eq!(url, "http://localhost:3001/?grant=client");
    }

    #[test]
    fn prefix_must_end_at_segment_boundary() {
        assert!(rules().route("/apis/space").is_none());
        assert!(rules().route("/token-refreshes").is_none());
        assert!(rules().route("/index.html").is_none());
    }
}

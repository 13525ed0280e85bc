//! Client configuration.

use gridio_model::DecodeMode;

/// Configuration shared by every container opened against a cluster.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Cluster address as `host:port`, without a scheme.
    pub cluster_url: String,
    /// Policy for response attributes with unrecognized type tags.
    pub decode_mode: DecodeMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cluster_url: "localhost:8081".to_owned(),
            decode_mode: DecodeMode::default(),
        }
    }
}

impl ClientConfig {
    /// Configuration for the given cluster address.
    #[must_use]
    pub fn new(cluster_url: impl Into<String>) -> Self {
        Self {
            cluster_url: cluster_url.into(),
            ..Self::default()
        }
    }

    /// Set the decode strictness policy.
    #[must_use]
    pub fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = mode;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// `GRIDIO_CLUSTER_URL` overrides the cluster address and
    /// `GRIDIO_DECODE_MODE` (`lenient` or `strict`) the decode policy.
    /// Unset or unrecognized values keep the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("GRIDIO_CLUSTER_URL") {
            config.cluster_url = v;
        }
        if let Ok(v) = std::env::var("GRIDIO_DECODE_MODE") {
            if let Some(mode) = parse_decode_mode(&v) {
                config.decode_mode = mode;
            }
        }

        config
    }
}

fn parse_decode_mode(value: &str) -> Option<DecodeMode> {
    match value.to_ascii_lowercase().as_str() {
        "lenient" => Some(DecodeMode::Lenient),
        "strict" => Some(DecodeMode::Strict),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.cluster_url, "localhost:8081");
        assert_eq!(config.decode_mode, DecodeMode::Lenient);
    }

    #[test]
    fn test_should_override_decode_mode() {
        let config = ClientConfig::new("grid:8081").with_decode_mode(DecodeMode::Strict);
        assert_eq!(config.cluster_url, "grid:8081");
        assert_eq!(config.decode_mode, DecodeMode::Strict);
    }

    #[test]
    fn test_should_parse_decode_mode_names() {
        assert_eq!(parse_decode_mode("strict"), Some(DecodeMode::Strict));
        assert_eq!(parse_decode_mode("Lenient"), Some(DecodeMode::Lenient));
        assert_eq!(parse_decode_mode("other"), None);
    }
}

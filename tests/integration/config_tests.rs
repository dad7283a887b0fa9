//! Configuration loading tests

#[cfg(test)]
mod tests {
    use sse_chat_gateway::config::Validate;
    use sse_chat_gateway::{Config, Dialect, GatewayError};
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[tokio::test]
    async fn test_example_config_parses() {
        let content = include_str!("../../config/gateway.yaml.example");
        let config = Config::from_yaml_str(content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.model().dialect(), Dialect::ChatMessages);
    }

    #[tokio::test]
    async fn test_file_then_env() {
        let file = write_config(
            r#"
model:
  base_url: "http://gpu-box:8000/v1"
  endpoint: "/completions"
sse:
  heartbeat_secs: 10
"#,
        );

        let config = Config::load_with(
            file.path(),
            lookup(&[("SSE_FIRST_TOKEN_TIMEOUT_SECS", "2"), ("GATEWAY_HOST", "127.0.0.1")]),
        )
        .await
        .unwrap();

        assert_eq!(config.server().host, "127.0.0.1");
        assert_eq!(config.model().dialect(), Dialect::PromptCompletion);
        assert_eq!(config.model().url(), "http://gpu-box:8000/v1/completions");

        let settings = config.sse().stream_settings();
        assert_eq!(settings.heartbeat_interval, Duration::from_secs(10));
        assert_eq!(settings.first_fragment_timeout, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_env_can_invalidate() {
        let file = write_config("server:\n  port: 8081\n");
        let err = Config::load_with(file.path(), lookup(&[("MODEL_BASE_URL", "localhost")]))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[tokio::test]
    async fn test_unknown_sections_are_ignored() {
        let file = write_config("logging:\n  level: debug\nserver:\n  port: 9999\n");
        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server().port, 9999);
    }

    #[test]
    fn test_validate_trait_is_public() {
        let config = Config::default();
        assert!(config.gateway.validate().is_ok());
    }
}

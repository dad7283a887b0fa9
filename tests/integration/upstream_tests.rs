//! Upstream client tests against a stub backend

#[cfg(test)]
mod tests {
    use crate::common::{chat_delta, event_stream, model_config};
    use futures::StreamExt;
    use serde_json::json;
    use sse_chat_gateway::config::ModelConfig;
    use sse_chat_gateway::core::completion::collect_fragments;
    use sse_chat_gateway::{ChatInput, Dialect, FragmentSource, GatewayError, UpstreamClient};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn fragments(client: &UpstreamClient, streaming: bool) -> Vec<String> {
        client
            .stream(&ChatInput::user("hello"), streaming)
            .map(|item| item.unwrap())
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_chat_stream_fragments() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "local-llama",
                "stream": true,
                "messages": [{"role": "user", "content": "hello"}],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                event_stream(&[chat_delta("Hi"), chat_delta(" there")]),
                "text/event-stream",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = UpstreamClient::new(&model_config(&server, "/v1/chat/completions")).unwrap();
        assert_eq!(client.dialect(), Dialect::ChatMessages);
        assert_eq!(fragments(&client, true).await, vec!["Hi", " there"]);
    }

    #[tokio::test]
    async fn test_stream_flag_ignored_by_backend() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "Bonjour"}}]
            })))
            .mount(&server)
            .await;

        let client = UpstreamClient::new(&model_config(&server, "/v1/chat/completions")).unwrap();
        assert_eq!(fragments(&client, true).await, vec!["Bonjour"]);
    }

    #[tokio::test]
    async fn test_legacy_completion_request_and_stream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/completion"))
            .and(body_partial_json(json!({"n_predict": 256, "temperature": 0.2})))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                event_stream(&[
                    json!({"content": "Hel"}).to_string(),
                    json!({"content": "lo"}).to_string(),
                ]),
                "text/event-stream",
            ))
            .mount(&server)
            .await;

        let client = UpstreamClient::new(&model_config(&server, "/completion")).unwrap();
        assert_eq!(client.dialect(), Dialect::LegacyCompletion);
        assert_eq!(fragments(&client, true).await, vec!["Hel", "lo"]);

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("stream").is_none());
        assert!(body.get("model").is_none());
        assert_eq!(body["prompt"], "hello");
    }

    #[tokio::test]
    async fn test_prompt_completion_one_shot() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .and(body_partial_json(json!({"stream": false, "max_tokens": 512})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"text": "plain answer"}]
            })))
            .mount(&server)
            .await;

        let client = UpstreamClient::new(&model_config(&server, "/v1/completions")).unwrap();
        let text = collect_fragments(client.stream(&ChatInput::user("hello"), false))
            .await
            .unwrap();
        assert_eq!(text, "plain answer");
    }

    #[tokio::test]
    async fn test_malformed_frames_are_skipped() {
        let server = MockServer::start().await;
        let body = format!(
            ": keep-alive\n\ndata: {{not json\n\nevent: ping\ndata: {}\n\ndata: [DONE]\n\ndata: {}\n\n",
            chat_delta("ok"),
            chat_delta("after done"),
        );
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
            .mount(&server)
            .await;

        let client = UpstreamClient::new(&model_config(&server, "/v1/chat/completions")).unwrap();
        assert_eq!(fragments(&client, true).await, vec!["ok"]);
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = UpstreamClient::new(&model_config(&server, "/v1/chat/completions")).unwrap();
        let items: Vec<_> = client
            .stream(&ChatInput::user("hello"), true)
            .collect()
            .await;

        assert_eq!(items.len(), 1);
        match &items[0] {
            Err(GatewayError::UpstreamStatus { status, body }) => {
                assert_eq!(*status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("unexpected item: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let config = ModelConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            connect_timeout_secs: 2,
            ..ModelConfig::default()
        };

        let client = UpstreamClient::new(&config).unwrap();
        let err = collect_fragments(client.stream(&ChatInput::user("hello"), true))
            .await
            .unwrap_err();
        assert!(err.is_upstream());
    }
}

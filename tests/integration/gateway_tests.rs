//! End-to-end gateway tests: HTTP app, real upstream client, stub backend

#[cfg(test)]
mod tests {
    use crate::common::assertions::{message, without_comments};
    use crate::common::{SseEvent, chat_delta, event_stream, gateway_config, parse_sse};
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use serde_json::json;
    use sse_chat_gateway::server::{AppState, HttpServer};
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CHAT_ENDPOINT: &str = "/v1/chat/completions";

    macro_rules! app {
        ($server:expr) => {{
            let state = AppState::new(gateway_config($server, CHAT_ENDPOINT)).unwrap();
            test::init_service(HttpServer::create_app(web::Data::new(state))).await
        }};
    }

    /// POST a prompt to the streaming route and parse the event stream
    macro_rules! stream_events {
        ($app:expr, $prompt:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/chat/stream")
                .set_json(json!({"userPrompt": $prompt}))
                .to_request();
            let body = test::call_and_read_body($app, req).await;
            parse_sse(std::str::from_utf8(&body).unwrap())
        }};
    }

    async fn mount_streaming(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"stream": true})))
            .respond_with(response)
            .mount(server)
            .await;
    }

    async fn mount_one_shot(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"stream": false})))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[actix_web::test]
    async fn test_streamed_deltas() {
        let server = MockServer::start().await;
        mount_streaming(
            &server,
            ResponseTemplate::new(200).set_body_raw(
                event_stream(&[chat_delta("Hi"), chat_delta(" there")]),
                "text/event-stream",
            ),
        )
        .await;
        let app = app!(&server);

        let events = stream_events!(&app, "hello");
        assert_eq!(events, vec![message("Hi"), message(" there"), SseEvent::Done]);
    }

    #[actix_web::test]
    async fn test_single_json_answer() {
        let server = MockServer::start().await;
        mount_streaming(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "Bonjour"}}]
            })),
        )
        .await;
        let app = app!(&server);

        let events = stream_events!(&app, "hello");
        assert_eq!(events, vec![message("Bonjour"), SseEvent::Done]);
    }

    #[actix_web::test]
    async fn test_stalled_stream_falls_back() {
        let server = MockServer::start().await;
        mount_streaming(
            &server,
            ResponseTemplate::new(200)
                .set_body_raw(event_stream(&[chat_delta("too late")]), "text/event-stream")
                .set_delay(Duration::from_secs(5)),
        )
        .await;
        mount_one_shot(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"content": "fallback answer"})),
        )
        .await;
        let app = app!(&server);

        let events = stream_events!(&app, "hello");
        assert_eq!(
            without_comments(events),
            vec![message("fallback answer"), SseEvent::Done]
        );

        let requests = server.received_requests().await.unwrap();
        let flags: Vec<bool> = requests
            .iter()
            .map(|r| {
                let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
                body["stream"].as_bool().unwrap()
            })
            .collect();
        assert_eq!(flags, vec![true, false]);
    }

    #[actix_web::test]
    async fn test_empty_stream_matches_direct_call() {
        let server = MockServer::start().await;
        mount_streaming(
            &server,
            ResponseTemplate::new(200).set_body_raw(event_stream(&[]), "text/event-stream"),
        )
        .await;
        mount_one_shot(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "direct"}}]
            })),
        )
        .await;
        let app = app!(&server);

        let events = stream_events!(&app, "hello");
        assert_eq!(events, vec![message("direct"), SseEvent::Done]);
    }

    #[actix_web::test]
    async fn test_upstream_errors_surface_inline() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        let app = app!(&server);

        let events = stream_events!(&app, "hello");
        assert_eq!(
            events,
            vec![
                message("[error] Upstream returned status 500: boom"),
                SseEvent::Done
            ]
        );
    }

    #[actix_web::test]
    async fn test_blank_prompt_never_reaches_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let app = app!(&server);

        let events = stream_events!(&app, "");
        assert_eq!(
            events,
            vec![message("[error] missing userPrompt"), SseEvent::Done]
        );
    }

    #[actix_web::test]
    async fn test_whole_answer_route() {
        let server = MockServer::start().await;
        mount_streaming(
            &server,
            ResponseTemplate::new(200).set_body_raw(
                event_stream(&[chat_delta("4"), chat_delta("2")]),
                "text/event-stream",
            ),
        )
        .await;
        let app = app!(&server);

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(json!({"system": "numbers only", "userPrompt": "answer?"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"text": "42"}));
    }

    #[actix_web::test]
    async fn test_whole_answer_route_upstream_down() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad"))
            .mount(&server)
            .await;
        let app = app!(&server);

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(json!({"userPrompt": "hello"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[actix_web::test]
    async fn test_query_stream_route() {
        let server = MockServer::start().await;
        mount_streaming(
            &server,
            ResponseTemplate::new(200)
                .set_body_raw(event_stream(&[chat_delta("yo")]), "text/event-stream"),
        )
        .await;
        let app = app!(&server);

        let req = test::TestRequest::get()
            .uri("/api/chat/stream?user=hello")
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(
            parse_sse(std::str::from_utf8(&body).unwrap()),
            vec![message("yo"), SseEvent::Done]
        );
    }
}

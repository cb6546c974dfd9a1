use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use unified_llm::{
    AIClient, AIModel, Configuration, LLMProvider, Prompt, RequestOptions, StreamChunk,
};
use wiremock::MockServer;

use super::providers::{
    deepseek::DeepSeekTestSetup, gemini::GeminiTestSetup, mount_completion, mount_stream,
    openai::OpenAITestSetup, ProviderTestSetup, EXPECTED_TEXT, SYSTEM_PROMPT, USER_PROMPT,
};

fn prompt() -> Prompt {
    Prompt::system(SYSTEM_PROMPT).with_user(USER_PROMPT)
}

fn options() -> Option<RequestOptions> {
    Some(RequestOptions::new().temperature(0.2))
}

/// Stream the fixture through the adapter and check every chunk.
async fn run_streaming_test<T: ProviderTestSetup>() {
    let config = T::get_config();
    let mock_server = MockServer::start().await;
    mount_stream(&mock_server, &config).await;

    let provider = T::create_provider(&T::base_url(&mock_server.uri()));
    assert_eq!(provider.provider_type(), config.provider_type);

    let stream = provider
        .stream_text(config.model, prompt().messages(), options())
        .await
        .unwrap_or_else(|e| panic!("{}: failed to start stream: {e}", config.provider_type));
    assert_eq!(stream.model(), config.model);

    let chunks: Vec<StreamChunk> = stream
        .map(|chunk| chunk.expect("stream item should not be an error"))
        .collect()
        .await;

    let text: String = chunks.iter().map(|c| c.text_delta.as_str()).collect();
    assert_eq!(text, EXPECTED_TEXT, "{}", config.provider_type);

    let (last, rest) = chunks.split_last().expect("at least one chunk");
    assert!(last.is_final);
    assert_eq!(last.finish_reason.as_deref(), Some("stop"));
    assert_eq!(last.usage.and_then(|u| u.total_tokens), config.total_tokens);
    assert!(rest.iter().all(|c| !c.is_final && !c.text_delta.is_empty()));

    assert!(chunks.iter().all(|c| !c.id.is_empty()));
    assert!(chunks.iter().all(|c| c.raw_provider_response.is_some()));
    if let Some(id) = config.response_id {
        assert!(chunks.iter().all(|c| c.id == id));
    }
}

/// Buffer the fixture into a single response.
async fn run_buffered_test<T: ProviderTestSetup>() {
    let config = T::get_config();
    let mock_server = MockServer::start().await;
    mount_stream(&mock_server, &config).await;

    let provider = T::create_provider(&T::base_url(&mock_server.uri()));
    let response = provider
        .stream_text(config.model, prompt().messages(), options())
        .await
        .unwrap()
        .buffer()
        .await
        .unwrap();

    assert_eq!(response.content, EXPECTED_TEXT);
    assert_eq!(response.model, config.model);
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(
        response.usage.and_then(|u| u.total_tokens),
        config.total_tokens
    );

    let conversation = prompt().with_response(&response);
    assert_eq!(conversation.len(), 3);
}

/// Run the non-streaming path against the provider's response body.
async fn run_complete_test<T: ProviderTestSetup>() {
    let config = T::get_config();
    let mock_server = MockServer::start().await;
    mount_completion(&mock_server, &config).await;

    let provider = T::create_provider(&T::base_url(&mock_server.uri()));
    let response = provider
        .complete(config.model, prompt().messages(), options())
        .await
        .unwrap_or_else(|e| panic!("{}: completion failed: {e}", config.provider_type));

    assert_eq!(response.content, EXPECTED_TEXT);
    assert_eq!(response.model, config.model);
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert!(response.usage.and_then(|u| u.total_tokens).is_some());
    match config.response_id {
        Some(id) => assert_eq!(response.id, id),
        None => assert!(uuid::Uuid::parse_str(&response.id).is_ok()),
    }

    mock_server.reset().await;
    mount_completion(&mock_server, &config).await;
    let text = provider
        .generate_text(config.model, prompt().messages(), options())
        .await
        .unwrap();
    assert_eq!(text, EXPECTED_TEXT);
}

#[tokio::test]
async fn test_openai_complete() {
    run_complete_test::<OpenAITestSetup>().await;
}

#[tokio::test]
async fn test_deepseek_complete() {
    run_complete_test::<DeepSeekTestSetup>().await;
}

#[tokio::test]
async fn test_gemini_complete_without_response_id() {
    run_complete_test::<GeminiTestSetup>().await;
}

#[test_log::test(tokio::test)]
async fn test_openai_streaming() {
    run_streaming_test::<OpenAITestSetup>().await;
}

#[test_log::test(tokio::test)]
async fn test_deepseek_streaming() {
    run_streaming_test::<DeepSeekTestSetup>().await;
}

#[test_log::test(tokio::test)]
async fn test_gemini_streaming() {
    run_streaming_test::<GeminiTestSetup>().await;
}

#[tokio::test]
async fn test_openai_buffered() {
    run_buffered_test::<OpenAITestSetup>().await;
}

#[tokio::test]
async fn test_deepseek_buffered() {
    run_buffered_test::<DeepSeekTestSetup>().await;
}

#[tokio::test]
async fn test_gemini_buffered() {
    run_buffered_test::<GeminiTestSetup>().await;
}

#[test_log::test(tokio::test)]
async fn test_client_routes_each_model_to_its_provider() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    let openai = OpenAITestSetup::get_config();
    let deepseek = DeepSeekTestSetup::get_config();
    let gemini = GeminiTestSetup::get_config();
    for config in [&openai, &deepseek, &gemini] {
        mount_stream(&mock_server, config).await;
    }

    let configuration = Configuration::new()
        .with_api_key(openai.provider_type, "test-api-key")
        .with_api_key(deepseek.provider_type, "test-api-key")
        .with_api_key(gemini.provider_type, "test-api-key")
        .with_base_url(openai.provider_type, OpenAITestSetup::base_url(&uri))
        .with_base_url(deepseek.provider_type, DeepSeekTestSetup::base_url(&uri))
        .with_base_url(gemini.provider_type, GeminiTestSetup::base_url(&uri))
        .with_default_options(RequestOptions::new().temperature(0.2));
    let client = AIClient::new(configuration).unwrap();

    for config in [&openai, &deepseek, &gemini] {
        let model = AIModel::new(config.provider_type, config.model);
        let text = client
            .stream_text(&model, prompt().messages(), None)
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(text, EXPECTED_TEXT, "{model}");
        assert!(client.is_initialized(config.provider_type));
    }
}

#[tokio::test]
async fn test_dropping_stream_early() {
    let config = DeepSeekTestSetup::get_config();
    let mock_server = MockServer::start().await;
    mount_stream(&mock_server, &config).await;

    let provider = DeepSeekTestSetup::create_provider(&DeepSeekTestSetup::base_url(
        &mock_server.uri(),
    ));
    let mut stream = provider
        .stream_text(config.model, prompt().messages(), options())
        .await
        .unwrap();

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.text_delta, "Rust");
    drop(stream);

    // The adapter is still usable after a cancelled stream.
    mock_server.reset().await;
    mount_stream(&mock_server, &config).await;
    let text = provider
        .stream_text(config.model, prompt().messages(), options())
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(text, EXPECTED_TEXT);
}

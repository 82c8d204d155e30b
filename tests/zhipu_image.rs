//! Image generation integration tests

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zhipu_ai::prelude::*;

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G'];

async fn provider_for(server: &MockServer) -> Zhipu {
    Zhipu::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn generate_downloads_returned_image() {
    let server = MockServer::start().await;
    let image_url = format!("{}/files/img_1.png", server.uri());

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(body_partial_json(json!({
            "model": "cogview-4",
            "prompt": "a red panda",
            "size": "1024x1024",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created": 1700000000,
            "data": [{ "url": image_url }],
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/img_1.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG_MAGIC))
        .expect(1)
        .mount(&server)
        .await;

    let model = provider_for(&server).await.image_model("cogview-4");
    let response = model
        .generate(
            "a red panda",
            &ImageGenerationOptions {
                size: Some("1024x1024".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(response.images.len(), 1);
    assert_eq!(response.images[0].url, image_url);
    assert_eq!(response.images[0].data, PNG_MAGIC);
    assert!(response.warnings.is_empty());
}

#[tokio::test]
async fn unsupported_options_warn_but_do_not_fail() {
    let server = MockServer::start().await;
    let image_url = format!("{}/files/img_2.png", server.uri());

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created": 1700000000,
            "data": [{ "url": image_url }],
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/img_2.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG_MAGIC))
        .mount(&server)
        .await;

    let model = provider_for(&server).await.image_model("cogview-4");
    let response = model
        .generate(
            "a scene",
            &ImageGenerationOptions {
                n: Some(4),
                seed: Some(42),
                aspect_ratio: Some("16:9".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(response.warnings.len(), 3);
}

#[tokio::test]
async fn invalid_size_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    let model = provider_for(&server).await.image_model("cogview-4");

    let err = model
        .generate(
            "a scene",
            &ImageGenerationOptions {
                size: Some("100x100".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::InvalidParameter(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

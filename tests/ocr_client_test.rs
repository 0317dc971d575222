// Recognition client behaviour against an in-process OCR.space stand-in.
mod common;

use std::time::Duration;

use clipboard_ocr::ocr::{MAX_IMAGE_BYTES, OcrClient, OcrConfig, RecognitionError};
use common::{
    IdleEndpoint, MockOcrServer, Reply, VALID_KEY, error_json, image_of, png_image, success_json,
};

fn client_for(url: &str) -> OcrClient {
    OcrClient::new(OcrConfig::with_endpoint(url)).expect("client init failed")
}

#[tokio::test]
async fn each_supported_media_type_selects_matching_label() {
    let cases = [
        ("image/png", ".png", "PNG"),
        ("image/jpeg", ".jpg", "JPG"),
        ("image/jpg", ".jpg", "JPG"),
        ("image/webp", ".webp", "WEBP"),
        ("image/bmp", ".bmp", "BMP"),
        ("image/gif", ".gif", "GIF"),
        ("image/x-portable-anymap", ".png", "PNG"),
    ];

    for (media_type, ext, label) in cases {
        let server = MockOcrServer::start(vec![Reply::Json(success_json(&["ok"]))]);
        let client = client_for(&server.url);

        client
            .recognize(&image_of(media_type, 32), VALID_KEY)
            .await
            .expect("recognize should succeed");

        let requests = server.finish();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.field("filetype").as_deref(), Some(label), "{media_type}");
        let file_name = request.file_name().expect("file part has a name");
        assert!(file_name.starts_with("clipboard_"), "{file_name}");
        assert!(file_name.ends_with(ext), "{media_type} -> {file_name}");
    }
}

#[tokio::test]
async fn primary_request_carries_fixed_parameters_and_key_header() {
    let server = MockOcrServer::start(vec![Reply::Json(success_json(&["hi"]))]);
    let client = client_for(&server.url);

    client
        .recognize(&png_image(64), VALID_KEY)
        .await
        .expect("recognize should succeed");

    let requests = server.finish();
    let request = &requests[0];
    assert!(request.head.starts_with("post "));
    assert!(request.head.contains(&format!("apikey: {}", VALID_KEY.to_lowercase())));
    assert!(request.has_field("file"));
    assert!(!request.has_field("base64Image"));
    assert_eq!(request.field("language").as_deref(), Some("chs"));
    assert_eq!(request.field("isOverlayRequired").as_deref(), Some("false"));
    assert_eq!(request.field("detectOrientation").as_deref(), Some("true"));
    assert_eq!(request.field("scale").as_deref(), Some("true"));
    assert_eq!(request.field("OCREngine").as_deref(), Some("2"));
}

#[tokio::test]
async fn oversized_image_fails_before_any_network_call() {
    let endpoint = IdleEndpoint::bind();
    let client = client_for(&endpoint.url);

    let result = client
        .recognize(&png_image(MAX_IMAGE_BYTES + 1), VALID_KEY)
        .await;

    assert_eq!(
        result,
        Err(RecognitionError::ImageTooLarge {
            size: MAX_IMAGE_BYTES + 1,
            limit: MAX_IMAGE_BYTES,
        })
    );
    assert_eq!(endpoint.connection_attempts(), 0);
}

#[tokio::test]
async fn empty_image_fails_before_any_network_call() {
    let endpoint = IdleEndpoint::bind();
    let client = client_for(&endpoint.url);

    let result = client.recognize(&image_of("image/png", 0), VALID_KEY).await;

    assert_eq!(result, Err(RecognitionError::EmptyImage));
    assert_eq!(endpoint.connection_attempts(), 0);
}

#[tokio::test]
async fn missing_or_short_key_fails_before_any_network_call() {
    let endpoint = IdleEndpoint::bind();
    let client = client_for(&endpoint.url);

    let missing = client.recognize(&png_image(64), "").await;
    let short = client.recognize(&png_image(64), "123456789").await;

    assert_eq!(missing, Err(RecognitionError::MissingKey));
    assert!(matches!(short, Err(RecognitionError::InvalidKey(_))));
    assert_eq!(endpoint.connection_attempts(), 0);
}

#[tokio::test]
async fn key_of_length_ten_reaches_the_server() {
    let server = MockOcrServer::start(vec![Reply::Json(success_json(&["ten"]))]);
    let client = client_for(&server.url);

    let result = client.recognize(&png_image(64), "1234567890").await;

    assert_eq!(result.expect("recognize should succeed").text, "ten");
    assert_eq!(server.finish().len(), 1);
}

#[tokio::test]
async fn multiple_results_are_trimmed_and_joined_by_blank_line() {
    let server = MockOcrServer::start(vec![Reply::Json(success_json(&["a", "b "]))]);
    let client = client_for(&server.url);

    let result = client
        .recognize(&png_image(64), VALID_KEY)
        .await
        .expect("recognize should succeed");

    assert_eq!(result.text, "a\n\nb");
}

#[tokio::test]
async fn file_type_error_triggers_single_base64_fallback_using_first_result_only() {
    let server = MockOcrServer::start(vec![
        Reply::Json(error_json("Unable to recognize the file type")),
        Reply::Json(success_json(&["  first  ", "second"])),
    ]);
    let client = client_for(&server.url);

    let result = client
        .recognize(&image_of("image/webp", 16), VALID_KEY)
        .await
        .expect("fallback should succeed");

    let requests = server.finish();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].has_field("file"));

    let fallback = &requests[1];
    assert!(!fallback.has_field("file"));
    let data_uri = fallback.field("base64Image").expect("base64Image field present");
    assert!(data_uri.starts_with("data:image/webp;base64,"));
    assert_eq!(fallback.field("filetype").as_deref(), Some("WEBP"));
    assert_eq!(fallback.field("language").as_deref(), Some("chs"));

    assert_eq!(result.text, "first");
}

#[tokio::test]
async fn failing_fallback_reports_unsupported_file_type() {
    let server = MockOcrServer::start(vec![
        Reply::Json(error_json("E216: Unable to detect the file extension")),
        Reply::Json(error_json("E216: Unable to detect the file extension")),
    ]);
    let client = client_for(&server.url);

    let result = client.recognize(&png_image(64), VALID_KEY).await;

    assert!(matches!(result, Err(RecognitionError::UnsupportedFileType(_))));
    assert_eq!(server.finish().len(), 2);
}

#[tokio::test]
async fn key_error_from_server_is_invalid_key_without_fallback() {
    let server = MockOcrServer::start(vec![Reply::Json(error_json("The API key is invalid"))]);
    let client = client_for(&server.url);

    let result = client.recognize(&png_image(64), VALID_KEY).await;

    assert!(matches!(result, Err(RecognitionError::InvalidKey(_))));
    assert_eq!(server.finish().len(), 1);
}

#[tokio::test]
async fn unknown_server_error_is_generic_without_fallback() {
    let server = MockOcrServer::start(vec![Reply::Json(error_json("Timed out waiting for results"))]);
    let client = client_for(&server.url);

    let result = client.recognize(&png_image(64), VALID_KEY).await;

    assert_eq!(
        result,
        Err(RecognitionError::ServerError("Timed out waiting for results".to_string()))
    );
    assert_eq!(server.finish().len(), 1);
}

#[tokio::test]
async fn non_json_body_is_server_error_with_body_prefix() {
    let server = MockOcrServer::start(vec![Reply::Raw("<html>bad gateway</html>".to_string())]);
    let client = client_for(&server.url);

    let result = client.recognize(&png_image(64), VALID_KEY).await;

    match result {
        Err(RecognitionError::ServerError(message)) => assert!(message.contains("bad gateway")),
        other => panic!("unexpected result: {other:?}"),
    }
    server.finish();
}

#[tokio::test]
async fn blank_results_are_empty_result() {
    let server = MockOcrServer::start(vec![Reply::Json(success_json(&["  ", "\r\n"]))]);
    let client = client_for(&server.url);

    let result = client.recognize(&png_image(64), VALID_KEY).await;

    assert_eq!(result, Err(RecognitionError::EmptyResult));
    server.finish();
}

#[tokio::test]
async fn slow_primary_request_times_out() {
    let server = MockOcrServer::start(vec![Reply::Hang(Duration::from_millis(1500))]);
    let mut config = OcrConfig::with_endpoint(&server.url);
    config.request_timeout = Duration::from_millis(200);
    let client = OcrClient::new(config).expect("client init failed");

    let result = client.recognize(&png_image(64), VALID_KEY).await;

    assert!(matches!(result, Err(RecognitionError::Timeout(_))));
}

#[tokio::test]
async fn slow_fallback_request_is_bounded_by_the_same_timeout() {
    let server = MockOcrServer::start(vec![
        Reply::Json(error_json("Unable to recognize the file type")),
        Reply::Hang(Duration::from_millis(1500)),
    ]);
    let mut config = OcrConfig::with_endpoint(&server.url);
    config.request_timeout = Duration::from_millis(300);
    let client = OcrClient::new(config).expect("client init failed");

    let result = client.recognize(&png_image(64), VALID_KEY).await;

    assert!(matches!(result, Err(RecognitionError::Timeout(_))));
    assert_eq!(server.hits(), 2);
}

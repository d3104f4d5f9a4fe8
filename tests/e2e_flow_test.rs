//! End-to-end flow: unequal input sizes through to a decoded animation.

mod common;

use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use common::{fixtures, fixtures::users, TestApp};
use std::io::Cursor;

#[tokio::test]
async fn test_full_flow_with_unequal_image_sizes() {
    let app = TestApp::new();
    let token = app.token_for(users::ALICE);

    // 100x100, 50x200 and 80x80 inputs: the canvas is 100x200.
    let images = vec![
        fixtures::png_image_b64(100, 100, [255, 0, 0, 255]),
        fixtures::png_image_b64(50, 200, [0, 255, 0, 255]),
        fixtures::png_image_b64(80, 80, [0, 0, 255, 255]),
    ];
    let body = fixtures::generate_body_with(&images, 300, 3, 50);

    let response = app.generate(Some(&token), &body).await;
    common::assert_ok(&response);

    let json: serde_json::Value = response.json();
    let gif_bytes = BASE64.decode(json["gif"].as_str().unwrap()).unwrap();

    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options.read_info(Cursor::new(&gif_bytes[..])).unwrap();
    assert_eq!((decoder.width(), decoder.height()), (100, 200));

    let mut delays = Vec::new();
    while let Some(frame) = decoder.read_next_frame().unwrap() {
        assert_eq!(frame.dispose, gif::DisposalMethod::Background);
        delays.push(frame.delay);
    }

    // 3 inputs, 3 fades per transition: 1 + 2 * (3 + 1) = 9 frames.
    assert_eq!(delays, vec![30, 5, 5, 5, 30, 5, 5, 5, 30]);

    // A second request inside the window is rejected.
    let second = app.generate(Some(&token), &body).await;
    common::assert_error_contains(
        &second,
        StatusCode::TOO_MANY_REQUESTS,
        "Rate limit exceeded",
    );
}

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]


use fake_vendor::{FakeVendor, FRAME_MEDIA_ID, TOKEN};
use ydapp_core::error::YdError;
use ydapp_core::protocol::message::{ExLinkEntry, Message, MpNewsEntry};
use ydapp_core::protocol::payload::MediaType;

#[tokio::test]
async fn get_token_fills_session() {
    let vendor = FakeVendor::new();
    let client = vendor.client();

    assert_eq!(client.session().access_token().await, "");

    let (token, expire_in) = client.get_token().await.expect("token");
    assert_eq!(token, TOKEN);
    assert_eq!(expire_in, 7200);
    assert_eq!(client.session().access_token().await, TOKEN);

    let stored = client.session().token().await.expect("stored token");
    assert!(!stored.is_expired());
}

#[tokio::test]
async fn upload_then_download_returns_same_bytes() {
    let vendor = FakeVendor::new();
    let client = vendor.client();
    client.get_token().await.unwrap();

    let data: Vec<u8> = (0u8..10).collect();
    let media_id = client
        .upload(MediaType::File, "ten.bin", &data)
        .await
        .expect("upload");

    let stored = vendor.media();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].1.media_type, "file");
    assert_eq!(stored[0].1.name, "ten.bin");

    let back = client.download(&media_id).await.expect("download");
    assert_eq!(&back[..], &data[..]);
}

#[tokio::test]
async fn download_to_creates_missing_dirs() {
    let vendor = FakeVendor::new();
    let client = vendor.client();
    client.get_token().await.unwrap();

    let media_id = client
        .upload(MediaType::Image, "pic.png", b"not really a png")
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nested/deeper/pic.png");
    client.download_to(&media_id, &target).await.expect("save");

    assert_eq!(std::fs::read(&target).unwrap(), b"not really a png");
}

#[tokio::test]
async fn download_of_unknown_media_surfaces_api_error() {
    let vendor = FakeVendor::new();
    let client = vendor.client();
    client.get_token().await.unwrap();

    let err = client.download("m-404").await.expect_err("must fail");
    match err {
        YdError::Api { code, .. } => assert_eq!(code, 40404),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn download_answered_with_success_frame_is_protocol_error() {
    let vendor = FakeVendor::new();
    let client = vendor.client();
    client.get_token().await.unwrap();

    let err = client.download(FRAME_MEDIA_ID).await.expect_err("must fail");
    match err {
        YdError::Protocol(msg) => assert!(msg.contains("not media"), "msg={msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn search_file_reports_name_and_size() {
    let vendor = FakeVendor::new();
    let client = vendor.client();
    client.get_token().await.unwrap();

    let media_id = client
        .upload(MediaType::File, "report.pdf", &[7u8; 42])
        .await
        .unwrap();
    let info = client.search_file(&media_id).await.expect("search");
    assert_eq!(info.name, "report.pdf");
    assert_eq!(info.size, 42);
}

#[tokio::test]
async fn send_text_posts_typed_body() {
    let vendor = FakeVendor::new();
    let client = vendor.client();
    client.get_token().await.unwrap();

    client.send_text("u1|u2", "", "hi").await.expect("send");

    let sent = vendor.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["toUser"], "u1|u2");
    assert_eq!(sent[0]["toDept"], "");
    assert_eq!(sent[0]["msgType"], "text");
    assert_eq!(sent[0]["text"]["content"], "hi");
}

#[tokio::test]
async fn mpnews_cover_is_uploaded_before_send() {
    let vendor = FakeVendor::new();
    let client = vendor.client();
    client.get_token().await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let cover = dir.path().join("cover.jpg");
    std::fs::write(&cover, b"jpeg bytes").unwrap();

    let entries = vec![
        MpNewsEntry {
            title: "first".into(),
            path: Some(cover.clone()),
            show_front: 1,
            ..Default::default()
        },
        MpNewsEntry {
            title: "second".into(),
            media_id: "preset".into(),
            ..Default::default()
        },
    ];
    client
        .send("u1", "", Message::MpNews(entries))
        .await
        .expect("send");

    let media = vendor.media();
    assert_eq!(media.len(), 1);
    let (uploaded_id, stored) = &media[0];
    assert_eq!(stored.name, "MpNews.jpg");
    assert_eq!(stored.media_type, "image");
    assert_eq!(stored.data, b"jpeg bytes");

    let sent = vendor.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["msgType"], "mpnews");
    let list = sent[0]["MpNews"].as_array().unwrap();
    assert_eq!(list[0]["media_id"], uploaded_id.as_str());
    assert_eq!(list[0]["showFront"], 1);
    assert_eq!(list[1]["media_id"], "preset");
    assert!(list[0].get("path").is_none());
}

#[tokio::test]
async fn missing_cover_aborts_without_sending() {
    let vendor = FakeVendor::new();
    let client = vendor.client();
    client.get_token().await.unwrap();

    let entries = vec![ExLinkEntry {
        title: "link".into(),
        url: "https://example.com".into(),
        ..Default::default()
    }];
    let err = client
        .send_exlink("u1", "", entries)
        .await
        .expect_err("must fail");
    assert_eq!(err.kind().as_str(), "IO");

    assert!(vendor.sent().is_empty());
    assert!(vendor.media().is_empty());
}

#[tokio::test]
async fn unreadable_cover_aborts_batch() {
    let vendor = FakeVendor::new();
    let client = vendor.client();
    client.get_token().await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.jpg");
    std::fs::write(&good, b"ok").unwrap();

    let entries = vec![
        ExLinkEntry {
            title: "a".into(),
            path: Some(good),
            ..Default::default()
        },
        ExLinkEntry {
            title: "b".into(),
            path: Some(dir.path().join("missing.jpg")),
            ..Default::default()
        },
    ];
    let err = client.send_exlink("u1", "", entries).await.expect_err("must fail");
    assert_eq!(err.kind().as_str(), "IO");
    assert!(vendor.sent().is_empty());
}

#[tokio::test]
async fn call_without_token_gets_api_error() {
    let vendor = FakeVendor::new();
    let client = vendor.client();

    let err = client.send_text("u1", "", "hi").await.expect_err("must fail");
    match err {
        YdError::Api { code, msg } => {
            assert_eq!(code, 40001);
            assert_eq!(msg, "bad token");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(vendor.sent().is_empty());
}

#[tokio::test]
async fn user_lookup_decodes_record() {
    let vendor = FakeVendor::new();
    let client = vendor.client();
    client.get_token().await.unwrap();

    let user = client.get_user_info("alice").await.expect("user");
    assert_eq!(user.user_id, "alice");
    assert_eq!(user.name, "Alice");
    assert_eq!(user.gender, 1);
    assert_eq!(user.dept_ids, vec![1, 7]);
    assert_eq!(user.dept_detail.len(), 1);
    assert_eq!(user.dept_detail[0].position, "engineer");
    assert_eq!(user.phone, "");

    let err = client.get_user_info("nobody").await.expect_err("must fail");
    assert_eq!(err.kind().as_str(), "API");
}

#[tokio::test]
async fn non_2xx_is_http_status_error() {
    let vendor = FakeVendor::new();
    let client = vendor.client();
    vendor.fail_with(500);

    let err = client.get_token().await.expect_err("must fail");
    match err {
        YdError::HttpStatus { status } => assert_eq!(status, 500),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(client.session().access_token().await, "");
}

#[tokio::test]
async fn path_helpers_upload_then_send() {
    let vendor = FakeVendor::new();
    let client = vendor.client();
    client.get_token().await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let pic = dir.path().join("photo.png");
    let doc = dir.path().join("local-name.txt");
    std::fs::write(&pic, b"png").unwrap();
    std::fs::write(&doc, b"text").unwrap();

    client.send_image_path("u1", "", &pic).await.expect("image");
    client
        .send_file_path("u1", "d9", "notes.txt", &doc)
        .await
        .expect("file");

    let media = vendor.media();
    assert_eq!(media.len(), 2);
    assert_eq!(media[0].1.name, "photo.png");
    assert_eq!(media[0].1.media_type, "image");
    assert_eq!(media[1].1.name, "notes.txt");
    assert_eq!(media[1].1.media_type, "file");

    let sent = vendor.sent();
    assert_eq!(sent[0]["msgType"], "image");
    assert_eq!(sent[0]["image"]["media_id"], media[0].0.as_str());
    assert_eq!(sent[1]["msgType"], "file");
    assert_eq!(sent[1]["toDept"], "d9");
    assert_eq!(sent[1]["file"]["media_id"], media[1].0.as_str());
}

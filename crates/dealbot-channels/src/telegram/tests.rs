use super::polling::to_incoming;
use super::send::split_message;
use super::types::{TgResponse, TgUpdate};
use super::*;
use dealbot_core::{error::BotError, message::OutgoingMessage, traits::Channel};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn channel_for(server: &MockServer) -> TelegramChannel {
    let config = TelegramConfig {
        bot_token: "TEST".to_string(),
        api_url: server.base_url(),
    };
    TelegramChannel::new(&config)
}

#[test]
fn test_split_short_message() {
    let chunks = split_message("hello", 4096);
    assert_eq!(chunks, vec!["hello"]);
}

#[test]
fn test_split_long_message() {
    let text = "a\n".repeat(3000);
    let chunks = split_message(&text, 4096);
    assert!(chunks.len() >= 2);
    for chunk in &chunks {
        assert!(chunk.len() <= 4096);
    }
    assert_eq!(chunks.concat(), text);
}

#[test]
fn test_split_respects_char_boundaries() {
    let text = "é".repeat(3000);
    let chunks = split_message(&text, 4095);
    assert_eq!(chunks.concat(), text);
}

#[test]
fn test_base_url_includes_token() {
    let config = TelegramConfig {
        bot_token: "123:abc".to_string(),
        ..Default::default()
    };
    let channel = TelegramChannel::new(&config);
    assert_eq!(channel.base_url, "https://api.telegram.org/bot123:abc");
}

#[test]
fn test_text_update_becomes_incoming() {
    let update: TgUpdate = serde_json::from_value(json!({
        "update_id": 10,
        "message": {
            "message_id": 1,
            "from": {"id": 555, "first_name": "Sam", "username": "sam"},
            "chat": {"id": 900, "type": "private"},
            "text": "/search wireless earbuds"
        }
    }))
    .unwrap();
    let msg = to_incoming(update).unwrap();
    assert_eq!(msg.channel, "telegram");
    assert_eq!(msg.sender_id, 555);
    assert_eq!(msg.reply_target, 900);
    assert_eq!(msg.sender_name.as_deref(), Some("@sam"));
    assert_eq!(msg.text, "/search wireless earbuds");
}

#[test]
fn test_sender_name_falls_back_to_full_name() {
    let update: TgUpdate = serde_json::from_value(json!({
        "update_id": 11,
        "message": {
            "message_id": 2,
            "from": {"id": 1, "first_name": "Ada", "last_name": "L"},
            "chat": {"id": 1},
            "text": "/start"
        }
    }))
    .unwrap();
    let msg = to_incoming(update).unwrap();
    assert_eq!(msg.sender_name.as_deref(), Some("Ada L"));
}

#[test]
fn test_non_text_update_skipped() {
    let update: TgUpdate = serde_json::from_value(json!({
        "update_id": 12,
        "message": {
            "message_id": 3,
            "from": {"id": 1, "first_name": "Ada"},
            "chat": {"id": 1},
            "sticker": {"file_id": "x"}
        }
    }))
    .unwrap();
    assert!(to_incoming(update).is_none());
}

#[test]
fn test_update_without_sender_skipped() {
    let update: TgUpdate = serde_json::from_value(json!({
        "update_id": 13,
        "message": {"message_id": 4, "chat": {"id": 1}, "text": "hi"}
    }))
    .unwrap();
    assert!(to_incoming(update).is_none());
}

#[test]
fn test_error_response_parses() {
    let resp: TgResponse<Vec<TgUpdate>> =
        serde_json::from_str(r#"{"ok": false, "description": "Unauthorized"}"#).unwrap();
    assert!(!resp.ok);
    assert!(resp.result.is_none());
    assert_eq!(resp.description.as_deref(), Some("Unauthorized"));
}

#[tokio::test]
async fn test_send_disables_link_preview() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/botTEST/sendMessage").json_body(json!({
                "chat_id": 42,
                "text": "hello",
                "parse_mode": "Markdown",
                "disable_web_page_preview": true,
            }));
            then.status(200).json_body(json!({"ok": true}));
        })
        .await;

    let channel = channel_for(&server);
    channel
        .send(OutgoingMessage {
            text: "hello".to_string(),
            reply_target: 42,
            disable_preview: true,
        })
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_send_retries_plain_on_markdown_error() {
    let server = MockServer::start_async().await;
    let markdown = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/botTEST/sendMessage")
                .body_contains("parse_mode");
            then.status(400)
                .body(r#"{"ok":false,"description":"Bad Request: can't parse entities"}"#);
        })
        .await;
    let plain = server
        .mock_async(|when, then| {
            when.method(POST).path("/botTEST/sendMessage").json_body(json!({
                "chat_id": 42,
                "text": "my_tag",
                "disable_web_page_preview": true,
            }));
            then.status(200).json_body(json!({"ok": true}));
        })
        .await;

    let channel = channel_for(&server);
    channel.send_message(42, "my_tag", true).await.unwrap();
    markdown.assert_async().await;
    plain.assert_async().await;
}

#[tokio::test]
async fn test_send_fails_when_plain_resend_rejected() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/botTEST/sendMessage");
            then.status(400)
                .body(r#"{"ok":false,"description":"Bad Request: can't parse entities"}"#);
        })
        .await;

    let channel = channel_for(&server);
    let err = channel.send_message(42, "my_tag", true).await.unwrap_err();
    assert!(matches!(err, BotError::Channel(ref m) if m.contains("plain")));
    mock.assert_hits_async(2).await;
}

#[tokio::test]
async fn test_send_fails_on_rejected_message() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/botTEST/sendMessage");
            then.status(403)
                .body(r#"{"ok":false,"description":"Forbidden: bot was blocked by the user"}"#);
        })
        .await;

    let channel = channel_for(&server);
    let err = channel
        .send(OutgoingMessage {
            text: "hello".to_string(),
            reply_target: 42,
            disable_preview: true,
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("bot was blocked"));
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_start_registers_menu_and_yields_messages() {
    let server = MockServer::start_async().await;
    let menu_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/botTEST/setMyCommands")
                .body_contains("mytracks");
            then.status(200).json_body(json!({"ok": true, "result": true}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/botTEST/getUpdates");
            then.status(200).json_body(json!({
                "ok": true,
                "result": [{
                    "update_id": 100,
                    "message": {
                        "message_id": 1,
                        "from": {"id": 7, "first_name": "Kim"},
                        "chat": {"id": 70},
                        "text": "/mytracks"
                    }
                }]
            }));
        })
        .await;

    let channel = channel_for(&server).with_menu(vec![MenuCommand {
        command: "mytracks".to_string(),
        description: "List tracked products".to_string(),
    }]);
    let mut rx = channel.start().await.unwrap();
    let msg = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(msg.text, "/mytracks");
    assert_eq!(msg.sender_id, 7);
    assert_eq!(msg.reply_target, 70);
    menu_mock.assert_async().await;
}

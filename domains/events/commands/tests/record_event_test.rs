use std::sync::Arc;

use events_commands::{RecordEventCommand, RecordEventHandler};
use events_errors::EventError;
use test_utils::*;

fn setup_handler() -> (Arc<InMemoryEventDao>, RecordEventHandler) {
    let dao = Arc::new(InMemoryEventDao::new());
    let handler = RecordEventHandler::new(dao.clone());
    (dao, handler)
}

fn command_json(body: serde_json::Value) -> RecordEventCommand {
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn test_record_event_success() {
    let (dao, handler) = setup_handler();

    let command = command_json(serde_json::json!({
        "type": "page_view",
        "visitor": "3b241101-e2bb-4255-8caf-4136c566a962",
        "metadata": tag_metadata("SITE-42"),
        "timestamp": "2024-05-01T10:00:00.000Z"
    }));

    let result = handler.execute(command).await.unwrap();

    assert_eq!(result.event.event_type, "page_view");
    assert_eq!(result.event.timestamp, "2024-05-01T10:00:00.000Z");
    assert_eq!(dao.len(), 1);
    assert_eq!(dao.rows()[0].metadata, r#"{"tagId":"SITE-42"}"#);
}

#[tokio::test]
async fn test_record_event_missing_visitor_writes_nothing() {
    let (dao, handler) = setup_handler();

    let command = command_json(serde_json::json!({
        "type": "page_view",
        "metadata": "{}",
        "timestamp": "2024-05-01T10:00:00.000Z"
    }));

    let result = handler.execute(command).await;

    assert!(matches!(result, Err(EventError::InvalidEvent(_))));
    assert!(dao.is_empty());
}

#[tokio::test]
async fn test_record_event_duplicates_are_kept() {
    let (dao, handler) = setup_handler();

    let body = serde_json::json!({
        "type": "element_click",
        "visitor": "v-1",
        "metadata": tag_metadata("ABC"),
        "timestamp": "2024-05-01T10:00:00.000Z"
    });

    handler.execute(command_json(body.clone())).await.unwrap();
    handler.execute(command_json(body)).await.unwrap();

    assert_eq!(dao.len(), 2);
}

#[tokio::test]
async fn test_record_event_store_failure_surfaces() {
    let dao = Arc::new(InMemoryEventDao::failing());
    let handler = RecordEventHandler::new(dao.clone());

    let command = command_json(serde_json::json!({
        "type": "page_view",
        "visitor": "v-1",
    }));

    let err = handler.execute(command).await.unwrap_err();
    assert!(!err.is_client_error());
}

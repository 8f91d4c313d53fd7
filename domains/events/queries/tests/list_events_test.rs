use std::sync::Arc;

use database_traits::dao::GenericDao;
use events_queries::{ListEventsQuery, ListEventsQueryHandler};
use test_utils::*;

async fn setup_test_handler() -> (Arc<InMemoryEventDao>, ListEventsQueryHandler)
{
    let dao = Arc::new(InMemoryEventDao::new());
    let handler = ListEventsQueryHandler::new(dao.clone());
    (dao, handler)
}

fn query(tag_id: Option<&str>, event_type: Option<&str>) -> ListEventsQuery {
    ListEventsQuery {
        tag_id: tag_id.map(str::to_string),
        event_type: event_type.map(str::to_string),
    }
}

#[tokio::test]
async fn test_list_events_by_tag() {
    let (dao, handler) = setup_test_handler().await;

    dao.create(tagged_event("page_view", "ABC", 0)).await.unwrap();
    dao.create(tagged_event("page_view", "XYZ", 1)).await.unwrap();
    dao.create(tagged_event("element_click", "ABC", 2)).await.unwrap();

    let result = handler.execute(query(Some("ABC"), None)).await.unwrap();

    assert_eq!(result.len(), 2);
    for event in result {
        assert!(event.metadata.contains(r#""tagId":"ABC""#));
    }
}

#[tokio::test]
async fn test_list_events_by_type_and_combined() {
    let (dao, handler) = setup_test_handler().await;

    dao.create(tagged_event("page_view", "ABC", 0)).await.unwrap();
    dao.create(tagged_event("page_view", "XYZ", 1)).await.unwrap();
    dao.create(tagged_event("element_click", "ABC", 2)).await.unwrap();

    let by_type = handler
        .execute(query(None, Some("page_view")))
        .await
        .unwrap();
    assert_eq!(by_type.len(), 2);
    assert!(by_type.iter().all(|e| e.event_type == "page_view"));

    let both = handler
        .execute(query(Some("ABC"), Some("page_view")))
        .await
        .unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].event_type, "page_view");
    assert!(both[0].metadata.contains("ABC"));
}

#[tokio::test]
async fn test_list_events_empty_strings_mean_no_filter() {
    let (dao, handler) = setup_test_handler().await;

    dao.create(tagged_event("page_view", "ABC", 0)).await.unwrap();
    dao.create(tagged_event("form_submit", "XYZ", 1)).await.unwrap();

    let result = handler.execute(query(Some(""), Some(""))).await.unwrap();
    assert_eq!(result.len(), 2);
}

#[tokio::test]
async fn test_list_events_caps_at_fifty_newest() {
    let (dao, handler) = setup_test_handler().await;

    for i in 0..60 {
        dao.create(tagged_event("page_view", "ABC", i)).await.unwrap();
    }

    let result = handler.execute(ListEventsQuery::default()).await.unwrap();

    assert_eq!(result.len(), 50);
    assert_eq!(result[0].timestamp, "2024-05-01T10:00:59.000Z");
    assert_eq!(result[49].timestamp, "2024-05-01T10:00:10.000Z");
}

#[tokio::test]
async fn test_list_events_no_match_is_empty() {
    let (dao, handler) = setup_test_handler().await;

    dao.create(tagged_event("page_view", "ABC", 0)).await.unwrap();

    let result = handler
        .execute(query(Some("NOPE"), None))
        .await
        .unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_list_events_store_failure() {
    let dao = Arc::new(InMemoryEventDao::failing());
    let handler = ListEventsQueryHandler::new(dao);

    assert!(handler.execute(ListEventsQuery::default()).await.is_err());
}

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use database_traits::dao::GenericDao;

#[derive(Debug, Clone, PartialEq)]
struct Note {
    body: String,
}

#[derive(Debug, Clone, PartialEq)]
struct NoteResponse {
    body: String,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self { Self { body: note.body } }
}

#[derive(Debug, thiserror::Error)]
enum MockError {
    #[error("Store unavailable")]
    Unavailable,
}

#[derive(Default)]
struct MockDao {
    rows: Mutex<Vec<Note>>,
    broken: bool,
}

#[async_trait]
impl GenericDao for MockDao {
    type CreateRequest = String;
    type Error = MockError;
    type Filter = Option<String>;
    type Model = Note;
    type Response = NoteResponse;

    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Response, Self::Error> {
        if self.broken {
            return Err(MockError::Unavailable);
        }
        let note = Note { body: req };
        self.rows.lock().unwrap().push(note.clone());
        Ok(note.into())
    }

    async fn find_with_filters(
        &self, filter: Self::Filter,
    ) -> Result<Vec<Self::Response>, Self::Error> {
        if self.broken {
            return Err(MockError::Unavailable);
        }
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|note| {
                filter.as_deref().is_none_or(|needle| note.body.contains(needle))
            })
            .cloned()
            .map(Into::into)
            .collect())
    }
}

#[tokio::test]
async fn test_dao_usable_as_trait_object() {
    let dao: Arc<
        dyn GenericDao<
                CreateRequest = String,
                Error = MockError,
                Filter = Option<String>,
                Model = Note,
                Response = NoteResponse,
            >,
    > = Arc::new(MockDao::default());

    dao.create("first note".to_string()).await.unwrap();
    dao.create("second note".to_string()).await.unwrap();
    dao.create("first again".to_string()).await.unwrap();

    let all = dao.find_with_filters(None).await.unwrap();
    assert_eq!(all.len(), 3);

    let firsts = dao
        .find_with_filters(Some("first".to_string()))
        .await
        .unwrap();
    assert_eq!(firsts.len(), 2);
}

#[tokio::test]
async fn test_dao_errors_propagate() {
    let dao = MockDao {
        broken: true,
        ..Default::default()
    };

    assert!(matches!(
        dao.create("note".to_string()).await,
        Err(MockError::Unavailable)
    ));
    assert!(dao.find_with_filters(None).await.is_err());
}

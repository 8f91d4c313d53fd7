use async_trait::async_trait;

/// Data access for append-only stores: rows are created and read back, never
/// updated or deleted.
#[async_trait]
pub trait GenericDao: Send + Sync {
    type Model: Send + Sync + 'static;
    type Response: From<Self::Model> + Send + Sync + 'static;
    type CreateRequest: Send + Sync + 'static;
    type Filter: Send + Sync + 'static;
    type Error: Send + 'static;

    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Response, Self::Error>;

    async fn find_with_filters(
        &self, filter: Self::Filter,
    ) -> Result<Vec<Self::Response>, Self::Error>;
}

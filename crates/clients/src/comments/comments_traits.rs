use async_trait::async_trait;
use portal_core::ServiceResult;

use super::comments_model::{EntityComment, EntityCommentQuery};
use crate::errors::Result;

/// Transport-level comment calls. May fail.
#[async_trait]
pub trait EntityCommentApi: Send + Sync {
    async fn get_entity_comments(
        &self,
        query: &EntityCommentQuery,
    ) -> Result<ServiceResult<Vec<EntityComment>>>;
    async fn count_entity_comments(&self, query: &EntityCommentQuery) -> Result<ServiceResult<u64>>;
}

/// Comment calls as seen by views. Never fails; see `Resilient`.
#[async_trait]
pub trait EntityCommentServiceTrait: Send + Sync {
    async fn get_entity_comments(&self, query: &EntityCommentQuery) -> ServiceResult<Vec<EntityComment>>;
    async fn count_entity_comments(&self, query: &EntityCommentQuery) -> ServiceResult<u64>;
}

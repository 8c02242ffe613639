//! Entity comment service - comments attached to business entities.

mod comments_model;
mod comments_traits;

pub use comments_model::{EntityComment, EntityCommentQuery};
pub use comments_traits::{EntityCommentApi, EntityCommentServiceTrait};

use async_trait::async_trait;
use portal_core::ServiceResult;

use crate::client::HttpServiceClient;
use crate::errors::Result;
use crate::resilient::Resilient;

pub const GET_ENTITY_COMMENTS_PATH: &str = "/api/entityCommentService/getEntityComments";
pub const COUNT_ENTITY_COMMENTS_PATH: &str = "/api/entityCommentService/countEntityComments";

#[async_trait]
impl EntityCommentApi for HttpServiceClient {
    async fn get_entity_comments(
        &self,
        query: &EntityCommentQuery,
    ) -> Result<ServiceResult<Vec<EntityComment>>> {
        self.post(GET_ENTITY_COMMENTS_PATH, query).await
    }

    async fn count_entity_comments(&self, query: &EntityCommentQuery) -> Result<ServiceResult<u64>> {
        self.post(COUNT_ENTITY_COMMENTS_PATH, query).await
    }
}

#[async_trait]
impl<C: EntityCommentApi> EntityCommentServiceTrait for Resilient<C> {
    async fn get_entity_comments(&self, query: &EntityCommentQuery) -> ServiceResult<Vec<EntityComment>> {
        self.call("getEntityComments", self.inner().get_entity_comments(query))
            .await
    }

    async fn count_entity_comments(&self, query: &EntityCommentQuery) -> ServiceResult<u64> {
        self.call("countEntityComments", self.inner().count_entity_comments(query))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit_breaker::CircuitBreakerConfig;
    use crate::resilient::mock::MockTransport;
    use chrono::Utc;

    #[async_trait]
    impl EntityCommentApi for MockTransport {
        async fn get_entity_comments(
            &self,
            query: &EntityCommentQuery,
        ) -> Result<ServiceResult<Vec<EntityComment>>> {
            self.respond(ServiceResult::ok(vec![EntityComment {
                id: "c1".to_string(),
                entity_type: query.entity_type.clone(),
                entity_id: query.entity_id.clone(),
                author: "alice".to_string(),
                text: "Looks good".to_string(),
                created_at: Utc::now(),
            }]))
        }

        async fn count_entity_comments(
            &self,
            _query: &EntityCommentQuery,
        ) -> Result<ServiceResult<u64>> {
            self.respond(ServiceResult::ok(1))
        }
    }

    fn query() -> EntityCommentQuery {
        EntityCommentQuery::new("order", "42")
    }

    #[tokio::test]
    async fn healthy_backend_returns_payload() {
        let service = Resilient::new(
            "entityCommentService",
            MockTransport::default(),
            CircuitBreakerConfig::default(),
        );
        let result = service.get_entity_comments(&query()).await;
        assert!(result.success);
        assert_eq!(result.payload.len(), 1);
        assert_eq!(result.payload[0].entity_id, "42");
    }

    #[tokio::test]
    async fn failing_backend_falls_back_to_empty_list_and_zero() {
        let service = Resilient::new(
            "entityCommentService",
            MockTransport::failing(),
            CircuitBreakerConfig::default(),
        );

        let comments = service.get_entity_comments(&query()).await;
        assert!(!comments.success);
        assert!(comments.message.is_some());
        assert!(comments.payload.is_empty());

        let count = service.count_entity_comments(&query()).await;
        assert!(!count.success);
        assert!(count.message.is_some());
        assert_eq!(count.payload, 0);
    }

    #[tokio::test]
    async fn unreachable_http_backend_falls_back() {
        // Nothing listens on the discard port.
        let client = HttpServiceClient::new("http://127.0.0.1:9", None, None).unwrap();
        let service = Resilient::new("entityCommentService", client, CircuitBreakerConfig::default());
        let result = service.get_entity_comments(&query()).await;
        assert!(!result.success);
        assert!(result
            .message
            .unwrap()
            .starts_with("entityCommentService.getEntityComments failed"));
        assert!(result.payload.is_empty());
    }
}

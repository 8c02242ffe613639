//! Notification service - pending notifications for a user.

use async_trait::async_trait;
use portal_core::notifications::Notification;
use portal_core::ServiceResult;
use serde::{Deserialize, Serialize};

use crate::client::HttpServiceClient;
use crate::errors::Result;
use crate::resilient::Resilient;

pub const GET_USER_NOTIFICATIONS_PATH: &str = "/api/notificationService/getUserNotifications";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    pub username: String,
    #[serde(default)]
    pub only_unread: bool,
}

#[async_trait]
pub trait UserNotificationApi: Send + Sync {
    async fn get_user_notifications(
        &self,
        query: &NotificationQuery,
    ) -> Result<ServiceResult<Vec<Notification>>>;
}

#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    async fn get_user_notifications(&self, query: &NotificationQuery) -> ServiceResult<Vec<Notification>>;
}

#[async_trait]
impl UserNotificationApi for HttpServiceClient {
    async fn get_user_notifications(
        &self,
        query: &NotificationQuery,
    ) -> Result<ServiceResult<Vec<Notification>>> {
        self.post(GET_USER_NOTIFICATIONS_PATH, query).await
    }
}

#[async_trait]
impl<C: UserNotificationApi> NotificationServiceTrait for Resilient<C> {
    async fn get_user_notifications(&self, query: &NotificationQuery) -> ServiceResult<Vec<Notification>> {
        self.call("getUserNotifications", self.inner().get_user_notifications(query))
            .await
    }
}

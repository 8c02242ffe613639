//! Security user service, served by the UAA backend.

use async_trait::async_trait;
use portal_core::ServiceResult;
use serde::{Deserialize, Serialize};

use crate::client::HttpServiceClient;
use crate::errors::Result;
use crate::resilient::Resilient;

pub const GET_SECURITY_USER_BY_USERNAME_PATH: &str = "/uaa/securityUser/getSecurityUserByUsername";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityUserQuery {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityUser {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

#[async_trait]
pub trait SecurityUserApi: Send + Sync {
    async fn get_security_user_by_username(
        &self,
        query: &SecurityUserQuery,
    ) -> Result<ServiceResult<Option<SecurityUser>>>;
}

#[async_trait]
pub trait SecurityUserServiceTrait: Send + Sync {
    async fn get_security_user_by_username(
        &self,
        query: &SecurityUserQuery,
    ) -> ServiceResult<Option<SecurityUser>>;
}

#[async_trait]
impl SecurityUserApi for HttpServiceClient {
    async fn get_security_user_by_username(
        &self,
        query: &SecurityUserQuery,
    ) -> Result<ServiceResult<Option<SecurityUser>>> {
        self.post(GET_SECURITY_USER_BY_USERNAME_PATH, query).await
    }
}

#[async_trait]
impl<C: SecurityUserApi> SecurityUserServiceTrait for Resilient<C> {
    async fn get_security_user_by_username(
        &self,
        query: &SecurityUserQuery,
    ) -> ServiceResult<Option<SecurityUser>> {
        self.call(
            "getSecurityUserByUsername",
            self.inner().get_security_user_by_username(query),
        )
        .await
    }
}

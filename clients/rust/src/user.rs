use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use user_service_api_structs::*;
use user_service_domain::ID;

/// Filter and pagination for listing users, unset fields are left out of
/// the query string.
#[derive(Debug, Default, Clone)]
pub struct ListUsersInput {
    pub name: Option<String>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

impl From<ListUsersInput> for get_users::QueryParams {
    fn from(input: ListUsersInput) -> Self {
        Self {
            name: input.name,
            min_age: input.min_age.map(|v| v.to_string()),
            max_age: input.max_age.map(|v| v.to_string()),
            limit: input.limit.map(|v| v.to_string()),
            page: input.page.map(|v| v.to_string()),
        }
    }
}

pub struct UserInput {
    pub name: String,
    pub age: u32,
}

impl From<UserInput> for UserBody {
    fn from(input: UserInput) -> Self {
        Self {
            name: input.name,
            age: input.age,
        }
    }
}

#[derive(Clone)]
pub struct UserClient {
    base: Arc<BaseClient>,
}

impl UserClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn list(&self, input: ListUsersInput) -> APIResponse<get_users::APIResponse> {
        let query: get_users::QueryParams = input.into();
        self.base
            .get_with_query(&query, "users".into(), StatusCode::OK)
            .await
    }

    pub async fn get(&self, user_id: &ID) -> APIResponse<get_user::APIResponse> {
        self.base
            .get(format!("users/{}", user_id), StatusCode::OK)
            .await
    }

    pub async fn create(&self, input: UserInput) -> APIResponse<create_user::APIResponse> {
        let body: create_user::RequestBody = input.into();
        self.base
            .post(body, "users".into(), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        user_id: &ID,
        input: UserInput,
    ) -> APIResponse<update_user::APIResponse> {
        let body: update_user::RequestBody = input.into();
        self.base
            .put(body, format!("users/{}", user_id), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, user_id: &ID) -> APIResponse<delete_user::APIResponse> {
        self.base
            .delete(format!("users/{}", user_id), StatusCode::OK)
            .await
    }
}

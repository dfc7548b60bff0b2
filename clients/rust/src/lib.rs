mod base;
mod status;
mod user;

pub use status::StatusClient;
use std::sync::Arc;
pub use user::UserClient;

pub use base::{APIError, APIResponse};
pub(crate) use base::BaseClient;
pub use reqwest::StatusCode;
pub use user::{ListUsersInput, UserInput};
pub use user_service_api_structs::dtos::UserDTO as User;
pub use user_service_domain::ID;

#[derive(Clone)]
pub struct UserServiceSDK {
    pub status: StatusClient,
    pub user: UserClient,
}

impl UserServiceSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let status = StatusClient::new(base.clone());
        let user = UserClient::new(base);

        Self { status, user }
    }
}

mod inmemory;
mod mongo;

pub use inmemory::InMemoryUserRepo;
pub use mongo::MongoUserRepo;

use super::shared::query_structs::{UpdateResult, UserFindQuery};
use user_service_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    /// Replaces the name and age of the stored user with the same id
    async fn save(&self, user: &User) -> anyhow::Result<UpdateResult>;
    async fn delete(&self, user_id: &ID) -> anyhow::Result<Option<User>>;
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>>;
    /// Users matching the query filter in insertion order, paginated
    async fn find_many(&self, query: &UserFindQuery) -> anyhow::Result<Vec<User>>;
}

use super::IUserRepo;
use crate::repos::shared::{
    inmemory_repo::*,
    query_structs::{UpdateResult, UserFindQuery},
};
use user_service_domain::{User, ID};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(vec![]),
        }
    }
}

impl Default for InMemoryUserRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users)
    }

    async fn save(&self, user: &User) -> anyhow::Result<UpdateResult> {
        let matched_count = update(&user.id, &self.users, |stored| {
            stored.name = user.name.clone();
            stored.age = user.age;
        })?;
        Ok(UpdateResult { matched_count })
    }

    async fn delete(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        delete(user_id, &self.users)
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        find(user_id, &self.users)
    }

    async fn find_many(&self, query: &UserFindQuery) -> anyhow::Result<Vec<User>> {
        find_page_by(&self.users, |u| query.matches(u), query.skip, query.limit)
    }
}

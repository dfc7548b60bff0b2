use user_service_domain::User;

pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Store independent description of a `User` listing: a filter plus
/// the pagination directive. Each store translates it into its own
/// native query.
#[derive(Debug, Clone, PartialEq)]
pub struct UserFindQuery {
    /// Case insensitive substring of the name
    pub name: Option<String>,
    /// Inclusive lower bound on age
    pub min_age: Option<u32>,
    /// Inclusive upper bound on age
    pub max_age: Option<u32>,
    pub skip: usize,
    pub limit: usize,
}

impl Default for UserFindQuery {
    fn default() -> Self {
        Self {
            name: None,
            min_age: None,
            max_age: None,
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl UserFindQuery {
    pub fn matches(&self, user: &User) -> bool {
        if let Some(name) = &self.name {
            if !user.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if matches!(self.min_age, Some(min_age) if user.age < min_age) {
            return false;
        }
        if matches!(self.max_age, Some(max_age) if user.age > max_age) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateResult {
    pub matched_count: u64,
}

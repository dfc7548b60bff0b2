use serde::{Deserialize, Serialize};
use user_service_domain::{User, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UserDTO {
    pub id: ID,
    pub name: String,
    pub age: u32,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
        }
    }
}

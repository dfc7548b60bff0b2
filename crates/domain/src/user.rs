use crate::shared::entity::{Entity, ID};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub age: u32,
}

impl User {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            age,
        }
    }

    /// Business rules a `User` has to satisfy before it is written to a store.
    /// Only the name is checked, the age is already a valid number once decoded.
    pub fn validate(&self) -> Result<(), InvalidUserError> {
        if self.name.trim().is_empty() {
            return Err(InvalidUserError::EmptyName);
        }
        Ok(())
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidUserError {
    #[error("name must not be empty")]
    EmptyName,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_accepts_user_with_name() {
        assert!(User::new("Victor", 21).validate().is_ok());
        assert!(User::new(" Arkady ", 0).validate().is_ok());
    }

    #[test]
    fn it_rejects_empty_or_blank_names() {
        for name in &["", " ", "\t\n  "] {
            let user = User::new(*name, 30);
            assert_eq!(user.validate(), Err(InvalidUserError::EmptyName));
        }
    }

    #[test]
    fn validation_message_is_stable() {
        assert_eq!(
            InvalidUserError::EmptyName.to_string(),
            "name must not be empty"
        );
    }
}

use serde::{de::Error, Deserialize, Deserializer, Serialize};
use user_service_domain::ID;

use crate::dtos::UserDTO;

pub type UserResponse = UserDTO;

#[derive(Deserialize)]
#[serde(untagged)]
enum AgeRepr {
    Number(u32),
    Text(String),
}

/// Ages are numbers, but older clients send them as
/// strings (`"21"`). Both forms are accepted, an empty string or a missing
/// value means `0`.
pub fn deserialize_age<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<AgeRepr>::deserialize(deserializer)? {
        None => Ok(0),
        Some(AgeRepr::Number(age)) => Ok(age),
        Some(AgeRepr::Text(age)) if age.trim().is_empty() => Ok(0),
        Some(AgeRepr::Text(age)) => age.trim().parse::<u32>().map_err(|_| {
            D::Error::custom(format!("age must be a non-negative integer, got: {}", age))
        }),
    }
}

/// Body shared by create and update. Any `id` sent by the client is ignored.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UserBody {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_age")]
    pub age: u32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserPathParams {
    pub user_id: ID,
}

pub mod get_users {
    use super::*;

    /// Raw query values, parsed and validated by the handler so that a bad
    /// value can be reported with the name of the offending parameter.
    #[derive(Debug, Default, Deserialize, Serialize)]
    pub struct QueryParams {
        pub name: Option<String>,
        pub min_age: Option<String>,
        pub max_age: Option<String>,
        pub limit: Option<String>,
        pub page: Option<String>,
    }

    pub type APIResponse = Vec<UserDTO>;
}

pub mod get_user {
    use super::*;

    pub type PathParams = UserPathParams;

    pub type APIResponse = UserResponse;
}

pub mod create_user {
    use super::*;

    pub type RequestBody = UserBody;

    pub type APIResponse = UserResponse;
}

pub mod update_user {
    use super::*;

    pub type RequestBody = UserBody;

    pub type PathParams = UserPathParams;

    pub type APIResponse = UserResponse;
}

pub mod delete_user {
    use super::*;

    pub type PathParams = UserPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub message: String,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(body: &str) -> Result<UserBody, serde_json::Error> {
        serde_json::from_str(body)
    }

    #[test]
    fn it_accepts_numeric_and_string_ages() {
        assert_eq!(parse(r#"{"name":"Victor","age":21}"#).unwrap().age, 21);
        assert_eq!(parse(r#"{"name":"Victor","age":"21"}"#).unwrap().age, 21);
        assert_eq!(parse(r#"{"name":"Victor","age":" 45 "}"#).unwrap().age, 45);
    }

    #[test]
    fn missing_or_empty_age_defaults_to_zero() {
        assert_eq!(parse(r#"{"name":"AAAA"}"#).unwrap().age, 0);
        assert_eq!(parse(r#"{"name":"AAAA","age":""}"#).unwrap().age, 0);
        assert_eq!(parse(r#"{"name":"AAAA","age":null}"#).unwrap().age, 0);
    }

    #[test]
    fn it_rejects_non_numeric_ages() {
        assert!(parse(r#"{"name":"Victor","age":"old"}"#).is_err());
        assert!(parse(r#"{"name":"Victor","age":-3}"#).is_err());
        assert!(parse(r#"{"name":"Victor","age":"-3"}"#).is_err());
        assert!(parse(r#"{"name":"Victor","age":2.5}"#).is_err());
    }

    #[test]
    fn it_ignores_client_supplied_id_and_defaults_name() {
        let body = parse(r#"{"id":"123","age":3}"#).unwrap();
        assert_eq!(body.name, "");
        assert_eq!(body.age, 3);
    }
}

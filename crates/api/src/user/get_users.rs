use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use std::fmt::Display;
use user_service_api_structs::dtos::UserDTO;
use user_service_api_structs::get_users::*;
use user_service_domain::User;
use user_service_infra::{ServiceContext, UserFindQuery, DEFAULT_PAGE_LIMIT};

#[derive(Debug, PartialEq)]
pub struct InvalidQueryParam {
    pub param: &'static str,
    pub value: String,
}

impl Display for InvalidQueryParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid value for {}: `{}`", self.param, self.value)
    }
}

impl From<InvalidQueryParam> for ApiError {
    fn from(e: InvalidQueryParam) -> Self {
        Self::InvalidParam(e.to_string())
    }
}

/// Empty values count as absent, like `?name=` or `?limit=`
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_positive(
    param: &'static str,
    value: &Option<String>,
    default: usize,
) -> Result<usize, InvalidQueryParam> {
    let raw = match present(value) {
        Some(raw) => raw,
        None => return Ok(default),
    };
    match raw.parse::<i64>() {
        Ok(parsed) if parsed > 0 => Ok(usize::try_from(parsed).unwrap_or(usize::MAX)),
        _ => Err(InvalidQueryParam {
            param,
            value: raw.to_string(),
        }),
    }
}

/// A bound is only applied when it is strictly positive, `0` and negative
/// values leave that side of the range open.
fn parse_age_bound(
    param: &'static str,
    value: &Option<String>,
) -> Result<Option<u32>, InvalidQueryParam> {
    let raw = match present(value) {
        Some(raw) => raw,
        None => return Ok(None),
    };
    match raw.parse::<i64>() {
        Ok(parsed) if parsed > 0 => Ok(Some(u32::try_from(parsed).unwrap_or(u32::MAX))),
        Ok(_) => Ok(None),
        Err(_) => Err(InvalidQueryParam {
            param,
            value: raw.to_string(),
        }),
    }
}

/// Translates the raw `GET /users` query into the filter and pagination
/// directive handed to the user store.
pub fn parse_query_params(params: &QueryParams) -> Result<UserFindQuery, InvalidQueryParam> {
    let limit = parse_positive("limit", &params.limit, DEFAULT_PAGE_LIMIT)?;
    let page = parse_positive("page", &params.page, 1)?;
    let min_age = parse_age_bound("min_age", &params.min_age)?;
    let max_age = parse_age_bound("max_age", &params.max_age)?;

    // Stores take the offset as an int64
    let skip = (page - 1)
        .checked_mul(limit)
        .filter(|skip| i64::try_from(*skip).is_ok())
        .ok_or_else(|| InvalidQueryParam {
            param: "page",
            value: present(&params.page).unwrap_or_default().to_string(),
        })?;

    Ok(UserFindQuery {
        name: present(&params.name).map(String::from),
        min_age,
        max_age,
        skip,
        limit,
    })
}

pub async fn get_users_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<ServiceContext>,
) -> Result<HttpResponse, ApiError> {
    let query = parse_query_params(&query_params)?;

    let usecase = GetUsersUseCase { query };

    execute(usecase, &ctx)
        .await
        .map(|usecase_res| {
            let users: APIResponse = usecase_res.users.into_iter().map(UserDTO::new).collect();
            HttpResponse::Ok().json(users)
        })
        .map_err(ApiError::from)
}

#[derive(Debug)]
struct GetUsersUseCase {
    query: UserFindQuery,
}

#[derive(Debug)]
struct UseCaseRes {
    pub users: Vec<User>,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError(anyhow::Error),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(_) => Self::StoreError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUsersUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "GetUsers";

    async fn execute(&mut self, ctx: &ServiceContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .users
            .find_many(&self.query)
            .await
            .map(|users| UseCaseRes { users })
            .map_err(UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        let mut params = QueryParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "name" => params.name = value,
                "min_age" => params.min_age = value,
                "max_age" => params.max_age = value,
                "limit" => params.limit = value,
                "page" => params.page = value,
                _ => unreachable!(),
            }
        }
        params
    }

    #[test]
    fn it_uses_defaults_without_params() {
        let query = parse_query_params(&QueryParams::default()).unwrap();
        assert_eq!(query, UserFindQuery::default());
        assert_eq!(query.limit, 10);
        assert_eq!(query.skip, 0);
    }

    #[test]
    fn it_computes_skip_from_page_and_limit() {
        let query = parse_query_params(&params(&[("limit", "5"), ("page", "3")])).unwrap();
        assert_eq!(query.limit, 5);
        assert_eq!(query.skip, 10);

        let query = parse_query_params(&params(&[("page", "2")])).unwrap();
        assert_eq!(query.skip, 10);
    }

    #[test]
    fn it_rejects_non_positive_or_non_integer_pagination() {
        for (key, value) in &[
            ("limit", "0"),
            ("limit", "-1"),
            ("limit", "ten"),
            ("page", "0"),
            ("page", "-2"),
            ("page", "1.5"),
        ] {
            let err = parse_query_params(&params(&[(*key, *value)])).unwrap_err();
            assert_eq!(err.param, *key);
            assert_eq!(err.value, *value);
        }
    }

    #[test]
    fn it_rejects_pages_past_the_int64_offset() {
        let huge = i64::MAX.to_string();
        let err = parse_query_params(&params(&[("page", huge.as_str())])).unwrap_err();
        assert_eq!(err.param, "page");
        assert_eq!(err.value, huge);

        let query =
            parse_query_params(&params(&[("page", huge.as_str()), ("limit", "1")])).unwrap();
        assert_eq!(query.skip as i64, i64::MAX - 1);
    }

    #[test]
    fn it_ignores_zero_and_negative_age_bounds() {
        let query =
            parse_query_params(&params(&[("min_age", "0"), ("max_age", "-4")])).unwrap();
        assert_eq!(query.min_age, None);
        assert_eq!(query.max_age, None);

        let query =
            parse_query_params(&params(&[("min_age", "18"), ("max_age", "30")])).unwrap();
        assert_eq!(query.min_age, Some(18));
        assert_eq!(query.max_age, Some(30));
    }

    #[test]
    fn it_rejects_non_integer_age_bounds() {
        let err = parse_query_params(&params(&[("min_age", "abc")])).unwrap_err();
        assert_eq!(err.param, "min_age");
        let err = parse_query_params(&params(&[("max_age", "4x")])).unwrap_err();
        assert_eq!(err.param, "max_age");
        assert_eq!(err.to_string(), "Invalid value for max_age: `4x`");
    }

    #[test]
    fn empty_values_are_treated_as_absent() {
        let query = parse_query_params(&params(&[
            ("name", ""),
            ("limit", ""),
            ("page", ""),
            ("min_age", ""),
        ]))
        .unwrap();
        assert_eq!(query, UserFindQuery::default());

        let query = parse_query_params(&params(&[("name", "vic")])).unwrap();
        assert_eq!(query.name, Some("vic".to_string()));
    }

    #[actix_web::main]
    #[test]
    async fn it_lists_users_from_the_store() {
        let ctx = ServiceContext::create_inmemory();
        let user = User::new("Victor", 21);
        ctx.repos.users.insert(&user).await.unwrap();

        let mut usecase = GetUsersUseCase {
            query: UserFindQuery::default(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.users, vec![user]);
    }
}

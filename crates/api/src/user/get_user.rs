use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use user_service_api_structs::dtos::UserDTO;
use user_service_api_structs::get_user::*;
use user_service_domain::{User, ID};
use user_service_infra::ServiceContext;

pub async fn get_user_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<ServiceContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetUserUseCase {
        user_id: path_params.into_inner().user_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|usecase_res| {
            let res: APIResponse = UserDTO::new(usecase_res.user);
            HttpResponse::Ok().json(res)
        })
        .map_err(ApiError::from)
}

#[derive(Debug)]
struct GetUserUseCase {
    user_id: ID,
}

#[derive(Debug)]
struct UseCaseRes {
    pub user: User,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError(anyhow::Error),
    UserNotFound(ID),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(_) => Self::StoreError,
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUser";

    async fn execute(&mut self, ctx: &ServiceContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.users.find(&self.user_id).await {
            Ok(Some(user)) => Ok(UseCaseRes { user }),
            Ok(None) => Err(UseCaseError::UserNotFound(self.user_id.clone())),
            Err(e) => Err(UseCaseError::StorageError(e)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn it_finds_stored_user() {
        let ctx = ServiceContext::create_inmemory();
        let user = User::new("Arkady", 45);
        ctx.repos.users.insert(&user).await.unwrap();

        let mut usecase = GetUserUseCase {
            user_id: user.id.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.user, user);
    }

    #[actix_web::main]
    #[test]
    async fn it_reports_missing_user() {
        let ctx = ServiceContext::create_inmemory();
        let user_id = ID::default();

        let mut usecase = GetUserUseCase {
            user_id: user_id.clone(),
        };
        let err = ApiError::from(usecase.execute(&ctx).await.unwrap_err());
        assert_eq!(
            err,
            ApiError::NotFound(format!("A user with id: {}, was not found.", user_id))
        );
    }
}

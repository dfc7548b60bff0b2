use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use user_service_api_structs::create_user::*;
use user_service_api_structs::dtos::UserDTO;
use user_service_domain::{InvalidUserError, User};
use user_service_infra::ServiceContext;

pub async fn create_user_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<ServiceContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let usecase = CreateUserUseCase {
        name: body.name,
        age: body.age,
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
pub struct CreateUserUseCase {
    pub name: String,
    pub age: u32,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError(anyhow::Error),
    InvalidUser(InvalidUserError),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(_) => Self::StoreError,
            UseCaseError::InvalidUser(e) => Self::ValidationFailed(e.to_string()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &ServiceContext) -> Result<Self::Response, Self::Error> {
        let user = User::new(self.name.clone(), self.age);
        user.validate().map_err(UseCaseError::InvalidUser)?;

        ctx.repos
            .users
            .insert(&user)
            .await
            .map(|_| UseCaseRes { user })
            .map_err(UseCaseError::StorageError)
    }
}

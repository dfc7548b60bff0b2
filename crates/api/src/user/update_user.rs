use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use user_service_api_structs::dtos::UserDTO;
use user_service_api_structs::update_user::*;
use user_service_domain::{InvalidUserError, User, ID};
use user_service_infra::ServiceContext;

pub async fn update_user_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ServiceContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let usecase = UpdateUserUseCase {
        user_id: path.into_inner().user_id,
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
pub struct UpdateUserUseCase {
    pub user_id: ID,
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
    UserNotFound(ID),
    InvalidUser(InvalidUserError),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(_) => Self::StoreError,
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
            UseCaseError::InvalidUser(e) => Self::ValidationFailed(e.to_string()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateUserUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateUser";

    async fn execute(&mut self, ctx: &ServiceContext) -> Result<Self::Response, Self::Error> {
        let user = User {
            id: self.user_id.clone(),
            name: self.name.clone(),
            age: self.age,
        };
        user.validate().map_err(UseCaseError::InvalidUser)?;

        match ctx.repos.users.save(&user).await {
            Ok(res) if res.matched_count == 0 => {
                Err(UseCaseError::UserNotFound(self.user_id.clone()))
            }
            Ok(_) => Ok(UseCaseRes { user }),
            Err(e) => Err(UseCaseError::StorageError(e)),
        }
    }
}

use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use user_service_api_structs::delete_user::*;
use user_service_domain::{User, ID};
use user_service_infra::ServiceContext;

pub async fn delete_user_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<ServiceContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = DeleteUserUseCase {
        user_id: path_params.into_inner().user_id,
    };
    execute(usecase, &ctx)
        .await
        .map(|_| {
            HttpResponse::Ok().json(APIResponse {
                message: "User deleted".into(),
            })
        })
        .map_err(|e| match e {
            UseCaseErrors::StorageError(_) => ApiError::StoreError,
            UseCaseErrors::UserNotFound(id) => {
                ApiError::NotFound(format!("A user with id: {}, was not found.", id))
            }
        })
}

#[derive(Debug)]
struct DeleteUserUseCase {
    user_id: ID,
}

#[derive(Debug)]
struct UseCaseRes {
    pub user: User,
}

#[derive(Debug)]
enum UseCaseErrors {
    StorageError(anyhow::Error),
    UserNotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteUserUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseErrors;

    const NAME: &'static str = "DeleteUser";

    async fn execute(&mut self, ctx: &ServiceContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.users.delete(&self.user_id).await {
            Ok(Some(user)) => Ok(UseCaseRes { user }),
            Ok(None) => Err(UseCaseErrors::UserNotFound(self.user_id.clone())),
            Err(e) => Err(UseCaseErrors::StorageError(e)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn it_deletes_user_once() {
        let ctx = ServiceContext::create_inmemory();
        let user = User::new("Arkady", 45);
        ctx.repos.users.insert(&user).await.unwrap();

        let mut usecase = DeleteUserUseCase {
            user_id: user.id.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.user, user);
        assert!(ctx.repos.users.find(&user.id).await.unwrap().is_none());

        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseErrors::UserNotFound(_))));
    }
}

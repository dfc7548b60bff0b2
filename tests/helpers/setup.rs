use user_service_api::Application;
use user_service_infra::ServiceContext;
use user_service_sdk::{User, UserInput, UserServiceSDK};

// Launch the application as a background task
pub async fn spawn_app() -> (UserServiceSDK, String) {
    let mut ctx = ServiceContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.workers = 1;

    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = UserServiceSDK::new(address.clone());
    (sdk, address)
}

pub async fn create_user(sdk: &UserServiceSDK, name: &str, age: u32) -> User {
    sdk.user
        .create(UserInput {
            name: name.into(),
            age,
        })
        .await
        .expect("Expected to create user")
}

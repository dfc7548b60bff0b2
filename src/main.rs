mod telemetry;

use telemetry::{get_subscriber, init_subscriber};
use user_service_api::Application;
use user_service_infra::setup_context;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("user_service".into(), "info".into());
    init_subscriber(subscriber)?;

    let context = setup_context().await?;

    let app = Application::new(context).await?;
    app.start().await?;
    Ok(())
}

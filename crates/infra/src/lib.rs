mod config;
mod repos;

pub use config::{Config, MongoConfig};
pub use repos::{IUserRepo, Repos, UpdateResult, UserFindQuery, DEFAULT_PAGE_LIMIT};
use tracing::info;
use user_service_domain::User;

#[derive(Clone)]
pub struct ServiceContext {
    pub repos: Repos,
    pub config: Config,
}

impl ServiceContext {
    /// Context backed by an empty inmemory store
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
        }
    }

    async fn create(config: Config, mongodb: &MongoConfig) -> anyhow::Result<Self> {
        let repos = Repos::create_mongodb(mongodb, config.store_timeout).await?;
        Ok(Self { repos, config })
    }
}

/// Users the inmemory store starts out with
pub fn demo_users() -> Vec<User> {
    vec![User::new("Victor", 21), User::new("Arkady", 45)]
}

async fn seed_users(ctx: &ServiceContext) -> anyhow::Result<()> {
    for user in demo_users() {
        ctx.repos.users.insert(&user).await?;
    }
    info!("Seeded the inmemory store with demo users.");
    Ok(())
}

/// Will setup the infrastructure context given the environment.
///
/// MongoDB is used when `MONGODB_CONNECTION_STRING` is set, unless the
/// process was started with the `inmemory` argument. Failing to reach
/// MongoDB is an error, there is no fallback to the inmemory store.
pub async fn setup_context() -> anyhow::Result<ServiceContext> {
    let config = Config::new();

    let args: Vec<_> = std::env::args().collect();
    // cargo run inmemory
    let inmemory_arg_set = args.len() > 1 && args[1].eq("inmemory");

    match config.mongodb.clone() {
        Some(mongodb) if !inmemory_arg_set => {
            info!(
                "Going to use mongodb database: {}, collection: {}.",
                mongodb.db_name, mongodb.collection
            );
            ServiceContext::create(config, &mongodb).await
        }
        _ => {
            info!("Going to use inmemory infra.");
            let ctx = ServiceContext::create_inmemory();
            if ctx.config.seed_users {
                seed_users(&ctx).await?;
            }
            Ok(ctx)
        }
    }
}

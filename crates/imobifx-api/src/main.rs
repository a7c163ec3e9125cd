use imobifx_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    // Initialize the application (database, storage, services, routes)
    let (_state, router) = imobifx_api::setup::initialize_app(config.clone()).await?;

    imobifx_api::setup::server::start_server(&config, router).await?;

    Ok(())
}

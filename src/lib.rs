pub mod app;
pub mod config;
pub mod constants;
pub mod errors;
pub mod host;
pub mod managers;
pub mod services;
pub mod transport;
pub mod utils;

pub async fn run() -> Result<(), errors::HookError> {
    let path = config::resolve_config_path()?;
    let config = config::Config::load(&path)?;
    let app = app::App::initialize(config)?;
    host::shell::run_stdio(&app).await
}

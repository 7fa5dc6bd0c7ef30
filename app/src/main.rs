use std::{env, error::Error, fs, net, sync::Arc};

use access_guide::AccessGuide;
use config::Config;
use exceptions::ExceptionRenderer;
use forum::{
    routes::{create_forum_endpoints, ForumContext},
    ConfigGuardian,
};
use http::server::{cancellation_token, HttpEndpointsServe, Server};
use templates::handlebars::HandlebarTemplateRenderer;
use tracing_subscriber::EnvFilter;

mod config;
mod data_formats;
mod exceptions;
mod forum;
mod guide;
mod http;
mod i18n;
mod templates;
mod users;

const CONFIG_PATH_DEFAULT: &str = "config.toml";

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| CONFIG_PATH_DEFAULT.into());
    let config = Config::from_toml(&fs::read_to_string(&config_path)?)?;
    tracing::info!(config_path = %config_path, "Loaded config");

    let catalog = Arc::new(config.create_catalog()?);
    let guardian = Arc::new(ConfigGuardian::new(catalog.clone()));
    let settings_provider = Arc::new(config.create_settings_provider());
    let access_guide = AccessGuide::new(
        Box::new(settings_provider),
        Box::new(catalog.clone()),
        Box::new(guardian.clone()),
    );
    let template_renderer = Arc::new(HandlebarTemplateRenderer::new(
        config.create_template_store(),
    ));
    let translator = Arc::new(config.create_translator()?);
    let exceptions = Arc::new(ExceptionRenderer::new(translator, template_renderer.clone()));
    let current_user_provider = Arc::new(config.create_current_user_provider()?);
    let context = ForumContext::new(
        access_guide,
        catalog,
        guardian,
        exceptions,
        current_user_provider,
        template_renderer,
    );
    let endpoints = create_forum_endpoints(Arc::new(context))?;

    let port = config.server().port();
    let listener = net::TcpListener::bind(("0.0.0.0", port))?;
    tracing::info!(port, "Forum listening");
    let mut server = Server::new(listener, Box::new(HttpEndpointsServe::new(endpoints)));
    let (_cancel_sender, cancel_receiver) = cancellation_token::create_cancellation_token();
    server.start_listening(cancel_receiver);
    Ok(())
}

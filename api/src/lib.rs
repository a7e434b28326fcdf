mod error;
mod mutation;
mod query;

#[macro_use]
extern crate rocket;

pub use error::Error;

use std::sync::Arc;

use rocket::{Build, Rocket, Route};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::rapidoc::{make_rapidoc, GeneralConfig, HideShowConfig, RapiDocConfig};
use rocket_okapi::settings::UrlObject;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};

use service::config::{Credentials, LeagueConfig};
use service::dto::{PdgaClient, ResultsProvider};
use service::error::ConfigError;
use service::notify::{DiscordWebhook, Notifier};
use service::sheets::{GoogleSheets, SheetSink};

/// Shared by every request. The league config is read once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<LeagueConfig>,
    pub provider: Arc<dyn ResultsProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub sheets: Arc<dyn SheetSink>,
}

impl AppState {
    /// PDGA, Discord and Sheets clients configured from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = LeagueConfig::from_env()?;
        let credentials = Credentials::from_env();
        let http = reqwest::Client::new();
        Ok(Self {
            provider: Arc::new(PdgaClient::default()),
            notifier: Arc::new(DiscordWebhook::new(http.clone(), credentials.discord_webhook)),
            sheets: Arc::new(GoogleSheets::new(
                http,
                credentials.sheets_id,
                credentials.sheets_token,
                config.sheets.clone(),
            )),
            config: Arc::new(config),
        })
    }
}

#[catch(404)]
fn general_not_found() -> &'static str {
    "Api endpoint not found"
}

pub fn routes() -> Vec<Route> {
    openapi_get_routes![
        mutation::score,
        query::score_help,
        query::schedule,
        query::lookup,
    ]
}

pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount("/api", routes())
        .mount(
            "/api/swagger",
            make_swagger_ui(&SwaggerUIConfig {
                url: "../openapi.json".to_owned(),
                ..Default::default()
            }),
        )
        .mount(
            "/api/",
            make_rapidoc(&RapiDocConfig {
                general: GeneralConfig {
                    spec_urls: vec![UrlObject::new("General", "./openapi.json")],
                    ..Default::default()
                },
                hide_show: HideShowConfig {
                    allow_spec_url_load: false,
                    allow_spec_file_load: false,
                    ..Default::default()
                },
                ..Default::default()
            }),
        )
        .register("/api", catchers![general_not_found])
}

pub fn launch() -> Result<Rocket<Build>, ConfigError> {
    dotenvy::dotenv().ok();
    Ok(build_rocket(AppState::from_env()?))
}

//! Backend clients shared through context.

use leptos::prelude::*;

use crate::api::{ApiClient, AuthorizedApi};
use crate::auth::AuthContext;
use crate::config::AppConfig;
use crate::credentials::AuthService;
use crate::web::FetchHttpClient;

pub type Api = ApiClient<FetchHttpClient>;
pub type SessionApi = AuthorizedApi<FetchHttpClient, AuthContext>;

#[derive(Clone)]
pub struct Services {
    pub config: AppConfig,
    api: Api,
    sensors: Api,
}

impl Services {
    pub fn new(config: AppConfig) -> Self {
        let api = ApiClient::new(config.api_base_url.clone(), FetchHttpClient);
        let sensors = ApiClient::new(config.sensor_base_url.clone(), FetchHttpClient);
        Self {
            config,
            api,
            sensors,
        }
    }

    pub fn api(&self) -> Api {
        self.api.clone()
    }

    /// Edge sensor service (device credentials, no bearer token).
    pub fn sensors(&self) -> Api {
        self.sensors.clone()
    }

    pub fn auth_service(&self) -> AuthService<FetchHttpClient> {
        AuthService::new(self.api())
    }

    /// Client that carries the session token and signs out on 401.
    pub fn authorized(&self, auth: AuthContext) -> SessionApi {
        AuthorizedApi::new(self.api(), auth)
    }
}

pub fn use_services() -> Services {
    use_context::<Services>().expect("Services should be provided")
}

/// Session-bound client built from the context services.
pub fn use_session_api() -> SessionApi {
    use_services().authorized(crate::auth::use_auth())
}

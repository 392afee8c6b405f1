use std::sync::Arc;

use uppye_core::tokens::{InMemorySessionStore, SessionStore, TokenService};

use crate::services::classrooms::SharedClassroomList;
use crate::services::directory::InMemoryDirectory;
use crate::settings::config::Settings;
use crate::stop_flag::{self, StopFlag};

#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub stop_flag: StopFlag,
    pub directory: Arc<InMemoryDirectory>,
    pub sessions: Arc<dyn SessionStore>,
    pub classrooms: SharedClassroomList,
    pub token_service: TokenService,
}

pub type SharedAppState = Arc<AppState>;

impl AppState {
    pub async fn new() -> anyhow::Result<SharedAppState> {
        let settings = Settings::new()?;

        let stop_flag = stop_flag::StopFlag::new();
        stop_flag::register_signal_handler(&stop_flag);

        Ok(Self::from_settings(settings, stop_flag))
    }

    pub async fn new_for_config_only() -> anyhow::Result<SharedAppState> {
        let settings = Settings::new()?;
        Ok(Self::from_settings(settings, StopFlag::new()))
    }

    /// Wire up the service graph for the given settings.
    pub fn from_settings(settings: Settings, stop_flag: StopFlag) -> SharedAppState {
        let directory = Arc::new(InMemoryDirectory::from_settings(&settings.directory));
        let sessions = Arc::new(InMemorySessionStore::new());
        let token_service = TokenService::new(&settings.auth, sessions.clone());

        Arc::new(AppState {
            settings,
            stop_flag,
            directory,
            sessions,
            classrooms: SharedClassroomList::new(),
            token_service,
        })
    }
}

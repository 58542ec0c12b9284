//! Wiring of config, session and the event store into one handle.

use anyhow::Result;
use calgrid_core::CalGridError;
use calgrid_core::config::GlobalConfig;
use calgrid_core::coordinator::Coordinator;
use calgrid_core::notes::NoteBook;
use calgrid_core::remote::HttpEventStore;
use calgrid_core::session::Session;

/// Everything a signed-in command needs, constructed once per invocation and
/// passed down explicitly.
pub struct AppContext {
    pub config: GlobalConfig,
    pub coordinator: Coordinator<HttpEventStore>,
}

impl AppContext {
    /// Load config and session, then fetch the event list. Fails with a
    /// sign-in hint when no session is stored or the token was rejected.
    pub async fn load() -> Result<Self> {
        let config = GlobalConfig::load()?;
        let session = Session::load().map_err(sign_in_hint)?;
        let store = HttpEventStore::new(&config, &session)?;
        let coordinator = Coordinator::load(store).await.map_err(sign_in_hint)?;
        tracing::debug!(events = coordinator.events().len(), "loaded event list");

        Ok(AppContext { config, coordinator })
    }

    /// Timezone to author new events in: config override, else the system's.
    pub fn timezone(&self) -> String {
        if let Some(tz) = &self.config.timezone {
            return tz.clone();
        }
        iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
    }

    pub fn notebook(&self) -> Result<NoteBook> {
        Ok(NoteBook::open_default()?)
    }
}

pub fn sign_in_hint(err: CalGridError) -> anyhow::Error {
    match err {
        CalGridError::SignInRequired => {
            anyhow::anyhow!("Sign in required. Run `calgrid login` first.")
        }
        other => other.into(),
    }
}

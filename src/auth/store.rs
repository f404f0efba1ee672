use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::token::TokenPair;
use crate::error::Result;

/// Storage abstraction for the persisted session token pair.
///
/// `save` replaces the whole pair in one operation; no reader ever observes
/// a half-updated pair. A store whose backing medium is unavailable behaves
/// as empty on `load`.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<TokenPair>;
    fn save(&self, pair: &TokenPair) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// File-backed token store using a single TOML session file.
///
/// # Example
/// ```no_run
/// use tacks::auth::{FileTokenStore, TokenPair, TokenStore};
///
/// let store = FileTokenStore::new_default();
/// store.save(&TokenPair::new("access", "refresh"))?;
/// # Ok::<(), tacks::error::TacksError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    base_dir: PathBuf,
}

const SESSION_FILE: &str = "session.toml";

impl FileTokenStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn new_default() -> Self {
        Self {
            base_dir: default_tacks_dir(),
        }
    }

    fn session_path(&self) -> PathBuf {
        self.base_dir.join(SESSION_FILE)
    }

    fn ensure_parent(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<TokenPair> {
        let path = self.session_path();
        let raw = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "session file unreadable; treating as absent");
                return None;
            }
        };
        match toml::from_str::<SessionFile>(&raw) {
            Ok(file) => Some(file.token),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "session file corrupt; treating as absent");
                None
            }
        }
    }

    fn save(&self, pair: &TokenPair) -> Result<()> {
        let path = self.session_path();
        Self::ensure_parent(&path)?;
        let file = SessionFile {
            version: 1,
            token: pair.clone(),
            saved_at: Utc::now(),
        };
        let serialized = toml::to_string(&file)?;
        fs::write(&path, serialized)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(self.session_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionFile {
    version: u32,
    token: TokenPair,
    saved_at: DateTime<Utc>,
}

fn default_tacks_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".tacks"))
        .unwrap_or_else(|| PathBuf::from(".tacks"))
}

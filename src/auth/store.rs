use crate::error::BotResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// OAuth token bundle for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredential {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp after which the access token is stale
    pub expires_at: i64,
    pub scope: String,
}

/// Keyed store mapping a chat id to its credential file on disk
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    /// Open the store, creating the credentials directory if missing
    pub fn open(dir: impl AsRef<Path>) -> BotResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, chat_id: i64) -> PathBuf {
        self.dir.join(format!("credentials-{}.json", chat_id))
    }

    /// Read the persisted credential for a chat; None if no record exists
    pub fn load(&self, chat_id: i64) -> BotResult<Option<UserCredential>> {
        let content = match fs::read_to_string(self.path_for(chat_id)) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let credential = serde_json::from_str(&content)?;
        Ok(Some(credential))
    }

    /// Overwrite (or create) the credential record for a chat
    pub fn save(&self, chat_id: i64, credential: &UserCredential) -> BotResult<()> {
        let content = serde_json::to_string(credential)?;
        fs::write(self.path_for(chat_id), content)?;
        Ok(())
    }

    /// Remove the credential record; callers must check `load` first,
    /// a missing file is an I/O error here
    pub fn delete(&self, chat_id: i64) -> BotResult<()> {
        fs::remove_file(self.path_for(chat_id))?;
        Ok(())
    }
}

//! Session store backed by a JSON file.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;

use crate::account::{
    domain::UserProfile,
    ports::{SessionResult, SessionStore, SessionStoreError},
};

/// File name used inside the session directory.
pub const SESSION_FILE_NAME: &str = "datacomb_user.json";

/// Session store keeping the profile as JSON in a directory capability.
///
/// Only the single session file inside the directory is ever touched.
#[derive(Debug)]
pub struct FileSessionStore {
    dir: Dir,
    file_name: String,
}

impl FileSessionStore {
    /// Creates a store over an already opened directory.
    #[must_use]
    pub fn new(dir: Dir) -> Self {
        Self {
            dir,
            file_name: SESSION_FILE_NAME.to_owned(),
        }
    }

    /// Opens the directory at `path` and stores the session inside it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Storage`] when the directory cannot be
    /// opened.
    pub fn open(path: &Utf8Path) -> SessionResult<Self> {
        let dir =
            Dir::open_ambient_dir(path, ambient_authority()).map_err(SessionStoreError::storage)?;
        Ok(Self::new(dir))
    }

    /// Uses `file_name` instead of the default session file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> SessionResult<Option<UserProfile>> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(SessionStoreError::storage(err)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(SessionStoreError::serialization)
    }

    async fn save(&self, profile: &UserProfile) -> SessionResult<()> {
        let contents = serde_json::to_string(profile).map_err(SessionStoreError::serialization)?;
        self.dir
            .write(&self.file_name, contents)
            .map_err(SessionStoreError::storage)
    }

    async fn clear(&self) -> SessionResult<()> {
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionStoreError::storage(err)),
        }
    }
}

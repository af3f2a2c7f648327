//! Configuration for dicebag.
//!
//! Reads `~/.dicebag/config.toml`. Every table and field is optional; a
//! missing file means "all defaults".
//!
//! ```toml
//! [app]
//! placeholder_name = "Unnamed group"
//! default_sides = 6
//!
//! [storage]
//! dir = "${HOME}/.dicebag/data"
//! ephemeral = false
//! ```

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use dicebag_types::{DEFAULT_GROUP_NAME, Sides};

/// Overrides `[storage] dir` when set.
pub const STORAGE_DIR_ENV: &str = "DICEBAG_STORAGE_DIR";

const CONFIG_DIR_NAME: &str = ".dicebag";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct DicebagConfig {
    pub app: Option<AppConfig>,
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct AppConfig {
    /// Name given to newly created groups.
    pub placeholder_name: Option<String>,
    /// Initial side count offered when adding a die.
    pub default_sides: Option<u32>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct StorageConfig {
    pub dir: Option<String>,
    /// Keep groups in memory only; nothing is written to disk.
    pub ephemeral: Option<bool>,
}

/// Where the group collection is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    Directory(PathBuf),
    Ephemeral,
}

impl DicebagConfig {
    /// Load from the default location. `Ok(None)` when no config file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    #[must_use]
    pub fn placeholder_name(&self) -> &str {
        self.app
            .as_ref()
            .and_then(|app| app.placeholder_name.as_deref())
            .unwrap_or(DEFAULT_GROUP_NAME)
    }

    #[must_use]
    pub fn default_sides(&self) -> Sides {
        let Some(raw) = self.app.as_ref().and_then(|app| app.default_sides) else {
            return Sides::D6;
        };
        Sides::try_new(raw).unwrap_or_else(|err| {
            tracing::warn!("Ignoring app.default_sides = {raw}: {err}");
            Sides::D6
        })
    }

    /// Resolve the storage location, honoring [`STORAGE_DIR_ENV`].
    #[must_use]
    pub fn storage_location(&self) -> StorageLocation {
        let env_dir = env::var(STORAGE_DIR_ENV).ok();
        self.storage_location_with(env_dir.as_deref(), |var| env::var(var).ok())
    }

    fn storage_location_with(
        &self,
        env_dir: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> StorageLocation {
        let storage = self.storage.as_ref();
        if storage.and_then(|s| s.ephemeral).unwrap_or(false) {
            return StorageLocation::Ephemeral;
        }

        let configured = env_dir
            .filter(|dir| !dir.trim().is_empty())
            .map(ToString::to_string)
            .or_else(|| {
                storage
                    .and_then(|s| s.dir.as_deref())
                    .map(|dir| expand_env_vars(dir, &lookup))
            })
            .filter(|dir| !dir.trim().is_empty());

        match configured {
            Some(dir) => StorageLocation::Directory(PathBuf::from(dir)),
            None => StorageLocation::Directory(default_data_dir()),
        }
    }
}

/// Expand `${VAR}` references. Unset variables expand to nothing; an
/// unterminated `${` is kept literally.
pub fn expand_env_vars(value: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let var = &after[..end];
        if !var.is_empty() {
            out.push_str(&lookup(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

/// `~/.dicebag`, falling back to `./.dicebag` when there is no home directory.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::home_dir().map_or_else(
        || PathBuf::from(CONFIG_DIR_NAME),
        |home| home.join(CONFIG_DIR_NAME),
    )
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join("config.toml"))
}

#[must_use]
pub fn default_data_dir() -> PathBuf {
    config_dir().join("data")
}

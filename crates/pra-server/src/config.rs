use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use pra_store::{BlobStore, FsBlobStore, InMemoryBlobStore};

use crate::error::{ServerError, ServerResult};

pub const ENV_BIND_ADDR: &str = "PRA_BIND_ADDR";
pub const ENV_BACKEND: &str = "PRA_BACKEND";
pub const ENV_DATA_DIR: &str = "PRA_DATA_DIR";
pub const ENV_BUCKET: &str = "PRA_BUCKET";

/// Which blob store the server writes to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Memory,
    #[default]
    Filesystem,
}

impl FromStr for BackendKind {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "filesystem" | "fs" => Ok(Self::Filesystem),
            other => Err(ServerError::Config(format!("unknown backend: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub backend: BackendKind,
    /// Root directory of the filesystem backend.
    pub data_dir: PathBuf,
    pub bucket: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            backend: BackendKind::Filesystem,
            data_dir: PathBuf::from("./data"),
            bucket: "pr-artifacts".into(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read the config file at `path`, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> ServerResult<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    ServerError::Config(format!("cannot read {}: {e}", path.display()))
                })?;
                Self::from_toml_str(&text)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply `PRA_*` overrides from the process environment.
    pub fn apply_env(self) -> ServerResult<Self> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> ServerResult<Self> {
        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            self.bind_addr = addr
                .parse()
                .map_err(|e| ServerError::Config(format!("{ENV_BIND_ADDR}={addr}: {e}")))?;
        }
        if let Some(backend) = lookup(ENV_BACKEND) {
            self.backend = backend.parse()?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(bucket) = lookup(ENV_BUCKET) {
            self.bucket = bucket;
        }
        Ok(self)
    }

    /// Construct the configured blob store.
    pub fn open_store(&self) -> ServerResult<Arc<dyn BlobStore>> {
        let store: Arc<dyn BlobStore> = match self.backend {
            BackendKind::Memory => Arc::new(InMemoryBlobStore::new()),
            BackendKind::Filesystem => Arc::new(FsBlobStore::open(&self.data_dir, &self.bucket)?),
        };
        tracing::debug!(backend = store.name(), "opened blob store");
        Ok(store)
    }
}

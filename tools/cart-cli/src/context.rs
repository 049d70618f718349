//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use cart_core::cart::CartStore;
use cart_core::context::CartContext;
use cart_storage::{cache_key, validate_key, FileStorage};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Cart profile; selects a separate storage key.
    pub profile: Option<String>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, profile: Option<String>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        if let Some(ref path) = config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            profile,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => tracing::warn!(
                            path = %config_path.display(),
                            error = %format!("{:#}", e),
                            "skipping unusable config"
                        ),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory holding the persisted cart.
    pub fn data_dir(&self) -> PathBuf {
        match self.config.store.data_dir {
            Some(ref dir) => self.resolve_path(&expand_home(dir)),
            None => dirs_path().join("cart"),
        }
    }

    /// Storage key for the active profile.
    ///
    /// Fails if the key cannot be stored, so a bad `--profile` or `store.key`
    /// is reported up front instead of every save failing silently.
    pub fn cart_key(&self) -> Result<String> {
        let key = match self.profile {
            Some(ref profile) => cache_key!(self.config.store.key.as_str(), profile),
            None => self.config.store.key.clone(),
        };
        validate_key(&key).with_context(|| {
            format!(
                "Invalid cart key {:?} (use letters, digits, '_', '-', '.' or ':')",
                key
            )
        })?;
        Ok(key)
    }

    /// Open the persisted cart and hand it out as a shared context.
    pub fn open_cart(&self) -> Result<CartContext<FileStorage>> {
        let key = self.cart_key()?;
        let dir = self.data_dir();
        let storage = FileStorage::open(&dir)
            .with_context(|| format!("Failed to open cart storage at {}", dir.display()))?;
        let currency = self.config.pricing.currency()?;

        let mut store = CartStore::with_key(storage, key).with_currency(currency);
        let restored = store.load_persisted();
        self.output.debug(&format!(
            "cart {} in {} ({})",
            store.key(),
            dir.display(),
            if restored { "restored" } else { "new" }
        ));

        Ok(CartContext::new(store))
    }

    /// Path a new config file is written to.
    pub fn config_target(&self) -> PathBuf {
        self.config_path
            .clone()
            .unwrap_or_else(|| self.cwd.join(CONFIG_NAMES[0]))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest).to_string_lossy().into_owned(),
        _ => path.to_string(),
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    }
}

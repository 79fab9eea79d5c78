//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use fishmarket_cache::{FileStore, KvStore, MemoryStore};
use fishmarket_commerce::cart::CartStore;

use crate::config::{CliConfig, StoreBackend, CONFIG_FILE_NAMES};
use crate::gateway::OutboxGateway;
use crate::output::Output;

/// Cart store over whichever backend the config selects.
pub type CliCartStore = CartStore<Box<dyn KvStore>>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            // Try to find config in current directory or parent directories
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Open the configured cart store.
    pub fn open_cart(&self) -> Result<CliCartStore> {
        let currency = self.config.currency()?;
        let backend: Box<dyn KvStore> = match self.config.store.backend {
            StoreBackend::File => {
                let root = self.resolve(&self.config.store.path);
                Box::new(FileStore::open(&root).with_context(|| {
                    format!("Failed to open cart store at {}", root.display())
                })?)
            }
            StoreBackend::Memory => Box::new(MemoryStore::new()),
        };
        Ok(CartStore::open(backend, self.config.cart_key(), currency))
    }

    /// Gateway that receives placed orders.
    pub fn order_gateway(&self) -> OutboxGateway {
        OutboxGateway::new(self.resolve(&self.config.orders.outbox))
    }

    /// Resolve a configured path against the working directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".fishmarket.toml"), "").unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, dir.path().join(".fishmarket.toml"));
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fishmarket.json"), "{}").unwrap();
        std::fs::write(dir.path().join("fishmarket.toml"), "").unwrap();

        let found = find_config(dir.path()).unwrap();
        assert_eq!(found, dir.path().join("fishmarket.toml"));
    }
}

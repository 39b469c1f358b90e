use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub compression: CompressionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Upper bound on the bytes buffered for a single request.
    pub max_request_bytes: usize,
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub log_level: String,
}

impl ServerConfig {
    /// The configured `log_level` as a tracing level.
    pub fn log_level(&self) -> anyhow::Result<tracing::Level> {
        self.log_level
            .parse()
            .with_context(|| format!("invalid server.log_level {:?}", self.log_level))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:4221".to_string(),
            max_request_bytes: 1500,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Root for `/files/` routes. Those routes answer 404 while unset.
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub level: u32,
    /// Compressed bodies larger than this are sent uncompressed instead.
    pub max_output_bytes: Option<usize>,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: 6,
            max_output_bytes: None,
        }
    }
}

impl Config {
    /// Loads configuration from the environment and command line.
    ///
    /// `CONFIG` names an optional YAML file, `LISTEN` overrides the listen
    /// address and `--directory <dir>` sets the file root.
    pub fn load() -> anyhow::Result<Self> {
        let yaml = match std::env::var("CONFIG") {
            Ok(path) => Some(
                std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {path}"))?,
            ),
            Err(_) => None,
        };
        let listen = std::env::var("LISTEN").ok();

        Self::from_sources(yaml.as_deref(), listen, std::env::args().skip(1))
    }

    /// Builds a config from YAML text, then applies the `LISTEN` value and
    /// command-line arguments on top, in that order.
    pub fn from_sources<I>(yaml: Option<&str>, listen: Option<String>, args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cfg = match yaml {
            Some(text) => serde_yaml::from_str(text).context("parsing config")?,
            None => Config::default(),
        };

        if let Some(addr) = listen {
            cfg.server.listen_addr = addr;
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--directory" {
                let dir = args.next().context("--directory requires a path")?;
                cfg.files.directory = Some(PathBuf::from(dir));
            }
        }

        cfg.server.log_level()?;

        Ok(cfg)
    }
}

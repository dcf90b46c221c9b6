use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BUILD_CONFIGURATION: &str = "Release";
pub const DEFAULT_PACK_OUTPUT: &str = "bin";

pub const ENV_BUILD_CONFIGURATION: &str = "DOTNET_HELPER_CONFIGURATION";
pub const ENV_PACK_OUTPUT: &str = "DOTNET_HELPER_PACK_OUTPUT";
pub const ENV_SKIP: &str = "DOTNET_HELPER_SKIP";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    #[error("Invalid environment entry '{0}'. Expected KEY=VALUE")]
    InvalidEnvEntry(String),
}

/// Settings supplied by the embedding build tool.
///
/// Defaults are applied once, at construction. The value is immutable
/// afterwards and safe to share between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperConfig {
    base_directory: PathBuf,
    environment: BTreeMap<String, String>,
    pack_output: PathBuf,
    build_configuration: String,
    skip: bool,
}

impl HelperConfig {
    /// Builds a configuration, substituting defaults for absent inputs.
    ///
    /// Environment entries with an empty key are dropped and absent values
    /// become empty strings. Paths are accepted as-is, existing or not.
    pub fn new(
        base_directory: impl Into<PathBuf>,
        environment: Option<HashMap<String, Option<String>>>,
        pack_output: Option<PathBuf>,
        build_configuration: Option<String>,
        skip: bool,
    ) -> Self {
        let environment = environment
            .unwrap_or_default()
            .into_iter()
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, value)| (key, value.unwrap_or_default()))
            .collect();

        Self {
            base_directory: base_directory.into(),
            environment,
            pack_output: pack_output.unwrap_or_else(|| PathBuf::from(DEFAULT_PACK_OUTPUT)),
            build_configuration: build_configuration
                .unwrap_or_else(|| DEFAULT_BUILD_CONFIGURATION.to_string()),
            skip,
        }
    }

    /// Like [`HelperConfig::new`], but absent inputs are first looked up in
    /// `DOTNET_HELPER_CONFIGURATION`, `DOTNET_HELPER_PACK_OUTPUT` and
    /// `DOTNET_HELPER_SKIP` before falling back to the defaults.
    ///
    /// An explicit `skip = true` always wins over the environment.
    pub fn from_env(
        base_directory: impl Into<PathBuf>,
        environment: Option<HashMap<String, Option<String>>>,
        pack_output: Option<PathBuf>,
        build_configuration: Option<String>,
        skip: bool,
    ) -> Result<Self, ConfigError> {
        let pack_output = pack_output.or_else(|| {
            env::var(ENV_PACK_OUTPUT)
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        });

        let build_configuration = build_configuration
            .or_else(|| env::var(ENV_BUILD_CONFIGURATION).ok().filter(|v| !v.is_empty()));

        let env_skip = match env::var(ENV_SKIP) {
            Ok(v) if !v.is_empty() => {
                v.to_lowercase()
                    .parse::<bool>()
                    .map_err(|e| ConfigError::ParseError {
                        field: ENV_SKIP.to_string(),
                        error: e.to_string(),
                    })?
            }
            _ => false,
        };

        Ok(Self::new(
            base_directory,
            environment,
            pack_output,
            build_configuration,
            skip || env_skip,
        ))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Variables overlaid on the inherited environment of every child process
    pub fn environment(&self) -> &BTreeMap<String, String> {
        &self.environment
    }

    /// Where `dotnet pack` output lands; relative paths are resolved per module
    pub fn pack_output(&self) -> &Path {
        &self.pack_output
    }

    pub fn build_configuration(&self) -> &str {
        &self.build_configuration
    }

    pub fn is_skip(&self) -> bool {
        self.skip
    }

    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert(
            "base_directory".to_string(),
            self.base_directory.display().to_string(),
        );
        map.insert(
            "pack_output".to_string(),
            self.pack_output.display().to_string(),
        );
        map.insert(
            "build_configuration".to_string(),
            self.build_configuration.clone(),
        );
        map.insert("skip".to_string(), self.skip.to_string());
        map.insert(
            "environment".to_string(),
            self.environment
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(","),
        );

        map
    }
}

impl fmt::Display for HelperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dotnet-helper Configuration:")?;
        writeln!(f, "  Base Directory: {}", self.base_directory.display())?;
        writeln!(f, "  Build Configuration: {}", self.build_configuration)?;
        writeln!(f, "  Pack Output: {}", self.pack_output.display())?;
        writeln!(f, "  Skip: {}", self.skip)?;
        if !self.environment.is_empty() {
            writeln!(f, "  Environment:")?;
            for key in self.environment.keys() {
                writeln!(f, "    {}", key)?;
            }
        }
        Ok(())
    }
}

/// Parses a `KEY=VALUE` pair. A bare `KEY` carries no value, which the
/// configuration later turns into an empty string.
pub fn parse_env_entry(entry: &str) -> Result<(String, Option<String>), ConfigError> {
    let (key, value) = match entry.split_once('=') {
        Some((key, value)) => (key, Some(value.to_string())),
        None => (entry, None),
    };

    if key.is_empty() {
        return Err(ConfigError::InvalidEnvEntry(entry.to_string()));
    }

    Ok((key.to_string(), value))
}

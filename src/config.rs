use crate::errors::{ProxyError, ProxyResult};
use crate::logging::LoggingConfig;
use crate::meta::TypeRegistry;
use crate::signature::{CanonicalNormalizer, SignatureStyle, SignatureSynthesizer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the file `discover` looks for
pub const CONFIG_FILE: &str = "sigproxy.toml";

/// Proxy configuration, usually read from `sigproxy.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default)]
    pub signature: SignatureStyle,

    #[serde(default)]
    pub normalize: CanonicalNormalizer,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn config_error(path: &Path, message: impl ToString) -> ProxyError {
    ProxyError::Config {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

impl ProxyConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ProxyResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| config_error(path, e))?;
        Self::parse(&content).map_err(|e| match e {
            ProxyError::Config { message, .. } => config_error(path, message),
            other => other,
        })
    }

    /// Parse configuration from a TOML string, validating the signature style
    pub fn parse(content: &str) -> ProxyResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| config_error(Path::new("<inline>"), e))?;
        config.signature.validate()?;
        Ok(config)
    }

    /// Find `sigproxy.toml` in `dir` or its parents.
    ///
    /// `Ok(None)` when no file exists; a file that fails to load is an error.
    pub fn discover(dir: &Path) -> ProxyResult<Option<Self>> {
        let mut current = Some(dir);

        while let Some(path) = current {
            let config_path = path.join(CONFIG_FILE);
            if config_path.exists() {
                return Self::load(&config_path).map(Some);
            }
            current = path.parent();
        }

        Ok(None)
    }

    /// Generate default configuration file content
    pub fn generate_default() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate config"))
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> ProxyResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| config_error(path, e))?;
        fs::write(path, content).map_err(|e| config_error(path, e))
    }

    /// Synthesizer wired to this config's style and normalization rules
    pub fn synthesizer<'r>(&'r self, registry: &'r dyn TypeRegistry) -> SignatureSynthesizer<'r> {
        SignatureSynthesizer::new(registry, &self.normalize).with_style(&self.signature)
    }
}

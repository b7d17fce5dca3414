//! Construction-time configuration for an [`App`](crate::App).

use std::path::Path;

use cliapp_render_core::HelpFormat;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Runtime behavior of an `App`. Loadable from TOML; every key is optional.
///
/// ```toml
/// exit_on_failure = true
/// program_name = "notes"
/// color = false
/// help_format = "text"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Write failures to the error sink and exit with status 1
    pub exit_on_failure: bool,

    /// Name shown in usage lines for the root command
    pub program_name: String,

    /// Style help headings with ANSI colors
    pub color: bool,

    pub help_format: HelpFormat,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            exit_on_failure: false,
            program_name: "command".to_string(),
            color: false,
            help_format: HelpFormat::Text,
        }
    }
}

impl Options {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn exit_on_failure(mut self, exit: bool) -> Self {
        self.exit_on_failure = exit;
        self
    }

    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_keys_take_defaults() {
        let options = Options::from_toml("program_name = \"notes\"").unwrap();
        assert_eq!(options.program_name, "notes");
        assert!(!options.exit_on_failure);
        assert_eq!(options.help_format, HelpFormat::Text);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "exit_on_failure = true\nhelp_format = \"json\"").unwrap();
        let options = Options::load(file.path()).unwrap();
        assert!(options.exit_on_failure);
        assert_eq!(options.help_format, HelpFormat::Json);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        assert!(matches!(Options::from_toml("color = 3"), Err(Error::Config(_))));
        assert!(matches!(Options::load("/nonexistent/cliapp.toml"), Err(Error::Config(_))));
    }
}

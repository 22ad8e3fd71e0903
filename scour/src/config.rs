use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a search run.
///
/// # Configuration Locations
///
/// Option defaults can be loaded from multiple locations, in order of
/// precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.scour.yaml` in the current directory
/// 3. Global `$CONFIG_DIR/scour/config.yaml`
///
/// # Configuration Format
///
/// The configuration uses YAML format. Example:
/// ```yaml
/// # Case-insensitive matching
/// ignore_case: true
///
/// # Context lines around each match
/// context_before: 2
/// context_after: 2
///
/// # Suppress line numbers
/// line_numbers: false
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "info"
/// ```
///
/// The pattern and input paths are never read from a file; they only come
/// from the command line. CLI flags take precedence over config file values,
/// with the merging behavior defined in [`SearchConfig::merge_with_cli`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// The search pattern (regex unless `fixed_strings` is set)
    #[serde(skip)]
    pub pattern: String,

    /// Input files; empty means read standard input
    #[serde(skip)]
    pub paths: Vec<PathBuf>,

    /// Case-insensitive matching
    #[serde(default)]
    pub ignore_case: bool,

    /// Treat the pattern as a literal string, not a regex
    #[serde(default)]
    pub fixed_strings: bool,

    /// Require matches to fall on word boundaries
    #[serde(default)]
    pub word_regexp: bool,

    /// Select lines that do NOT match
    #[serde(default)]
    pub invert_match: bool,

    /// Number of context lines to show before each match
    #[serde(default)]
    pub context_before: usize,

    /// Number of context lines to show after each match
    #[serde(default)]
    pub context_after: usize,

    /// Prefix output lines with their line number; unset means the default
    /// (shown). Tracked as an option so an explicit CLI flag can override a
    /// config file in either direction.
    #[serde(default)]
    pub line_numbers: Option<bool>,

    /// Print only the number of matching lines
    #[serde(default)]
    pub count_only: bool,

    /// Suppress all match output; exit status reports the outcome
    #[serde(default)]
    pub quiet: bool,

    /// Always prefix output with the source name, even for a single source
    #[serde(default)]
    pub with_filename: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            paths: Vec::new(),
            ignore_case: false,
            fixed_strings: false,
            word_regexp: false,
            invert_match: false,
            context_before: 0,
            context_after: 0,
            line_numbers: None,
            count_only: false,
            quiet: false,
            with_filename: false,
            log_level: default_log_level(),
        }
    }
}

impl SearchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration, additionally reading the given file if present.
    /// An explicitly named file that does not exist is an error; the default
    /// locations are skipped silently when absent.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let default_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("scour/config.yaml")),
            // Local config
            Some(PathBuf::from(".scour.yaml")),
        ];

        for path in default_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // The custom file is required when named
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli_config: SearchConfig) -> Self {
        // Pattern and paths only ever come from the CLI
        self.pattern = cli_config.pattern;
        self.paths = cli_config.paths;

        // Boolean flags can only be switched on from the CLI
        self.ignore_case |= cli_config.ignore_case;
        self.fixed_strings |= cli_config.fixed_strings;
        self.word_regexp |= cli_config.word_regexp;
        self.invert_match |= cli_config.invert_match;
        self.count_only |= cli_config.count_only;
        self.quiet |= cli_config.quiet;
        self.with_filename |= cli_config.with_filename;

        if cli_config.context_before > 0 {
            self.context_before = cli_config.context_before;
        }
        if cli_config.context_after > 0 {
            self.context_after = cli_config.context_after;
        }
        if cli_config.line_numbers.is_some() {
            self.line_numbers = cli_config.line_numbers;
        }
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        self
    }

    /// Effective line-number setting; defaults to shown.
    pub fn show_line_numbers(&self) -> bool {
        self.line_numbers.unwrap_or(true)
    }
}

//! Configuration management for sort operations

use crate::element::ElementType;
use crate::error::{SortError, SortResult};
use crate::pivot::PivotStrategy;
use crate::quicksort::Sorter;
use std::str::FromStr;

/// How the element width of the input is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementMode {
    /// Best effort: narrow integer, then 64-bit float
    #[default]
    Auto,
    /// Every value must parse as this width
    Fixed(ElementType),
}

/// Main configuration structure for sort operations
#[derive(Debug, Clone, Default)]
pub struct SortConfig {
    /// Element width selection
    pub element_mode: ElementMode,
    /// Pivot selection policy
    pub pivot: PivotStrategy,
    /// Seed for the random pivot policy
    pub seed: Option<u64>,
    /// Check if input is already sorted
    pub check: bool,
    /// Treat input files as raw fixed-width buffers sorted in place
    pub binary: bool,
    /// Output file path
    pub output_file: Option<String>,
    /// Files to read from (if not specified, use stdin)
    pub input_files: Vec<String>,
    /// Debug mode (for troubleshooting)
    pub debug: bool,
}

impl SortConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element mode
    pub fn with_element_mode(mut self, mode: ElementMode) -> Self {
        self.element_mode = mode;
        self
    }

    /// Set the pivot strategy
    pub fn with_pivot(mut self, pivot: PivotStrategy) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Enable check mode
    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Enable in-place binary buffer mode
    pub fn with_binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }

    /// Set output file
    pub fn with_output_file(mut self, output_file: Option<String>) -> Self {
        self.output_file = output_file;
        self
    }

    /// Set input files
    pub fn with_input_files(mut self, files: Vec<String>) -> Self {
        self.input_files = files;
        self
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> SortResult<()> {
        if self.binary {
            if self.element_mode == ElementMode::Auto {
                return Err(SortError::conflicting_options(
                    "--binary requires an explicit --type",
                ));
            }
            if self.output_file.is_some() {
                return Err(SortError::conflicting_options(
                    "--binary sorts files in place and cannot be combined with --output",
                ));
            }
            if self.check {
                return Err(SortError::conflicting_options(
                    "cannot use both --binary and --check",
                ));
            }
            if self.reading_from_stdin() {
                return Err(SortError::conflicting_options(
                    "--binary needs at least one input file",
                ));
            }
        }

        if self.check && self.output_file.is_some() {
            return Err(SortError::conflicting_options(
                "--check produces no output and cannot be combined with --output",
            ));
        }

        if self.seed.is_some() && self.pivot != PivotStrategy::Random {
            return Err(SortError::conflicting_options(
                "--seed only applies to --pivot random",
            ));
        }

        Ok(())
    }

    /// Build the sorter described by this configuration
    pub fn sorter(&self) -> Sorter {
        match self.seed {
            Some(seed) => Sorter::with_seed(self.pivot, seed),
            None => Sorter::new(self.pivot),
        }
    }

    /// Check if reading from stdin
    pub fn reading_from_stdin(&self) -> bool {
        self.input_files.is_empty() || (self.input_files.len() == 1 && self.input_files[0] == "-")
    }

    /// Check if writing to stdout
    pub fn writing_to_stdout(&self) -> bool {
        self.output_file.is_none()
    }
}

impl FromStr for ElementMode {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            Ok(ElementMode::Auto)
        } else {
            s.parse().map(ElementMode::Fixed)
        }
    }
}

impl std::fmt::Display for ElementMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementMode::Auto => write!(f, "auto"),
            ElementMode::Fixed(element_type) => write!(f, "{element_type}"),
        }
    }
}

/// Builder pattern for creating configurations
pub struct SortConfigBuilder {
    config: SortConfig,
}

impl SortConfigBuilder {
    /// Start building a new configuration
    pub fn new() -> Self {
        Self {
            config: SortConfig::default(),
        }
    }

    /// Set element mode
    pub fn element_mode(mut self, mode: ElementMode) -> Self {
        self.config.element_mode = mode;
        self
    }

    /// Set pivot strategy
    pub fn pivot(mut self, pivot: PivotStrategy) -> Self {
        self.config.pivot = pivot;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Enable check mode
    pub fn check(mut self) -> Self {
        self.config.check = true;
        self
    }

    /// Enable binary buffer mode
    pub fn binary(mut self) -> Self {
        self.config.binary = true;
        self
    }

    /// Set output file
    pub fn output_file(mut self, file: String) -> Self {
        self.config.output_file = Some(file);
        self
    }

    /// Set input files
    pub fn input_files(mut self, files: Vec<String>) -> Self {
        self.config.input_files = files;
        self
    }

    pub fn debug(mut self) -> Self {
        self.config.debug = true;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SortResult<SortConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SortConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Preset configurations for common use cases
pub mod presets {
    use super::*;

    /// Configuration for narrow-integer input
    pub fn integers() -> SortConfig {
        SortConfig::new().with_element_mode(ElementMode::Fixed(ElementType::Int32))
    }

    /// Configuration for check mode
    pub fn check() -> SortConfig {
        SortConfig::new().with_check(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SortConfig::default();
        assert_eq!(config.element_mode, ElementMode::Auto);
        assert_eq!(config.pivot, PivotStrategy::Last);
        assert!(!config.check);
        assert!(!config.binary);
        assert!(config.writing_to_stdout());
    }

    #[test]
    fn test_config_builder() {
        let config = SortConfigBuilder::new()
            .element_mode(ElementMode::Fixed(ElementType::Float32))
            .pivot(PivotStrategy::Random)
            .seed(9)
            .build()
            .expect("Failed to build test config");

        assert_eq!(config.element_mode, ElementMode::Fixed(ElementType::Float32));
        assert_eq!(config.pivot, PivotStrategy::Random);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.sorter().strategy(), PivotStrategy::Random);
    }

    #[test]
    fn test_element_mode_from_str() {
        assert_eq!(
            "auto".parse::<ElementMode>().expect("Failed to parse auto"),
            ElementMode::Auto
        );
        assert_eq!(
            "f64".parse::<ElementMode>().expect("Failed to parse f64"),
            ElementMode::Fixed(ElementType::Float64)
        );
        assert!("complex".parse::<ElementMode>().is_err());
        assert_eq!(ElementMode::Fixed(ElementType::Int32).to_string(), "i32");
    }

    #[test]
    fn test_validate_binary_requires_type_and_files() {
        let config = SortConfig::new()
            .with_binary(true)
            .with_input_files(vec!["data.bin".to_string()]);
        assert!(config.validate().is_err());

        let config = presets::integers().with_binary(true);
        assert!(config.validate().is_err());

        let config = presets::integers()
            .with_binary(true)
            .with_input_files(vec!["data.bin".to_string()]);
        assert!(config.validate().is_ok());

        let config = config.with_output_file(Some("out.bin".to_string()));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_conflicting_options() {
        let config = SortConfig {
            check: true,
            output_file: Some("out.txt".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SortConfig::new().with_seed(Some(1));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_presets() {
        assert_eq!(presets::integers().element_mode, ElementMode::Fixed(ElementType::Int32));
        assert!(presets::check().check);
    }

    #[test]
    fn test_reading_from_stdin() {
        let config = SortConfig::default();
        assert!(config.reading_from_stdin());

        let config = SortConfig::default().with_input_files(vec!["-".to_string()]);
        assert!(config.reading_from_stdin());

        let config = SortConfig::default().with_input_files(vec!["file.txt".to_string()]);
        assert!(!config.reading_from_stdin());
    }
}

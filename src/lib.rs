//! Logo Thicken - strip the background from an SVG logo and bolden its shapes
//!
//! The transform reads an SVG file, drops the root-level paths filled with
//! a near-white background color, and gives every remaining root-level path
//! a stroke in its own fill color so the shapes render thicker.
//!
//! # Example
//!
//! ```rust
//! use logo_thicken::{process_str, TransformConfig};
//!
//! let (svg, report) = process_str(
//!     r##"<svg xmlns="http://www.w3.org/2000/svg"><path fill="#FEFEFE"/><path fill="#112233"/></svg>"##,
//!     &TransformConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(report.removed, 1);
//! assert!(svg.contains(r##"<path fill="#112233" stroke="#112233" stroke-width="3"/>"##));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod thicken;

pub use config::{ConfigError, ThickenConfig};
pub use document::{Document, Element, Node, SVG_NAMESPACE};
pub use error::ParseError;
pub use thicken::{remove_background_paths, thicken_paths, Report};

use std::fs::{self, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur during a transform
#[derive(Debug, Error)]
pub enum TransformError {
    /// The input is not well-formed XML
    #[error("{error}")]
    Parse {
        error: ParseError,
        /// The text that failed to parse, kept for diagnostics
        text: String,
    },

    /// The input file could not be read
    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// The output file could not be written
    #[error("failed to write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The document could not be serialized
    #[error("failed to serialize document: {0}")]
    Serialize(#[source] io::Error),

    /// Invalid configuration
    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl TransformError {
    /// True for read and write failures
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Write { .. })
    }

    /// Render a source-annotated report for parse errors
    pub fn diagnostic(&self, filename: &str) -> Option<String> {
        match self {
            Self::Parse { error, text } => Some(error.format(text, filename)),
            _ => None,
        }
    }
}

/// Configuration for the complete transform pipeline
#[derive(Debug, Clone)]
pub struct TransformConfig {
    /// Background fills and stroke width
    pub thicken: ThickenConfig,
    /// Rewrite a prefixed SVG namespace to the default namespace
    pub normalize_namespace: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            thicken: ThickenConfig::default(),
            normalize_namespace: true,
        }
    }
}

impl TransformConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the thickening configuration
    pub fn with_thicken(mut self, config: ThickenConfig) -> Self {
        self.thicken = config;
        self
    }

    /// Enable or disable namespace normalization
    pub fn with_namespace_normalization(mut self, enabled: bool) -> Self {
        self.normalize_namespace = enabled;
        self
    }
}

/// Transform an SVG file with default configuration
///
/// Reads `input`, removes background paths, thickens the remaining paths
/// and writes the result to `output`. The input file is never modified
/// unless it is also the output.
pub fn transform(input: &Path, output: &Path) -> Result<Report, TransformError> {
    transform_with_config(input, output, &TransformConfig::default())
}

/// Transform an SVG file with custom configuration
///
/// The output is written to a temporary file next to `output` and renamed
/// into place, so a failed run never leaves a partial or empty output file
/// behind.
pub fn transform_with_config(
    input: &Path,
    output: &Path,
    config: &TransformConfig,
) -> Result<Report, TransformError> {
    config.thicken.validate()?;

    let read_err = |source| TransformError::Read {
        path: input.to_path_buf(),
        source,
    };
    let bytes = fs::read(input).map_err(read_err)?;
    let permissions = fs::metadata(input).map(|m| m.permissions()).ok();

    let source = match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(e) => {
            let valid = e.utf8_error().valid_up_to();
            return Err(TransformError::Parse {
                error: ParseError::syntax(valid..valid + 1, "input is not valid UTF-8"),
                text: String::from_utf8_lossy(e.as_bytes()).into_owned(),
            });
        }
    };

    let (svg, report) = process_str(&source, config)?;
    write_atomically(output, svg.as_bytes(), permissions)?;

    log::debug!("{} -> {}: {}", input.display(), output.display(), report);
    Ok(report)
}

/// Run the transform on an in-memory document
///
/// Returns the serialized result and a summary of what changed.
pub fn process_str(
    source: &str,
    config: &TransformConfig,
) -> Result<(String, Report), TransformError> {
    config.thicken.validate()?;

    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut doc = Document::parse(source).map_err(|error| TransformError::Parse {
        error,
        text: source.to_string(),
    })?;

    if config.normalize_namespace {
        doc.normalize_default_namespace(SVG_NAMESPACE);
    }

    let removed = remove_background_paths(&mut doc.root, &config.thicken);
    let thickened = thicken_paths(&mut doc.root, &config.thicken);

    let svg = doc.to_xml().map_err(TransformError::Serialize)?;
    Ok((
        svg,
        Report {
            removed: removed.len(),
            thickened,
        },
    ))
}

/// Write `contents` to `path` via a temporary file in the same directory.
///
/// An existing output keeps its permissions; a new one gets `fallback`.
fn write_atomically(
    path: &Path,
    contents: &[u8],
    fallback: Option<Permissions>,
) -> Result<(), TransformError> {
    let write_err = |source| TransformError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(contents).map_err(write_err)?;
    file.flush().map_err(write_err)?;

    let permissions = fs::metadata(path).map(|m| m.permissions()).ok().or(fallback);
    if let Some(permissions) = permissions {
        file.as_file().set_permissions(permissions).map_err(write_err)?;
    }

    file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

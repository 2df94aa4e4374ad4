//! `hygen.toml` configuration.
//!
//! ```toml
//! [render]
//! indent = 2
//! width = 80
//! numbering = "canonical"
//! ```

use std::{path::Path, str::FromStr};

use serde::Deserialize;

use crate::{Error, Result};

/// Root of a `hygen.toml` file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Rendering options for generated code.
    #[serde(default)]
    pub render: RenderConfig,
}

/// How identifiers are numbered when code is rendered to text.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Numbering {
    /// Renumber identifiers by first appearance in each rendered form.
    ///
    /// Output is stable across runs, which keeps snapshots reproducible.
    #[default]
    Canonical,
    /// Show the process-wide counter value.
    Global,
}

/// The `[render]` table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Spaces per indentation level.
    pub indent: u8,
    /// Preferred maximum line width before a form is broken across lines.
    pub width: usize,
    /// Identifier numbering style.
    pub numbering: Numbering,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            width: 80,
            numbering: Numbering::Canonical,
        }
    }
}

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, "hygen.toml")
    }
}

impl Config {
    /// Parse a hygen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_config(&content, &path.display().to_string())
    }

    /// Parse a hygen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_config(content, filename)
    }
}

fn parse_config(content: &str, filename: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
    validate_config(&config, content, filename)?;
    tracing::debug!(filename, ?config.render, "loaded configuration");
    Ok(config)
}

fn validate_config(config: &Config, src: &str, filename: &str) -> Result<()> {
    if !(1..=8).contains(&config.render.indent) {
        let span = find_key_span(src, "indent");
        return Err(Error::validation(
            "render indent must be between 1 and 8 spaces",
            src,
            filename,
            span,
        ));
    }
    if config.render.width == 0 {
        let span = find_key_span(src, "width");
        return Err(Error::validation(
            "render width must be greater than zero",
            src,
            filename,
            span,
        ));
    }
    Ok(())
}

/// Locate `key =` in the source for error labels.
fn find_key_span(src: &str, key: &str) -> Option<miette::SourceSpan> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let is_key = trimmed
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if is_key {
            let start = offset + (line.len() - trimmed.len());
            return Some((start, key.len()).into());
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults_for_empty_file() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.render.indent, 2);
        assert_eq!(config.render.numbering, Numbering::Canonical);
    }

    #[test]
    fn test_parse_render_table() {
        let config: Config = r#"
            [render]
            indent = 4
            width = 100
            numbering = "global"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.render.indent, 4);
        assert_eq!(config.render.width, 100);
        assert_eq!(config.render.numbering, Numbering::Global);
    }

    #[test]
    fn test_partial_render_table_keeps_defaults() {
        let config: Config = "[render]\nindent = 4\n".parse().unwrap();
        assert_eq!(config.render.indent, 4);
        assert_eq!(config.render.width, 80);
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let err = "[render]\ncolour = true\n".parse::<Config>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_zero_width_is_validation_error() {
        let src = "[render]\nwidth = 0\n";
        let err = src.parse::<Config>().unwrap_err();
        match *err {
            Error::Validation { span, .. } => {
                let span = span.expect("span should point at the key");
                assert_eq!(span.offset(), 9);
                assert_eq!(span.len(), 5);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_indent_outside_range_is_validation_error() {
        for src in ["[render]\nindent = 0\n", "[render]\nindent = 9\n"] {
            let err = src.parse::<Config>().unwrap_err();
            assert!(matches!(*err, Error::Validation { .. }), "{src}");
        }
        let config: Config = "[render]\nindent = 8\n".parse().unwrap();
        assert_eq!(config.render.indent, 8);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nwidth = 60").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.render.width, 60);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("hygen.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}

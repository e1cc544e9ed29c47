//! Template-driven batch configuration.
//!
//! A template config derives a per-file [`Config`](crate::config::Config)
//! from the file's own name. The file pattern is written with two
//! placeholder forms, `$name$` for digits and `%name%` for any text:
//!
//! ```json
//! {
//!     "file_pattern": "fables_$volume$_$fable$_aesop_64kb.mp3",
//!     "overrides": { "reader": "Unknown" },
//!     "output_pattern": "{volume}-{fable}.mp3",
//!     "frames_template": "frames.json",
//!     "behavior": { "missing-tag": "add" }
//! }
//! ```
//!
//! `frames_template` points at a JSON file (kept external so its quotes
//! don't need escaping) whose `{name}` placeholders are filled from the
//! pattern captures, the overrides, and the aggregate variables `{count}`
//! and `{total}` that the caller injects. The rendered text must parse as
//! a frame config.

use crate::config::{Config, ConfigError};
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::error;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;

/// Variables available to a template: pattern captures, overrides, and the
/// caller's aggregate counters.
pub type Vars = IndexMap<String, String>;

pub struct TemplateConfig {
    file_pattern: Regex,
    overrides: IndexMap<String, String>,
    output_pattern: Option<String>,
    frames_template: String,
    add_missing_tag: bool,
}

impl TemplateConfig {
    /// Loads a template config and the frames template it references.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let raw: RawTemplateConfig = serde_json::from_str(&fs::read_to_string(path)?)?;

        let file_pattern = compile_pattern(&raw.file_pattern)?;
        let frames_template = fs::read_to_string(&raw.frames_template)?;

        let overrides = raw
            .overrides
            .into_iter()
            .map(|(name, value)| (name, value_to_string(value)))
            .collect();

        let add_missing_tag = raw.behavior.get("missing-tag").map(String::as_str) == Some("add");

        Ok(TemplateConfig {
            file_pattern,
            overrides,
            output_pattern: raw.output_pattern,
            frames_template,
            add_missing_tag,
        })
    }

    /// Whether a file with no ID3 identifier should get a fresh tag
    /// instead of being skipped.
    pub fn add_missing_tag(&self) -> bool {
        self.add_missing_tag
    }

    /// Matches a path against the file pattern. On a match, returns the
    /// named captures merged with the overrides (overrides win). Captures
    /// named `ignore` are dropped.
    pub fn match_path(&self, path: &str) -> Option<Vars> {
        let caps = self.file_pattern.captures(path)?;

        let mut vars = Vars::new();

        for name in self.file_pattern.capture_names().flatten() {
            if name == "ignore" {
                continue;
            }

            if let Some(m) = caps.name(name) {
                vars.insert(name.to_string(), m.as_str().to_string());
            }
        }

        for (name, value) in &self.overrides {
            vars.insert(name.clone(), value.clone());
        }

        Some(vars)
    }

    /// Renders the frames template with the given variables and parses the
    /// result as a frame config.
    pub fn render_frames(&self, vars: &Vars) -> Result<Config, TemplateError> {
        let rendered = substitute(&self.frames_template, vars)?;
        Ok(Config::from_json(&rendered)?)
    }

    /// Renders the output file pattern, if the config has one.
    pub fn render_output(&self, vars: &Vars) -> Result<Option<String>, TemplateError> {
        match &self.output_pattern {
            Some(pattern) => Ok(Some(substitute(pattern, vars)?)),
            None => Ok(None),
        }
    }
}

#[derive(Deserialize)]
struct RawTemplateConfig {
    file_pattern: String,
    #[serde(default)]
    overrides: IndexMap<String, Value>,
    #[serde(default)]
    output_pattern: Option<String>,
    frames_template: String,
    #[serde(default)]
    behavior: IndexMap<String, String>,
}

/// Rewrites the readable pattern forms into named capture groups and
/// compiles the result. The rest of the pattern is passed to the regex
/// engine untouched.
fn compile_pattern(pattern: &str) -> Result<Regex, TemplateError> {
    let digits = Regex::new(r"\$(\w+)\$").unwrap();
    let words = Regex::new(r"%(\w+)%").unwrap();

    let pattern = digits.replace_all(pattern, r"(?P<${1}>\d+)");
    let pattern = words.replace_all(&pattern, r"(?P<${1}>.+)");

    Regex::new(&pattern).map_err(TemplateError::Pattern)
}

/// Replaces every `{name}` placeholder from `vars`. A placeholder with no
/// matching variable is an error rather than an empty string, since it
/// would silently produce broken tags across a whole batch.
fn substitute(template: &str, vars: &Vars) -> Result<String, TemplateError> {
    let placeholder = Regex::new(r"\{(\w+)\}").unwrap();

    let mut out = String::new();
    let mut last = 0;

    for caps in placeholder.captures_iter(template) {
        let whole = caps.get(0).unwrap();
        let name = caps.get(1).unwrap().as_str();

        let value = vars
            .get(name)
            .ok_or_else(|| TemplateError::MissingVar(name.to_string()))?;

        out.push_str(&template[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
    }

    out.push_str(&template[last..]);

    Ok(out)
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[derive(Debug)]
pub enum TemplateError {
    Io(io::Error),
    Json(serde_json::Error),
    Pattern(regex::Error),
    MissingVar(String),
    Config(ConfigError),
}

impl Display for TemplateError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TemplateError::Io(err) => write!(f, "{}", err),
            TemplateError::Json(err) => write!(f, "{}", err),
            TemplateError::Pattern(err) => write!(f, "invalid file pattern: {}", err),
            TemplateError::MissingVar(name) => {
                write!(f, "template variable {{{}}} has no value", name)
            }
            TemplateError::Config(err) => write!(f, "{}", err),
        }
    }
}

impl error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            TemplateError::Io(err) => Some(err),
            TemplateError::Json(err) => Some(err),
            TemplateError::Pattern(err) => Some(err),
            TemplateError::Config(err) => Some(err),
            TemplateError::MissingVar(_) => None,
        }
    }
}

impl From<io::Error> for TemplateError {
    fn from(err: io::Error) -> Self {
        TemplateError::Io(err)
    }
}

impl From<serde_json::Error> for TemplateError {
    fn from(err: serde_json::Error) -> Self {
        TemplateError::Json(err)
    }
}

impl From<ConfigError> for TemplateError {
    fn from(err: ConfigError) -> Self {
        TemplateError::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vars {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn pattern_captures_digits_and_words() {
        let pattern = compile_pattern("fables_$volume$_$fable$_%reader%.mp3").unwrap();
        let caps = pattern.captures("fables_01_07_aesop.mp3").unwrap();

        assert_eq!(&caps["volume"], "01");
        assert_eq!(&caps["fable"], "07");
        assert_eq!(&caps["reader"], "aesop");
    }

    #[test]
    fn pattern_rejects_non_digits() {
        let pattern = compile_pattern("track_$n$.mp3").unwrap();

        assert!(pattern.captures("track_ab.mp3").is_none());
        assert!(pattern.captures("track_12.mp3").is_some());
    }

    #[test]
    fn substitute_fills_placeholders() {
        let out = substitute(
            r#"{"frames": {"TIT2": {"information": "Chapter {chapter} of {total}"}}}"#,
            &vars(&[("chapter", "3"), ("total", "12")]),
        )
        .unwrap();

        assert_eq!(
            out,
            r#"{"frames": {"TIT2": {"information": "Chapter 3 of 12"}}}"#
        );
    }

    #[test]
    fn substitute_reports_missing_vars() {
        let result = substitute("{missing}", &Vars::new());

        assert!(matches!(result, Err(TemplateError::MissingVar(name)) if name == "missing"));
    }

    #[test]
    fn substitute_leaves_json_braces_alone() {
        let template = r#"{"frames": {}}"#;

        assert_eq!(substitute(template, &Vars::new()).unwrap(), template);
    }

    #[test]
    fn load_and_render() {
        let dir = tempfile::tempdir().unwrap();

        let frames_path = dir.path().join("frames.json");
        std::fs::write(
            &frames_path,
            r#"{"frames": {"TALB": {"information": "{album}"}, "TRCK": {"information": "{track}/{total}"}}}"#,
        )
        .unwrap();

        let config_path = dir.path().join("config.json");
        std::fs::write(
            &config_path,
            format!(
                r#"{{
                    "file_pattern": "fables_$track$.mp3",
                    "overrides": {{ "album": "Fables" }},
                    "output_pattern": "{{track}}-{{album}}.mp3",
                    "frames_template": {:?},
                    "behavior": {{ "missing-tag": "add" }}
                }}"#,
                frames_path
            ),
        )
        .unwrap();

        let config = TemplateConfig::load(&config_path).unwrap();
        assert!(config.add_missing_tag());

        assert!(config.match_path("something_else.mp3").is_none());

        let mut vars = config.match_path("fables_03.mp3").unwrap();
        assert_eq!(vars.get("track").map(String::as_str), Some("03"));
        assert_eq!(vars.get("album").map(String::as_str), Some("Fables"));

        vars.insert(String::from("total"), String::from("12"));

        let frames = config.render_frames(&vars).unwrap();
        assert_eq!(frames.frames.len(), 2);

        let out = config.render_output(&vars).unwrap();
        assert_eq!(out.as_deref(), Some("03-Fables.mp3"));
    }
}

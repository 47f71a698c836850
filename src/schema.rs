//! Part-of-speech normalization table.
//!
//! The table lives in `schema/pos.yaml` and is embedded at compile time. A
//! different file can be installed once at start-up with [`init_pos_schema`];
//! otherwise the embedded table is used on first access.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::Deserialize;

use crate::error::SchemaError;
use crate::pos::PartOfSpeech;

const EMBEDDED_SCHEMA: &str = include_str!("../schema/pos.yaml");

/// Characters trimmed from both ends of a label before matching.
const LABEL_PUNCTUATION: &[char] = &['(', ')', '.', ';', ':', ',', ' '];

static POS_SCHEMA: OnceCell<PosSchema> = OnceCell::new();

// === POS Schema YAML structures ===

#[derive(Debug, Deserialize)]
struct PosSchemaFile {
    pos_classes: Vec<PosClass>,
}

#[derive(Debug, Deserialize)]
struct PosClass {
    code: String,
    #[allow(dead_code)]
    name: String,
    #[allow(dead_code)]
    description: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    abbreviations: Vec<String>,
    #[serde(default)]
    exact: Vec<String>,
}

#[derive(Debug)]
struct PosMatcher {
    pos: PartOfSpeech,
    keywords: Vec<String>,
    abbreviations: Vec<Regex>,
    exact: HashSet<String>,
}

impl PosMatcher {
    fn matches(&self, label: &str) -> bool {
        self.keywords.iter().any(|k| label.contains(k.as_str()))
            || self.abbreviations.iter().any(|re| re.is_match(label))
            || self.exact.contains(label)
    }
}

/// Ordered list of part-of-speech classes; the first match wins.
#[derive(Debug)]
pub struct PosSchema {
    classes: Vec<PosMatcher>,
}

impl PosSchema {
    pub fn from_yaml(contents: &str) -> Result<Self, SchemaError> {
        let file: PosSchemaFile = serde_yaml::from_str(contents)?;

        let classes = file
            .pos_classes
            .into_iter()
            .map(|class| {
                let pos = PartOfSpeech::from_code(&class.code)
                    .ok_or_else(|| SchemaError::UnknownCode(class.code.clone()))?;
                let abbreviations = class
                    .abbreviations
                    .iter()
                    .map(|abbr| {
                        let pattern = format!(r"\b{}\b", regex::escape(&abbr.to_lowercase()));
                        Regex::new(&pattern).map_err(|e| SchemaError::Pattern(abbr.clone(), e))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PosMatcher {
                    pos,
                    keywords: class.keywords.iter().map(|k| k.to_lowercase()).collect(),
                    abbreviations,
                    exact: class.exact.iter().map(|e| e.to_lowercase()).collect(),
                })
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;

        Ok(PosSchema { classes })
    }

    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let contents = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn embedded() -> Self {
        Self::from_yaml(EMBEDDED_SCHEMA).expect("embedded schema/pos.yaml is valid")
    }

    /// Map a free-text label or abbreviation onto the closed code set.
    pub fn normalize(&self, raw: &str) -> Option<PartOfSpeech> {
        let lowered = raw.trim().to_lowercase();
        let label = lowered.trim_matches(LABEL_PUNCTUATION);
        if label.is_empty() {
            return None;
        }
        self.classes
            .iter()
            .find(|class| class.matches(label))
            .map(|class| class.pos)
    }
}

/// Install the table used by [`pos_schema`]. `None` keeps the embedded table.
pub fn init_pos_schema(path: Option<&Path>) -> Result<(), SchemaError> {
    let schema = match path {
        Some(p) => PosSchema::load(p)?,
        None => PosSchema::embedded(),
    };
    POS_SCHEMA
        .set(schema)
        .map_err(|_| SchemaError::AlreadyInitialized)
}

pub fn pos_schema() -> &'static PosSchema {
    POS_SCHEMA.get_or_init(PosSchema::embedded)
}

/// Normalize with the process-wide table.
pub fn normalize_part_of_speech(raw: &str) -> Option<PartOfSpeech> {
    pos_schema().normalize(raw)
}

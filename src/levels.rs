//! Level packs
//!
//! A pack is a JSON array of level schemas, each schema an array of row
//! strings:
//!
//! ```json
//! [["     ", "  o  ", " @   ", "xxxxx"], ["..."]]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, SimResult};
use crate::sim::{Level, LevelParser};

/// Rows of a single level
pub type Schema = Vec<String>;

/// Ordered collection of level schemas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelPack {
    pub schemas: Vec<Schema>,
}

/// Levels shipped with the runner
const BUILTIN: &[&[&str]] = &[
    &[
        "                      ",
        "                      ",
        "  |           o      ",
        "                      ",
        "     !xxx       x     ",
        " @        =   xxxxx  ",
        "xxxxx!!!!!xxxxxxxxxxxx",
    ],
    &[
        "      v                 ",
        "                        ",
        "                        ",
        "  o                 o   ",
        "                  xxxxx ",
        "                        ",
        "  @         x          ",
        "xxxxx!!!!!!!xxxxxx  xxx ",
        "                        ",
    ],
    &[
        "        |           |  ",
        "                       ",
        "  =       o   o     = ",
        "   xxxxxxxxxxxxxxx     ",
        "@                      ",
        "xxxxxxx     xxxxxxxxxxx",
        "      x!!!!!x          ",
    ],
];

impl LevelPack {
    pub fn new(schemas: Vec<Schema>) -> Self {
        Self { schemas }
    }

    /// The levels bundled with the crate
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN
                .iter()
                .map(|rows| rows.iter().map(|r| r.to_string()).collect())
                .collect(),
        )
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let pack: Self = serde_json::from_str(json)?;
        if pack.schemas.is_empty() {
            return Err(LoadError::Empty);
        }
        Ok(pack)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let pack = Self::from_json(&json)?;
        log::info!("Loaded {} levels from {}", pack.len(), path.display());
        Ok(pack)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Build the level at `index`, or `None` past the end of the pack
    pub fn level(&self, index: usize, parser: &mut LevelParser) -> SimResult<Option<Level>> {
        self.schemas
            .get(index)
            .map(|schema| parser.parse(schema.as_slice()))
            .transpose()
    }
}

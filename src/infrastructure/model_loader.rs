use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::model::ProgramModel;

pub struct ModelLoader;

impl ModelLoader {
    /// Load and parse the analysis model document. Any failure here is
    /// fatal for the whole run; no partial report is valid without it.
    pub fn load(path: &Path) -> Result<ProgramModel> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read analysis model {}", path.display()))?;

        let model: ProgramModel = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse analysis model {}", path.display()))?;

        Ok(model)
    }
}

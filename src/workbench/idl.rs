//! Anchor IDL loading.
//!
//! `anchor build` writes one IDL JSON per program under `target/idl/`.
//! Only the pieces the workbench needs are modeled: the program name and
//! the instruction list with argument names and types. Pre-0.30 IDLs
//! carry the name at the top level, newer ones under `metadata`.
use crate::logging;
use crate::{Result, WorkbenchError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramIdl {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    pub metadata: Option<IdlMetadata>,
    #[serde(default)]
    pub instructions: Vec<IdlInstruction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    #[serde(default)]
    pub args: Vec<IdlField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: serde_json::Value,
}

impl IdlField {
    /// Render the argument type for the operator. Simple types are plain
    /// strings in the IDL; composite types are kept as compact JSON.
    pub fn type_display(&self) -> String {
        match &self.ty {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl ProgramIdl {
    pub fn program_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.metadata.as_ref().and_then(|m| m.name.as_deref()))
            .unwrap_or("<unnamed>")
    }

    pub fn parse(content: &str) -> Result<Self> {
        let idl: ProgramIdl = serde_json::from_str(content)
            .map_err(|e| WorkbenchError::IdlError(format!("Invalid IDL JSON: {}", e)))?;
        Ok(idl)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            WorkbenchError::IdlError(format!("Failed to read IDL {:?}: {}", path.as_ref(), e))
        })?;
        let idl = Self::parse(&content)?;
        logging::log_idl_loaded(idl.program_name(), idl.instructions.len());
        Ok(idl)
    }
}

/// Load every `*.json` IDL in a directory, sorted by program name.
/// A missing directory yields an empty list, since it just means nothing
/// has been compiled yet.
pub fn load_idl_dir(dir: &Path) -> Result<Vec<ProgramIdl>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir)
        .map_err(|e| WorkbenchError::IdlError(format!("Failed to read IDL dir {:?}: {}", dir, e)))?;

    let mut idls = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| WorkbenchError::IdlError(format!("Failed to read IDL dir entry: {}", e)))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        match ProgramIdl::load(&path) {
            Ok(idl) => idls.push(idl),
            Err(e) => {
                tracing::warn!(path = ?path, "Skipping unparsable IDL: {}", e);
            }
        }
    }

    idls.sort_by(|a, b| a.program_name().cmp(b.program_name()));
    Ok(idls)
}

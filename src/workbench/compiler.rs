//! Program compilation and deployment.
//!
//! Discovers the Anchor program crates in the workspace and drives
//! `anchor build` / `anchor deploy` for the operator's selection.
use crate::config::Config;
use crate::logging;
use crate::ui::formatter::Formatter;
use crate::ui::prompt::Prompter;
use crate::workbench::toolchain::Toolchain;
use crate::workbench::ProgramCompiler;
use crate::{Result, WorkbenchError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An Anchor program crate found in the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredProgram {
    pub name: String,
    pub path: PathBuf,
}

/// Scan `<programs_dir>/*/Cargo.toml` for program crates, sorted by name.
/// A missing programs directory yields an empty list.
pub fn discover_programs(programs_dir: &Path) -> Result<Vec<DiscoveredProgram>> {
    if !programs_dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(programs_dir).map_err(|e| {
        WorkbenchError::FileError(format!(
            "Failed to read programs dir {:?}: {}",
            programs_dir, e
        ))
    })?;

    let mut programs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            WorkbenchError::FileError(format!("Failed to read programs dir entry: {}", e))
        })?;
        let path = entry.path();
        let manifest = path.join("Cargo.toml");
        if !manifest.is_file() {
            continue;
        }

        let content = fs::read_to_string(&manifest).map_err(|e| {
            WorkbenchError::FileError(format!("Failed to read {:?}: {}", manifest, e))
        })?;
        let parsed: toml::Value = toml::from_str(&content).map_err(|e| {
            WorkbenchError::FileError(format!("Failed to parse {:?}: {}", manifest, e))
        })?;

        let Some(name) = parsed
            .get("package")
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str())
        else {
            tracing::warn!(manifest = ?manifest, "Skipping manifest without a package name");
            continue;
        };

        programs.push(DiscoveredProgram {
            name: name.to_string(),
            path,
        });
    }

    programs.sort_by(|a, b| a.name.cmp(&b.name));
    logging::log_programs_discovered(programs.len());
    Ok(programs)
}

/// Interactive compiler/deployer collaborator.
pub struct AnchorCompiler {
    toolchain: Arc<Toolchain>,
    programs_dir: PathBuf,
    deploy_after_build: bool,
    prompter: Prompter,
}

impl AnchorCompiler {
    pub fn new(toolchain: Arc<Toolchain>, config: &Config) -> Result<Self> {
        Ok(AnchorCompiler {
            toolchain,
            programs_dir: config.programs_dir(),
            deploy_after_build: config.deploy_after_build(),
            prompter: Prompter::new()?,
        })
    }

    fn build_and_maybe_deploy(&self, program: Option<&str>) -> Result<()> {
        let target = program.unwrap_or("all programs");
        logging::log_compile_start(target);
        self.toolchain.build(program)?;
        logging::log_compile_complete(target);
        println!("{}", Formatter::success(format!("Compiled {}", target)));

        if self.deploy_after_build {
            self.toolchain.deploy(program)?;
            println!("{}", Formatter::success(format!("Deployed {}", target)));
        }

        Ok(())
    }
}

impl ProgramCompiler for AnchorCompiler {
    fn compile_programs(&mut self) -> Result<()> {
        let programs = discover_programs(&self.programs_dir)?;
        if programs.is_empty() {
            println!(
                "{}",
                Formatter::warning(format!(
                    "No program crates found under {:?}. Nothing to compile.",
                    self.programs_dir
                ))
            );
            return Ok(());
        }

        self.toolchain.log_versions();

        let mut labels = vec!["All programs".to_string()];
        labels.extend(programs.iter().map(|p| p.name.clone()));

        let Some(picked) = self.prompter.pick("Which program(s)?", &labels)? else {
            return Ok(());
        };

        match picked {
            0 => self.build_and_maybe_deploy(None),
            i => self.build_and_maybe_deploy(Some(programs[i - 1].name.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_program(dir: &Path, folder: &str, name: &str) {
        let path = dir.join(folder);
        fs::create_dir_all(&path).unwrap();
        fs::write(
            path.join("Cargo.toml"),
            format!("[package]\nname = \"{}\"\nversion = \"0.1.0\"\n", name),
        )
        .unwrap();
    }

    #[test]
    fn test_discover_programs_sorted_by_name() {
        let temp_dir = TempDir::new().unwrap();
        write_program(temp_dir.path(), "zeta", "zeta-program");
        write_program(temp_dir.path(), "alpha", "alpha-program");

        let programs = discover_programs(temp_dir.path()).unwrap();
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].name, "alpha-program");
        assert_eq!(programs[1].name, "zeta-program");
    }

    #[test]
    fn test_discover_skips_non_crate_dirs() {
        let temp_dir = TempDir::new().unwrap();
        write_program(temp_dir.path(), "lottery", "lottery");
        fs::create_dir_all(temp_dir.path().join("not-a-crate")).unwrap();
        fs::write(temp_dir.path().join("stray-file"), "x").unwrap();

        let programs = discover_programs(temp_dir.path()).unwrap();
        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0].name, "lottery");
    }

    #[test]
    fn test_discover_missing_dir_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let programs = discover_programs(&temp_dir.path().join("does-not-exist")).unwrap();
        assert!(programs.is_empty());
    }
}

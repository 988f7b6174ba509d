//! Program-derived-address generation.
//!
//! A PDA is the SHA-256 of the seeds, the program id and a fixed marker,
//! accepted only when the digest is not a valid ed25519 curve point, so
//! no keypair can ever sign for it. `find_program_address` searches bump
//! seeds from 255 downward for the first off-curve digest.
use crate::config::Config;
use crate::logging;
use crate::ui::formatter::Formatter;
use crate::ui::prompt::Prompter;
use crate::workbench::PdaGenerator;
use crate::{Result, WorkbenchError};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum number of seeds accepted by a derivation
pub const MAX_SEEDS: usize = 16;
/// Maximum length of a single seed in bytes
pub const MAX_SEED_LEN: usize = 32;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// A 32-byte on-chain address, rendered as hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pubkey([u8; 32]);

impl Pubkey {
    pub fn new(bytes: [u8; 32]) -> Self {
        Pubkey(bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| WorkbenchError::PdaError(format!("Invalid hex program id: {}", e)))?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| {
            WorkbenchError::PdaError(format!("Program id must be 32 bytes, got {}", v.len()))
        })?;
        Ok(Pubkey(bytes))
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

fn is_on_curve(bytes: &[u8; 32]) -> bool {
    ed25519_dalek::VerifyingKey::from_bytes(bytes).is_ok()
}

fn validate_seeds(seeds: &[&[u8]], reserved: usize) -> Result<()> {
    if seeds.len() + reserved > MAX_SEEDS {
        return Err(WorkbenchError::PdaError(format!(
            "Too many seeds: {} (maximum {})",
            seeds.len(),
            MAX_SEEDS - reserved
        ))
        .into());
    }
    for (i, seed) in seeds.iter().enumerate() {
        if seed.len() > MAX_SEED_LEN {
            return Err(WorkbenchError::PdaError(format!(
                "Seed {} is {} bytes long (maximum {})",
                i,
                seed.len(),
                MAX_SEED_LEN
            ))
            .into());
        }
    }
    Ok(())
}

/// Derive the address for an exact seed list. Fails when the digest
/// lands on the ed25519 curve.
pub fn create_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<Pubkey> {
    validate_seeds(seeds, 0)?;

    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(program_id.to_bytes());
    hasher.update(PDA_MARKER);
    let digest: [u8; 32] = hasher.finalize().into();

    if is_on_curve(&digest) {
        return Err(
            WorkbenchError::PdaError("Derived address lies on the ed25519 curve".to_string()).into(),
        );
    }

    Ok(Pubkey(digest))
}

/// Find the first bump seed (searching 255 down to 0) whose derivation
/// is off-curve, returning the address and the bump.
pub fn find_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    validate_seeds(seeds, 1)?;

    for bump in (0..=255u8).rev() {
        let bump_seed = [bump];
        let mut bumped: Vec<&[u8]> = seeds.to_vec();
        bumped.push(&bump_seed);

        if let Ok(address) = create_program_address(&bumped, program_id) {
            return Ok((address, bump));
        }
    }

    Err(WorkbenchError::PdaError("No viable bump seed found".to_string()).into())
}

/// Read the program id from an Anchor deploy keypair (a JSON array of
/// 64 bytes; the public key is the trailing half).
pub fn read_program_id_from_keypair<P: AsRef<Path>>(path: P) -> Result<Pubkey> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        WorkbenchError::KeypairError(format!(
            "Failed to read keypair file {:?}: {}",
            path.as_ref(),
            e
        ))
    })?;

    let bytes: Vec<u8> = serde_json::from_str(&content).map_err(|e| {
        WorkbenchError::KeypairError(format!(
            "Failed to parse keypair file {:?}: {}",
            path.as_ref(),
            e
        ))
    })?;

    if bytes.len() != 64 {
        return Err(WorkbenchError::KeypairError(format!(
            "Keypair file {:?} holds {} bytes, expected 64",
            path.as_ref(),
            bytes.len()
        ))
        .into());
    }

    let mut public = [0u8; 32];
    public.copy_from_slice(&bytes[32..]);
    Ok(Pubkey(public))
}

/// A deployed program keypair found in the artifacts directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedProgram {
    pub name: String,
    pub keypair_path: PathBuf,
}

/// Scan `<deploy_dir>/*-keypair.json`, sorted by program name.
pub fn discover_keypairs(deploy_dir: &Path) -> Result<Vec<DeployedProgram>> {
    if !deploy_dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(deploy_dir).map_err(|e| {
        WorkbenchError::FileError(format!("Failed to read deploy dir {:?}: {}", deploy_dir, e))
    })?;

    let mut programs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            WorkbenchError::FileError(format!("Failed to read deploy dir entry: {}", e))
        })?;
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(name) = file_name.strip_suffix("-keypair.json") else {
            continue;
        };
        programs.push(DeployedProgram {
            name: name.to_string(),
            keypair_path: path.clone(),
        });
    }

    programs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(programs)
}

/// Interactive PDA generation collaborator.
pub struct PdaTool {
    deploy_dir: PathBuf,
    prompter: Prompter,
}

impl PdaTool {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(PdaTool {
            deploy_dir: config.artifacts_dir().join("deploy"),
            prompter: Prompter::new()?,
        })
    }

    /// Prompt for seeds until an empty line. `None` means cancelled.
    fn collect_seeds(&mut self) -> Result<Option<Vec<Vec<u8>>>> {
        let mut seeds: Vec<Vec<u8>> = Vec::new();
        loop {
            let prompt = format!("Seed {} (empty to finish): ", seeds.len() + 1);
            let Some(value) = self.prompter.read_line(&prompt)? else {
                return Ok(None);
            };
            if value.is_empty() {
                return Ok(Some(seeds));
            }
            if value.len() > MAX_SEED_LEN {
                println!(
                    "{}",
                    Formatter::warning(format!(
                        "Seeds are limited to {} bytes, got {}",
                        MAX_SEED_LEN,
                        value.len()
                    ))
                );
                continue;
            }
            seeds.push(value.into_bytes());
            if seeds.len() == MAX_SEEDS - 1 {
                // One slot is reserved for the bump seed
                return Ok(Some(seeds));
            }
        }
    }
}

impl PdaGenerator for PdaTool {
    fn choose_program_for_derivation(&mut self) -> Result<()> {
        let programs = discover_keypairs(&self.deploy_dir)?;
        if programs.is_empty() {
            println!(
                "{}",
                Formatter::warning(format!(
                    "No program keypairs found under {:?}. Build the programs first.",
                    self.deploy_dir
                ))
            );
            return Ok(());
        }

        let labels: Vec<String> = programs.iter().map(|p| p.name.clone()).collect();
        let Some(i) = self.prompter.pick("Which program?", &labels)? else {
            return Ok(());
        };
        let program = &programs[i];

        let program_id = read_program_id_from_keypair(&program.keypair_path)?;
        println!(
            "{}",
            Formatter::info(format!("Program id: {}", program_id))
        );

        let Some(seeds) = self.collect_seeds()? else {
            return Ok(());
        };

        let seed_refs: Vec<&[u8]> = seeds.iter().map(|s| s.as_slice()).collect();
        let (address, bump) = find_program_address(&seed_refs, &program_id)?;

        logging::log_pda_derived(&program.name, bump);
        println!(
            "{}",
            Formatter::success(format!(
                "Derived address: {}",
                Formatter::format_derived_address(&address.to_string(), bump)
            ))
        );

        Ok(())
    }
}

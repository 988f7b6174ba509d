use anchor_workbench::workbench::pda::{
    discover_keypairs, find_program_address, read_program_id_from_keypair,
};
use std::fs;
use tempfile::TempDir;

fn write_keypair(dir: &std::path::Path, name: &str, public: [u8; 32]) -> std::path::PathBuf {
    let mut bytes = vec![1u8; 32];
    bytes.extend_from_slice(&public);
    let path = dir.join(format!("{}-keypair.json", name));
    fs::write(&path, serde_json::to_string(&bytes).unwrap()).unwrap();
    path
}

#[test]
fn test_read_program_id_takes_trailing_half() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_keypair(temp_dir.path(), "lottery", [9u8; 32]);

    let program_id = read_program_id_from_keypair(&path).unwrap();
    assert_eq!(program_id.to_bytes(), [9u8; 32]);
}

#[test]
fn test_read_program_id_rejects_wrong_length() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("short-keypair.json");
    fs::write(&path, serde_json::to_string(&vec![1u8; 63]).unwrap()).unwrap();

    assert!(read_program_id_from_keypair(&path).is_err());
}

#[test]
fn test_read_program_id_rejects_non_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad-keypair.json");
    fs::write(&path, "not json").unwrap();

    assert!(read_program_id_from_keypair(&path).is_err());
}

#[test]
fn test_discover_keypairs_sorted_and_filtered() {
    let temp_dir = TempDir::new().unwrap();
    write_keypair(temp_dir.path(), "zeta", [1u8; 32]);
    write_keypair(temp_dir.path(), "alpha", [2u8; 32]);
    fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();
    fs::write(temp_dir.path().join("program.json"), "[]").unwrap();

    let programs = discover_keypairs(temp_dir.path()).unwrap();
    let names: Vec<&str> = programs.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}

#[test]
fn test_discover_keypairs_missing_dir_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let programs = discover_keypairs(&temp_dir.path().join("absent")).unwrap();
    assert!(programs.is_empty());
}

#[test]
fn test_derivation_from_keypair_file_is_stable() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_keypair(temp_dir.path(), "lottery", [42u8; 32]);
    let program_id = read_program_id_from_keypair(&path).unwrap();

    let seeds: &[&[u8]] = &[b"lottery", b"player1"];
    let first = find_program_address(seeds, &program_id).unwrap();
    let second = find_program_address(seeds, &program_id).unwrap();
    assert_eq!(first, second);
}

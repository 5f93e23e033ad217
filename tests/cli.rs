/*!
 * Integration tests for the dirbook binary
 */

use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn dirbook() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dirbook"))
}

#[test]
fn test_writes_document() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("project");
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/lib.rs"), "// doc\npub fn one() -> u8 { 1 }\n").unwrap();
    let output_file = temp_dir.path().join("export.md");

    let status = dirbook()
        .arg(&root)
        .arg(&output_file)
        .arg("--no-typecheck")
        .status()
        .unwrap();
    assert!(status.success());

    let markdown = fs::read_to_string(&output_file).unwrap();
    assert!(markdown.contains("# Project Structure"));
    assert!(markdown.contains("## src/lib.rs\n```rust\npub fn one() -> u8 { 1 }\n```"));
}

#[test]
fn test_no_strip_flag() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("a.py"), "x = 1  # keep\n").unwrap();
    let output_file = temp_dir.path().join("out.md");

    let status = dirbook()
        .arg(temp_dir.path())
        .arg(&output_file)
        .args(["--no-typecheck", "--no-strip"])
        .status()
        .unwrap();
    assert!(status.success());

    let markdown = fs::read_to_string(&output_file).unwrap();
    assert!(markdown.contains("```python\nx = 1  # keep\n```"));
    // The output file never lists itself
    assert!(!markdown.contains("## out.md"));
}

#[test]
fn test_missing_root_exits_with_2() {
    let temp_dir = tempdir().unwrap();
    let output_file = temp_dir.path().join("out.md");

    let status = dirbook()
        .arg(temp_dir.path().join("missing"))
        .arg(&output_file)
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(2));
    assert!(!output_file.exists());
}

#[test]
fn test_file_root_exits_with_2() {
    let temp_dir = tempdir().unwrap();
    let file = temp_dir.path().join("file.txt");
    fs::write(&file, "x").unwrap();

    let status = dirbook()
        .arg(&file)
        .arg(temp_dir.path().join("out.md"))
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(2));
}

#[test]
fn test_unwritable_output_exits_with_1() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
    let blocked = temp_dir.path().join("blocked");
    fs::create_dir(&blocked).unwrap();

    // The output path is an existing directory
    let status = dirbook()
        .arg(temp_dir.path())
        .arg(&blocked)
        .arg("--no-typecheck")
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
}

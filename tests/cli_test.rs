mod common;

use anyhow::Result;
use assert_cmd::Command;
use common::TestTree;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A `treewalk` command run from `tree`'s root, isolated from the user's
/// configuration and git settings
fn treewalk(tree: &TestTree, home: &TempDir) -> Result<Command> {
    let mut cmd = Command::cargo_bin("treewalk")?;
    cmd.current_dir(tree.root())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("xdg"))
        .env("TREEWALK_CONFIG_PATH", home.path().join("treewalk.toml"))
        .env("GIT_CONFIG_GLOBAL", home.path().join("gitconfig"))
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env_remove("RUST_LOG");
    Ok(cmd)
}

fn scenario() -> TestTree {
    TestTree::with_files(&[
        ("a.py", ""),
        (".hidden/x.py", ""),
        ("sub/.gitignore", "ignored.py\n"),
        ("sub/ignored.py", ""),
        ("sub/kept.py", ""),
        ("notes.txt", ""),
    ])
}

#[test]
fn test_lists_found_files() -> Result<()> {
    let tree = scenario();
    let home = TempDir::new()?;

    treewalk(&tree, &home)?
        .assert()
        .code(0)
        .stdout("a.py\nsub/kept.py\n");

    Ok(())
}

#[test]
fn test_hidden_and_no_ignore_flags() -> Result<()> {
    let tree = scenario();
    let home = TempDir::new()?;

    treewalk(&tree, &home)?
        .args(["--hidden", "--no-ignore-vcs"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains(".hidden/x.py"))
        .stdout(predicate::str::contains("sub/ignored.py"));

    Ok(())
}

#[test]
fn test_glob_flag() -> Result<()> {
    let tree = scenario();
    let home = TempDir::new()?;

    treewalk(&tree, &home)?
        .args(["-g", "*.txt"])
        .assert()
        .code(0)
        .stdout("notes.txt\n");

    Ok(())
}

#[test]
fn test_nothing_found_exits_one() -> Result<()> {
    let tree = scenario();
    let home = TempDir::new()?;

    treewalk(&tree, &home)?
        .args(["-g", "*.rs"])
        .assert()
        .code(1)
        .stdout("");

    Ok(())
}

#[test]
fn test_missing_path_exits_two() -> Result<()> {
    let tree = scenario();
    let home = TempDir::new()?;

    treewalk(&tree, &home)?
        .args(["nope", "sub"])
        .assert()
        .code(2)
        .stdout("sub/kept.py\n")
        .stderr(predicate::str::contains("nope: No such file or directory"));

    Ok(())
}

#[test]
fn test_quiet_prints_nothing() -> Result<()> {
    let tree = scenario();
    let home = TempDir::new()?;

    treewalk(&tree, &home)?
        .args(["--quiet", "nope", "."])
        .assert()
        .code(0)
        .stdout("");

    Ok(())
}

#[test]
fn test_null_separator() -> Result<()> {
    let tree = scenario();
    let home = TempDir::new()?;

    treewalk(&tree, &home)?
        .arg("-0")
        .assert()
        .code(0)
        .stdout("a.py\0sub/kept.py\0");

    Ok(())
}

#[test]
fn test_explicit_ignored_file() -> Result<()> {
    let tree = scenario();
    let home = TempDir::new()?;

    treewalk(&tree, &home)?
        .arg("sub/ignored.py")
        .assert()
        .code(0)
        .stdout("sub/ignored.py\n");

    Ok(())
}

#[test]
fn test_parallel_output_matches() -> Result<()> {
    let tree = scenario();
    let home = TempDir::new()?;

    treewalk(&tree, &home)?
        .args(["--parallel", "-j", "2"])
        .assert()
        .code(0)
        .stdout("a.py\nsub/kept.py\n");

    Ok(())
}

#[test]
fn test_config_file_is_honored() -> Result<()> {
    let tree = scenario();
    let home = TempDir::new()?;
    fs::write(
        home.path().join("treewalk.toml"),
        "[walk]\ninclude_hidden = true\n",
    )?;

    treewalk(&tree, &home)?
        .assert()
        .code(0)
        .stdout(predicate::str::contains(".hidden/x.py"));

    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let tree = scenario();
    let home = TempDir::new()?;
    fs::write(home.path().join("treewalk.toml"), "[performance]\nthreads = 0\n")?;

    treewalk(&tree, &home)?
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Threads must be at least 1"));

    Ok(())
}

#[test]
fn test_invalid_glob_is_fatal() -> Result<()> {
    let tree = scenario();
    let home = TempDir::new()?;

    treewalk(&tree, &home)?
        .args(["-g", "[oops"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid glob pattern"));

    Ok(())
}

#[test]
fn test_print_config_reflects_flags() -> Result<()> {
    let tree = scenario();
    let home = TempDir::new()?;

    treewalk(&tree, &home)?
        .args(["--print-config", "-g", "*.pyi", "--no-ignore-dot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("glob = \"*.pyi\""))
        .stdout(predicate::str::contains("respect_dot_ignores = false"));

    Ok(())
}

#[test]
fn test_global_excludes_from_xdg_default() -> Result<()> {
    let tree = TestTree::with_files(&[("a.py", ""), ("b_gen.py", "")]);
    let home = TempDir::new()?;
    let git_dir = home.path().join("xdg/git");
    fs::create_dir_all(&git_dir)?;
    fs::write(git_dir.join("ignore"), "*_gen.py\n")?;

    treewalk(&tree, &home)?
        .assert()
        .code(0)
        .stdout("a.py\n");

    treewalk(&tree, &home)?
        .arg("--no-ignore-global")
        .assert()
        .code(0)
        .stdout("a.py\nb_gen.py\n");

    Ok(())
}

#[test]
fn test_debug_logs_skips() -> Result<()> {
    let tree = scenario();
    let home = TempDir::new()?;

    treewalk(&tree, &home)?
        .arg("--debug")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("matches ignore rules"));

    Ok(())
}

#[test]
fn test_completion() -> Result<()> {
    let tree = scenario();
    let home = TempDir::new()?;

    treewalk(&tree, &home)?
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("treewalk"));

    Ok(())
}

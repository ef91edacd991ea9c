use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Isolated home directory with git identity set through the environment
struct Home {
    _tmp: TempDir,
    path: PathBuf,
}

impl Home {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let path = dunce::canonicalize(tmp.path()).unwrap().join("home");
        fs::create_dir_all(&path).unwrap();
        Self { _tmp: tmp, path }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("homesync").unwrap();
        cmd.current_dir(&self.path)
            .env("HOME", &self.path)
            .env("XDG_CONFIG_HOME", self.path.join(".config"))
            .env_remove("HOMESYNC_DIR")
            .env_remove("RUST_LOG")
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_AUTHOR_NAME", "homesync")
            .env("GIT_AUTHOR_EMAIL", "homesync@example.com")
            .env("GIT_COMMITTER_NAME", "homesync")
            .env("GIT_COMMITTER_EMAIL", "homesync@example.com");
        cmd
    }

    fn repo(&self) -> PathBuf {
        self.path.join(".homesync")
    }

    fn write(&self, rel: &str, content: &str) {
        write(&self.path.join(rel), content);
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path.join(rel)).unwrap()
    }

    fn write_repo(&self, rel: &str, content: &str) {
        write(&self.repo().join(rel), content);
    }

    fn read_repo(&self, rel: &str) -> String {
        fs::read_to_string(self.repo().join(rel)).unwrap()
    }

    /// Initialized repository tracking `.bashrc` = "A"
    fn with_tracked_bashrc() -> Self {
        let home = Self::new();
        home.cmd().arg("init").assert().success();
        home.write(".bashrc", "A\n");
        home.cmd().args(["track", ".bashrc"]).assert().success();
        home
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_help_output() {
    let mut cmd = Command::cargo_bin("homesync").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("track"))
        .stdout(predicate::str::contains("sync-enter"))
        .stdout(predicate::str::contains("sync-exit"))
        .stdout(predicate::str::contains("shell"));
}

#[test]
fn test_version_output() {
    let mut cmd = Command::cargo_bin("homesync").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_init_twice_fails() {
    let home = Home::new();
    home.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized repository"));
    assert!(home.repo().join(".git").is_dir());

    home.cmd()
        .arg("init")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_repo_override_from_environment() {
    let home = Home::new();
    home.cmd()
        .env("HOMESYNC_DIR", home.path.join("dots"))
        .arg("init")
        .assert()
        .success();
    assert!(home.path.join("dots/.git").is_dir());
    assert!(!home.repo().exists());
}

#[test]
fn test_track_missing_path_fails() {
    let home = Home::new();
    home.cmd().arg("init").assert().success();
    home.cmd()
        .args(["track", ".nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no such file or directory"));
}

#[test]
fn test_sync_exit_without_repository_fails() {
    let home = Home::new();
    home.cmd()
        .arg("sync-exit")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn test_sync_enter_mirrors_live_edits() {
    let home = Home::with_tracked_bashrc();
    home.write(".bashrc", "B\n");

    home.cmd()
        .arg("sync-enter")
        .assert()
        .success()
        .stderr(predicate::str::contains("Updated:   1"));
    assert_eq!(home.read_repo(".bashrc"), "B\n");
}

#[test]
fn test_sync_exit_restores_repository_edit() {
    let home = Home::with_tracked_bashrc();
    home.cmd().arg("sync-enter").assert().success();
    home.write_repo(".bashrc", "B\n");

    // Live copy unchanged since tracking: no prompt needed
    home.cmd().arg("sync-exit").write_stdin("").assert().success();
    assert_eq!(home.read(".bashrc"), "B\n");
}

#[test]
fn test_conflict_backup_policy() {
    let home = Home::with_tracked_bashrc();
    home.write(".bashrc", "C\n");
    home.write_repo(".bashrc", "D\n");

    home.cmd()
        .args(["--conflict", "backup", "sync-exit"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Backups (1)"));

    assert_eq!(home.read(".bashrc"), "D\n");
    let backups: Vec<String> = fs::read_dir(&home.path)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(".bashrc.") && name.ends_with(".homesync-backup"))
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(home.read(&backups[0]), "C\n");
}

#[test]
fn test_invalid_answer_keeps_live() {
    let home = Home::with_tracked_bashrc();
    home.write(".bashrc", "C\n");
    home.write_repo(".bashrc", "D\n");

    home.cmd()
        .arg("sync-exit")
        .write_stdin("x\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid choice \"x\""));

    assert_eq!(home.read(".bashrc"), "C\n");
    assert_eq!(home.read_repo(".bashrc"), "D\n");
}

#[test]
fn test_diff_then_overwrite_answers() {
    let home = Home::with_tracked_bashrc();
    home.write(".bashrc", "C\n");
    home.write_repo(".bashrc", "D\n");

    home.cmd()
        .arg("sync-exit")
        .write_stdin("d\no\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("-C"))
        .stderr(predicate::str::contains("+D"))
        .stderr(predicate::str::contains("Invalid choice").not());

    assert_eq!(home.read(".bashrc"), "D\n");
}

#[test]
fn test_passthrough_translates_home_paths() {
    let home = Home::with_tracked_bashrc();

    // An absolute live path names the tracked file inside the repository
    home.cmd()
        .args(["ls-files", "--error-unmatch"])
        .arg(home.path.join(".bashrc"))
        .assert()
        .success()
        .stdout(predicate::str::contains(".bashrc"));
}

#[test]
fn test_passthrough_from_inside_repository() {
    let home = Home::with_tracked_bashrc();

    home.cmd()
        .current_dir(home.repo())
        .args(["ls-files", "--error-unmatch", ".bashrc"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".bashrc"))
        .stderr(predicate::str::contains(".homesync/.bashrc").not());
}

#[test]
fn test_passthrough_status_code() {
    let home = Home::with_tracked_bashrc();
    home.cmd()
        .args(["rev-parse", "--verify", "--quiet", "no-such-revision"])
        .assert()
        .code(1);
}

#[test]
fn test_passthrough_commit_then_restore() {
    let home = Home::with_tracked_bashrc();
    home.write(".bashrc", "B\n");

    // The commit sees the live edit mirrored in before it runs
    home.cmd()
        .args(["commit", "-q", "-a", "-m", "update"])
        .assert()
        .success();
    home.cmd()
        .args(["log", "-p", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+B"));
    assert_eq!(home.read(".bashrc"), "B\n");
}

#[test]
fn test_dry_run_leaves_repository_alone() {
    let home = Home::with_tracked_bashrc();
    home.write(".bashrc", "B\n");

    home.cmd()
        .args(["--dry-run", "sync-enter"])
        .assert()
        .success();
    assert_eq!(home.read_repo(".bashrc"), "A\n");
}

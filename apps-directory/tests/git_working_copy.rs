use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use apps_directory::{
    AppEntry, CommitOutcome, DirectoryConfig, GitHubToken, GitIdentity, GitWorkingCopy,
    RunOutcome, Runner, RunnerConfig, WorkingCopy, WriteError, WriteTransport,
};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

/// Runs git for fixture setup and returns stdout.
fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args([
            "-c",
            "user.name=Seed",
            "-c",
            "user.email=seed@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Creates a bare repository whose `main` holds one commit with `readme`.
///
/// Returns the bare repository and the scratch clone used to seed it.
fn bare_remote(root: &Path, name: &str, readme: &str) -> (PathBuf, PathBuf) {
    let bare = root.join(format!("{name}.git"));
    let seed = root.join(format!("{name}-seed"));
    fs::create_dir_all(&bare).unwrap();
    fs::create_dir_all(&seed).unwrap();

    git(&bare, &["init", "--bare"]);
    git(&seed, &["init"]);
    fs::write(seed.join("README.md"), readme).unwrap();
    git(&seed, &["add", "README.md"]);
    git(&seed, &["commit", "-m", "seed"]);
    git(&seed, &["push", &bare.display().to_string(), "HEAD:refs/heads/main"]);

    (bare, seed)
}

fn commit_count(bare: &Path) -> usize {
    git(bare, &["rev-list", "--count", "main"])
        .trim()
        .parse()
        .unwrap()
}

fn identity() -> GitIdentity {
    GitIdentity {
        name: "Apps Directory Bot".to_string(),
        email: "bot@example.com".to_string(),
    }
}

fn working_copy(path: &Path, remote: &Path) -> GitWorkingCopy {
    GitWorkingCopy::new(path, remote.display().to_string(), "main", identity())
}

fn runner() -> Runner {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    let directory = DirectoryConfig {
        org: "acme".to_string(),
        repo: "acme-apps".to_string(),
        transport: WriteTransport::WorkingCopy,
        header: "# Acme Apps".to_string(),
        ..DirectoryConfig::default()
    };
    let token = GitHubToken::parse(Some("ghp_test".to_string())).unwrap();
    Runner::new(RunnerConfig::new(directory, token)).unwrap()
}

fn apps() -> Vec<AppEntry> {
    vec![
        AppEntry::new("App-Clock", "https://github.com/acme/App-Clock", "Shows the time"),
        AppEntry::new("App-Timer", "https://github.com/acme/App-Timer", ""),
    ]
}

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, hour, 0, 0).unwrap()
}

#[tokio::test]
async fn pushes_once_across_two_runs() {
    let root = TempDir::new().unwrap();
    let (bare, _) = bare_remote(root.path(), "directory", "# Old\n");
    let copy = working_copy(&root.path().join("checkout"), &bare);
    let runner = runner();

    let first = runner
        .write_via_working_copy(&copy, &apps(), at(9))
        .await
        .unwrap();
    let second = runner
        .write_via_working_copy(&copy, &apps(), at(17))
        .await
        .unwrap();

    assert_eq!(first, RunOutcome::Committed);
    assert!(matches!(second, RunOutcome::Unchanged { .. }));
    assert_eq!(commit_count(&bare), 2);

    let pushed = git(&bare, &["show", "main:README.md"]);
    assert!(pushed.starts_with("# Acme Apps\n\n## Apps\n"));
    assert!(pushed.contains("- [App-Clock](https://github.com/acme/App-Clock) — Shows the time\n"));
    assert!(pushed.ends_with("_Last updated: 2026-10-18T09:00:00Z_\n"));
}

#[tokio::test]
async fn clean_tree_is_not_committed() {
    let root = TempDir::new().unwrap();
    let (bare, _) = bare_remote(root.path(), "directory", "# Same\n");
    let copy = working_copy(&root.path().join("checkout"), &bare);

    assert!(copy.ensure_clone().await.unwrap());
    let outcome = copy
        .commit_and_push_if_dirty(Path::new("README.md"), "chore: update Apps section")
        .await
        .unwrap();

    assert_eq!(outcome, CommitOutcome::Clean);
    assert_eq!(commit_count(&bare), 1);
}

#[tokio::test]
async fn sync_follows_the_current_remote() {
    let root = TempDir::new().unwrap();
    let (old, seed) = bare_remote(root.path(), "old", "# Directory\n");
    let new = root.path().join("new.git");
    git(
        root.path(),
        &["clone", "--bare", &old.display().to_string(), &new.display().to_string()],
    );
    fs::write(seed.join("NEW.md"), "moved\n").unwrap();
    git(&seed, &["add", "NEW.md"]);
    git(&seed, &["commit", "-m", "only on the new remote"]);
    git(&seed, &["push", &new.display().to_string(), "HEAD:refs/heads/main"]);

    let checkout = root.path().join("checkout");
    assert!(working_copy(&checkout, &old).ensure_clone().await.unwrap());

    let moved = working_copy(&checkout, &new);
    assert!(!moved.ensure_clone().await.unwrap());
    moved.sync_to_branch().await.unwrap();

    assert_eq!(
        git(&checkout, &["remote", "get-url", "origin"]).trim(),
        new.display().to_string()
    );
    assert!(checkout.join("NEW.md").exists());
}

#[tokio::test]
async fn token_is_not_stored_in_the_clone() {
    let root = TempDir::new().unwrap();
    let (bare, _) = bare_remote(root.path(), "directory", "# Directory\n");
    let checkout = root.path().join("checkout");
    let copy = working_copy(&checkout, &bare).with_token("ghp_secret");

    assert!(copy.ensure_clone().await.unwrap());
    copy.sync_to_branch().await.unwrap();

    let config = fs::read_to_string(checkout.join(".git/config")).unwrap();
    assert!(!config.contains("ghp_secret"));
    assert!(!config.contains("extraHeader"));
}

#[tokio::test]
async fn clone_of_missing_branch_fails() {
    let root = TempDir::new().unwrap();
    let (bare, _) = bare_remote(root.path(), "directory", "# Directory\n");
    let copy = GitWorkingCopy::new(
        root.path().join("checkout"),
        bare.display().to_string(),
        "does-not-exist",
        identity(),
    );

    let result = copy.ensure_clone().await;

    assert!(matches!(
        result,
        Err(WriteError::GitFailed { ref command, .. }) if command == "clone"
    ));
}

#[tokio::test]
async fn push_to_vanished_remote_fails() {
    let root = TempDir::new().unwrap();
    let (bare, _) = bare_remote(root.path(), "directory", "# Directory\n");
    let checkout = root.path().join("checkout");
    let copy = working_copy(&checkout, &bare);
    assert!(copy.ensure_clone().await.unwrap());

    fs::remove_dir_all(&bare).unwrap();
    fs::write(checkout.join("README.md"), "# Changed\n").unwrap();
    let result = copy
        .commit_and_push_if_dirty(Path::new("README.md"), "chore: update Apps section")
        .await;

    assert!(matches!(
        result,
        Err(WriteError::GitFailed { ref command, .. }) if command == "push"
    ));
}

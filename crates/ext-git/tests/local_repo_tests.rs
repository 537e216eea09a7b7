//! Tests for the libgit2-backed working copy against local upstreams

use ext_git::{ExtensionRepo, GitOpener, GitRepository, RepoOpener};
use ext_test_utils::git::{
    MAIN_BRANCH, commit_file, head_id, repo_with_commit, upstream_with_clone,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    upstream: git2::Repository,
    clone_path: std::path::PathBuf,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let upstream_path = temp.path().join("upstream");
    let clone_path = temp.path().join("extensions").join("foo");
    let (upstream, _clone) = upstream_with_clone(&upstream_path, &clone_path);
    Fixture {
        _temp: temp,
        upstream,
        clone_path,
    }
}

#[test]
fn test_head_commit_and_branch() {
    let temp = TempDir::new().unwrap();
    let repo = repo_with_commit(temp.path());
    let expected = head_id(&repo).to_string();

    let opened = GitOpener.open(temp.path()).unwrap();
    let head = opened.head_commit().unwrap();

    assert_eq!(head.hash, expected);
    assert_eq!(head.hash.len(), 40);
    assert_eq!(opened.current_branch().unwrap(), Some(MAIN_BRANCH.to_string()));
}

#[test]
fn test_detached_head_has_no_branch() {
    let temp = TempDir::new().unwrap();
    let repo = repo_with_commit(temp.path());
    repo.set_head_detached(head_id(&repo)).unwrap();

    let opened = GitRepository::open(temp.path()).unwrap();
    assert_eq!(opened.current_branch().unwrap(), None);
}

#[test]
fn test_remote_urls_lists_origin_first() {
    let f = fixture();
    let clone = git2::Repository::open(&f.clone_path).unwrap();
    clone.remote("aaa-mirror", "https://example.com/mirror.git").unwrap();

    let opened = GitRepository::open(&f.clone_path).unwrap();
    let urls = opened.remote_urls().unwrap();

    assert_eq!(urls.len(), 2);
    assert!(urls[0].ends_with("upstream"), "origin should be first: {urls:?}");
    assert_eq!(urls[1], "https://example.com/mirror.git");
}

#[test]
fn test_dry_run_fetch_up_to_date_after_clone() {
    let f = fixture();
    let opened = GitRepository::open(&f.clone_path).unwrap();

    let updates = opened.fetch(true, false).unwrap();

    assert!(!updates.is_empty());
    assert!(updates.iter().all(|u| u.up_to_date), "{updates:?}");
}

#[test]
fn test_dry_run_fetch_reports_new_commits_without_moving_refs() {
    let f = fixture();
    let new_tip = commit_file(&f.upstream, "feature.py", "print('x')\n", "Add feature");
    let opened = GitRepository::open(&f.clone_path).unwrap();
    let tracking_before = opened.resolve("origin").unwrap();

    let updates = opened.fetch(true, false).unwrap();

    let main = updates
        .iter()
        .find(|u| u.refname == format!("refs/remotes/origin/{MAIN_BRANCH}"))
        .expect("main should be advertised");
    assert!(!main.up_to_date);
    assert_eq!(main.new, new_tip.to_string());
    assert_eq!(opened.resolve("origin").unwrap(), tracking_before);
}

#[test]
fn test_fetch_moves_tracking_ref_and_reset_hard_follows() {
    let f = fixture();
    let new_tip = commit_file(&f.upstream, "feature.py", "print('x')\n", "Add feature");
    let opened = GitRepository::open(&f.clone_path).unwrap();

    let moved = opened.fetch(false, true).unwrap();
    assert!(moved.iter().any(|u| u.new == new_tip.to_string()), "{moved:?}");
    assert_eq!(opened.resolve("origin").unwrap(), new_tip.to_string());
    assert_ne!(opened.head_commit().unwrap().hash, new_tip.to_string());

    fs::write(f.clone_path.join("README.md"), "local edit\n").unwrap();
    opened.reset_hard("origin").unwrap();

    assert_eq!(opened.head_commit().unwrap().hash, new_tip.to_string());
    assert_eq!(
        fs::read_to_string(f.clone_path.join("README.md")).unwrap(),
        "# Test\n"
    );
    assert!(f.clone_path.join("feature.py").is_file());
}

#[test]
fn test_resolve_unknown_spec_errors() {
    let temp = TempDir::new().unwrap();
    repo_with_commit(temp.path());
    let opened = GitRepository::open(temp.path()).unwrap();

    assert!(opened.resolve("origin").is_err());
}

//! Update checks against real repositories with local upstreams

use std::fs;
use std::sync::Arc;

use ext_fs::FileCache;
use ext_git::{ExtensionRepo, GitOpener, GitRepository};
use ext_manager::{
    ActivationConfig, DEFAULT_SYNC_REF, ExtensionRoot, GitInfoCache, Registry, UpdateChecker,
    UpdateStatus,
};
use ext_test_utils::git::{MAIN_BRANCH, commit_file, head_id, upstream_with_clone};
use ext_test_utils::tree::ExtensionTree;
use git2::Repository;
use pretty_assertions::assert_eq;

/// A user extension `cloned` tracking a local upstream repository.
fn fixture() -> (ExtensionTree, Repository) {
    let tree = ExtensionTree::new();
    let upstream = tree.root().join("upstream");
    let clone = tree.user_root().join("cloned");
    let (upstream_repo, _clone_repo) = upstream_with_clone(&upstream, &clone);
    (tree, upstream_repo)
}

fn scan(tree: &ExtensionTree) -> Registry {
    Registry::scan(
        &[
            ExtensionRoot::builtin(tree.builtin_root()),
            ExtensionRoot::user(tree.user_root()),
        ],
        &ActivationConfig::default(),
    )
    .unwrap()
}

fn tools() -> (GitInfoCache, UpdateChecker) {
    let opener = Arc::new(GitOpener);
    (
        GitInfoCache::new(Arc::new(FileCache::in_memory()), opener.clone()),
        UpdateChecker::new(opener),
    )
}

#[test]
fn fresh_clone_reads_info_and_is_latest() {
    let (tree, upstream) = fixture();
    let registry = scan(&tree);
    let ext = registry.get("cloned").unwrap();
    let (info, checker) = tools();

    info.read_info(ext);

    assert_eq!(ext.commit_hash(), head_id(&upstream).to_string());
    assert_eq!(ext.version(), &ext.commit_hash()[..8]);
    assert_eq!(ext.branch().as_deref(), Some(MAIN_BRANCH));
    assert!(ext.remote().is_some());
    assert_eq!(ext.status(), Some(UpdateStatus::Unknown));

    assert_eq!(checker.check_updates(ext), UpdateStatus::Latest);
    assert!(!ext.can_update());
}

#[test]
fn upstream_commit_is_reported_then_synced() {
    let (tree, upstream) = fixture();
    let registry = scan(&tree);
    let ext = registry.get("cloned").unwrap();
    let (info, checker) = tools();
    info.read_info(ext);
    let before = ext.commit_hash();

    let new_head = commit_file(&upstream, "feature.txt", "new\n", "Add feature");

    assert_eq!(checker.check_updates(ext), UpdateStatus::NewCommits);
    assert!(ext.can_update());
    // Dry run leaves the working copy alone.
    let clone = GitRepository::open(ext.path()).unwrap();
    assert_eq!(clone.head_commit().unwrap().hash, before);

    fs::write(ext.path().join("README.md"), "local edit\n").unwrap();
    checker.sync_to_commit(ext, DEFAULT_SYNC_REF).unwrap();

    assert!(!ext.have_info_from_repo());
    assert!(ext.path().join("feature.txt").is_file());
    assert_eq!(fs::read_to_string(ext.path().join("README.md")).unwrap(), "# Test\n");

    info.read_info(ext);
    assert_eq!(ext.commit_hash(), new_head.to_string());
    assert_eq!(checker.check_updates(ext), UpdateStatus::Latest);
}

#[test]
fn fetched_but_not_reset_is_behind_head() {
    let (tree, upstream) = fixture();
    let registry = scan(&tree);
    let ext = registry.get("cloned").unwrap();
    let (_info, checker) = tools();

    commit_file(&upstream, "feature.txt", "new\n", "Add feature");
    GitRepository::open(ext.path())
        .unwrap()
        .fetch(false, true)
        .unwrap();

    assert_eq!(checker.check_updates(ext), UpdateStatus::BehindHead);
    assert!(ext.can_update());
}

#[test]
fn unreachable_remote_is_remote_error() {
    let (tree, upstream) = fixture();
    let registry = scan(&tree);
    let ext = registry.get("cloned").unwrap();
    let (_info, checker) = tools();

    let upstream_path = upstream.workdir().unwrap().to_path_buf();
    drop(upstream);
    fs::remove_dir_all(&upstream_path).unwrap();

    assert_eq!(checker.check_updates(ext), UpdateStatus::RemoteError);
    assert!(!ext.can_update());
    assert!(checker.sync_to_commit(ext, DEFAULT_SYNC_REF).is_err());
}

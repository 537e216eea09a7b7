//! Git repository fixtures.
//!
//! Everything here goes through `git2` so tests do not depend on a `git`
//! binary or on the user's global git configuration.

use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Oid, Repository, RepositoryInitOptions, Signature};

/// Branch every fixture repository starts on.
pub const MAIN_BRANCH: &str = "main";

/// Creates a `.git` directory that is not a usable repository.
///
/// Use for tests that only need the marker to exist, or that want opening
/// the repository to fail.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir_all(path.join(".git"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write HEAD: {e}"));
}

/// Initialises an empty repository on [`MAIN_BRANCH`] with a local identity.
///
/// # Panics
/// Panics if initialisation fails.
pub fn init_repo(path: &Path) -> Repository {
    let mut options = RepositoryInitOptions::new();
    options.initial_head(MAIN_BRANCH);
    let repo = Repository::init_opts(path, &options).unwrap_or_else(|e| {
        panic!("init_repo: failed to init repository at {}: {e}", path.display())
    });
    configure_identity(&repo);
    repo
}

/// Writes `name` with `content` into the working copy and commits it on HEAD.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_file(repo: &Repository, name: &str, content: &str, message: &str) -> Oid {
    let workdir = repo
        .workdir()
        .unwrap_or_else(|| panic!("commit_file: repository has no working copy"));
    let file = workdir.join(name);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file, content).unwrap();

    let mut index = repo.index().unwrap();
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

    let signature = test_signature();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .unwrap_or_else(|e| panic!("commit_file: commit failed: {e}"))
}

/// Initialises a repository with one commit (`README.md`).
pub fn repo_with_commit(path: &Path) -> Repository {
    let repo = init_repo(path);
    commit_file(&repo, "README.md", "# Test\n", "Initial commit");
    repo
}

/// Creates an upstream repository with one commit and clones it.
///
/// The clone tracks the upstream as `origin` and has `refs/remotes/origin/HEAD`
/// pointing at the upstream's main branch, as `git clone` leaves it.
///
/// # Panics
/// Panics if any git operation fails.
pub fn upstream_with_clone(upstream: &Path, clone: &Path) -> (Repository, Repository) {
    let upstream_repo = repo_with_commit(upstream);
    let url = upstream
        .to_str()
        .unwrap_or_else(|| panic!("upstream_with_clone: non-UTF-8 path"));
    let clone_repo = Repository::clone(url, clone)
        .unwrap_or_else(|e| panic!("upstream_with_clone: clone failed: {e}"));
    configure_identity(&clone_repo);

    let origin_head = format!("refs/remotes/origin/{MAIN_BRANCH}");
    if clone_repo.find_reference("refs/remotes/origin/HEAD").is_err() {
        clone_repo
            .reference_symbolic("refs/remotes/origin/HEAD", &origin_head, true, "fixture")
            .unwrap();
    }

    (upstream_repo, clone_repo)
}

/// Commit id HEAD points at.
pub fn head_id(repo: &Repository) -> Oid {
    repo.head().unwrap().peel_to_commit().unwrap().id()
}

fn test_signature() -> Signature<'static> {
    Signature::now("Test User", "test@test.com").unwrap()
}

fn configure_identity(repo: &Repository) {
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@test.com").unwrap();
}

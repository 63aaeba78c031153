use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not
        // thread-safe. Lock it so tests don't race even if a #[serial]
        // annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Create a throwaway repository with a deterministic `main` branch and one
/// commit.
pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Deterministic default branch name across environments; sets HEAD to an
    // unborn `main` before the first commit.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    configure_identity(path);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    temp_dir
}

/// Create a bare origin plus two clones: a `seed` clone for simulating other
/// people's pushes and a `work` clone for the code under test.
///
/// Returns the temp root and the path of the `work` clone. The bare remote
/// lives at `<root>/origin.git`, the seed clone at `<root>/seed`.
pub(crate) fn create_test_repo_with_remote() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    git(root, &["init", "--bare", "--initial-branch=main", "origin.git"]);

    git(root, &["clone", "origin.git", "seed"]);
    let seed = root.join("seed");
    configure_identity(&seed);
    std::fs::write(seed.join("README.md"), "# Test\n").unwrap();
    git(&seed, &["add", "."]);
    git(&seed, &["commit", "-m", "Initial commit"]);
    git(&seed, &["push", "origin", "main"]);

    git(root, &["clone", "origin.git", "work"]);
    let work = root.join("work");
    configure_identity(&work);

    (temp_dir, work)
}

/// Write a file and commit it.
pub(crate) fn commit_file(repo_dir: &Path, name: &str, content: &str, message: &str) {
    std::fs::write(repo_dir.join(name), content).unwrap();
    git(repo_dir, &["add", "."]);
    git(repo_dir, &["commit", "-m", message]);
}

fn configure_identity(repo_dir: &Path) {
    git(repo_dir, &["config", "user.email", "test@example.com"]);
    git(repo_dir, &["config", "user.name", "Test User"]);
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}

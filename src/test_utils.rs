#[cfg(test)]
pub mod fixtures {
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// A scratch directory tree that looks like a repository root.
    ///
    /// The root holds a `.git` directory so upward ignore-file discovery
    /// stops there instead of wandering into the system temp directory.
    pub struct TestTree {
        _temp_dir: TempDir,
        root: PathBuf,
    }

    impl TestTree {
        pub fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let root = temp_dir
                .path()
                .canonicalize()
                .expect("Failed to canonicalize temp dir");
            fs::create_dir(root.join(".git")).expect("Failed to create .git");

            Self {
                _temp_dir: temp_dir,
                root,
            }
        }

        pub fn root(&self) -> &Path {
            &self.root
        }

        pub fn path(&self, relative: &str) -> PathBuf {
            self.root.join(relative)
        }

        /// Writes a file, creating parent directories as needed
        pub fn file(&self, relative: &str, contents: &str) -> PathBuf {
            let path = self.path(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent dirs");
            }
            fs::write(&path, contents).expect("Failed to write file");
            path
        }

        pub fn dir(&self, relative: &str) -> PathBuf {
            let path = self.path(relative);
            fs::create_dir_all(&path).expect("Failed to create dir");
            path
        }

        #[cfg(unix)]
        pub fn symlink(&self, target: &str, link: &str) -> PathBuf {
            let link_path = self.path(link);
            std::os::unix::fs::symlink(self.path(target), &link_path)
                .expect("Failed to create symlink");
            link_path
        }
    }
}

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch project with an `out/` build directory.
pub struct TestProject {
    root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("out")).unwrap();
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn bytecode_dir(&self) -> PathBuf {
        self.root().join("bytecode")
    }

    /// Writes `out/<dir>/<file>`.
    pub fn add_artifact(&self, dir: &str, file: &str, contents: &str) {
        let dir = self.root().join("out").join(dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(file), contents).unwrap();
    }

    pub fn read_output(&self, file: &str) -> String {
        std::fs::read_to_string(self.bytecode_dir().join(file)).unwrap()
    }

    pub fn read_metadata(&self, contract: &str) -> serde_json::Value {
        serde_json::from_str(&self.read_output(&format!("{contract}.meta.json"))).unwrap()
    }

    /// Sorted names of the files in the destination directory.
    pub fn outputs(&self) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(self.bytecode_dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub const MY_CAR: &str =
    r#"{"bytecode":{"object":"0x608060405260"},"abi":[{"type":"function","name":"drive"}]}"#;

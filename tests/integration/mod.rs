// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub mod fixtures;

/// Test fixture helper for creating temporary directories with corpus files
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create a corpus file with given content
    pub fn create_corpus_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        // Create parent directories if needed
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Create the standard training, good and bad corpora
    pub fn create_standard_corpora(&self) -> (PathBuf, PathBuf, PathBuf) {
        (
            self.create_corpus_file("two_cities.txt", fixtures::TRAINING_TEXT),
            self.create_corpus_file("english.txt", fixtures::GOOD_LINES),
            self.create_corpus_file("gibberish.txt", fixtures::BAD_LINES),
        )
    }

    /// Model file path inside the fixture root
    pub fn model_path(&self) -> PathBuf {
        gibberish::default_model_path(&self.root_path)
    }
}

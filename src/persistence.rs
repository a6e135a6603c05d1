// WHY: model file helpers layered on top of the in-memory Model
// The alphabet and prior travel with the matrix so a loaded model scores
// exactly like the trained one

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::GibberishError;
use crate::markov::{Alphabet, TransitionMatrix};
use crate::model::Model;

/// Version written into every model file
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// On-disk representation of a trained model
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModelFile {
    pub format_version: u32,
    /// Accepted characters in index order; its length is the matrix dimension
    pub alphabet: String,
    pub prior: f64,
    pub threshold: f64,
    /// Row-major log-probabilities
    pub matrix: Vec<Vec<f64>>,
}

impl ModelFile {
    pub fn from_model(model: &Model) -> Self {
        let matrix = model.matrix();
        Self {
            format_version: MODEL_FORMAT_VERSION,
            alphabet: matrix.alphabet().as_string(),
            prior: matrix.prior(),
            threshold: model.threshold(),
            matrix: matrix.to_rows(),
        }
    }

    /// Validate and rebuild the in-memory model
    pub fn into_model(self) -> Result<Model, GibberishError> {
        if self.format_version != MODEL_FORMAT_VERSION {
            return Err(GibberishError::UnsupportedFormat(self.format_version));
        }
        let alphabet = Alphabet::new(&self.alphabet)?;
        let matrix = TransitionMatrix::from_rows(alphabet, self.prior, &self.matrix)?;
        Ok(Model::new(matrix, self.threshold))
    }
}

/// Generate default model file path inside a directory
pub fn default_model_path<P: AsRef<Path>>(dir: P) -> PathBuf {
    dir.as_ref().join("gibberish_model.json")
}

/// Check if a model file exists in the given directory
pub fn model_exists<P: AsRef<Path>>(dir: P) -> bool {
    default_model_path(dir).exists()
}

/// Write the model as pretty JSON, replacing any existing file atomically
pub fn save_model<P: AsRef<Path>>(model: &Model, path: P) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create model directory {}", parent.display()))?;

    // WHY: write to a sibling temp file and rename so readers never see a half-written model
    let temp_file = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        serde_json::to_writer_pretty(&mut writer, &ModelFile::from_model(model))?;
        writer.flush()?;
    }
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist model to {}", path.display()))?;

    info!("Saved model to {}", path.display());
    Ok(())
}

/// Load and validate a model file
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Model> {
    let path = path.as_ref();
    debug!("Loading model from {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read model file {}", path.display()))?;
    parse_model(&content, path)
}

/// Load and validate a model file (async version)
pub async fn load_model_async<P: AsRef<Path>>(path: P) -> Result<Model> {
    let path = path.as_ref();
    debug!("Loading model from {}", path.display());
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read model file {}", path.display()))?;
    parse_model(&content, path)
}

fn parse_model(content: &str, path: &Path) -> Result<Model> {
    let file: ModelFile = serde_json::from_str(content)
        .with_context(|| format!("Malformed model file {}", path.display()))?;
    let model = file
        .into_model()
        .with_context(|| format!("Invalid model in {}", path.display()))?;
    info!(
        threshold = model.threshold(),
        dimension = model.matrix().dimension(),
        "Loaded model from {}",
        path.display()
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markov::DEFAULT_PRIOR;
    use tempfile::TempDir;

    fn sample_model() -> Model {
        let matrix = TransitionMatrix::build(
            Alphabet::default(),
            ["it was the best of times", "it was the worst of times"],
            DEFAULT_PRIOR,
        )
        .unwrap();
        Model::new(matrix, 0.0421)
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = default_model_path(temp_dir.path());
        assert!(!model_exists(temp_dir.path()));

        let model = sample_model();
        save_model(&model, &path).unwrap();
        assert!(model_exists(temp_dir.path()));

        let loaded = load_model(&path).unwrap();
        assert_eq!(loaded, model);
        assert_eq!(loaded.threshold().to_bits(), model.threshold().to_bits());
    }

    #[tokio::test]
    async fn test_async_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("model.json");
        let model = sample_model();
        save_model(&model, &path).unwrap();

        let loaded = load_model_async(&path).await.unwrap();
        assert_eq!(loaded.score("best of times"), model.score("best of times"));
    }

    #[test]
    fn test_save_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = default_model_path(temp_dir.path());
        fs::write(&path, "stale").unwrap();

        save_model(&sample_model(), &path).unwrap();
        assert!(load_model(&path).is_ok());
    }

    #[test]
    fn test_model_file_records_alphabet_metadata() {
        let file = ModelFile::from_model(&sample_model());
        assert_eq!(file.format_version, MODEL_FORMAT_VERSION);
        assert_eq!(file.alphabet, "abcdefghijklmnopqrstuvwxyz ");
        assert_eq!(file.prior, DEFAULT_PRIOR);
        assert_eq!(file.matrix.len(), 27);
        assert!(file.matrix.iter().all(|row| row.len() == 27));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let mut file = ModelFile::from_model(&sample_model());
        file.alphabet.push('-');
        assert_eq!(
            file.into_model(),
            Err(GibberishError::DimensionMismatch { expected: 28, found: 27 })
        );
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let mut file = ModelFile::from_model(&sample_model());
        file.format_version = 99;
        assert_eq!(file.into_model(), Err(GibberishError::UnsupportedFormat(99)));
    }

    #[test]
    fn test_unnormalized_rows_rejected() {
        let file = ModelFile {
            format_version: MODEL_FORMAT_VERSION,
            alphabet: "ab".to_string(),
            prior: DEFAULT_PRIOR,
            threshold: 0.5,
            matrix: vec![vec![5.0, 5.0], vec![5.0, 5.0]],
        };
        assert!(matches!(
            file.clone().into_model(),
            Err(GibberishError::RowNotNormalized { row: 0, .. })
        ));

        // A hand-edited file must not load into a model scoring above 1
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("edited.json");
        fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();
        let err = load_model(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid model in"));
        assert!(matches!(
            err.downcast_ref::<GibberishError>(),
            Some(GibberishError::RowNotNormalized { row: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_prior_rejected() {
        let mut file = ModelFile::from_model(&sample_model());
        file.prior = -1.0;
        assert_eq!(file.into_model(), Err(GibberishError::InvalidPrior(-1.0)));
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_model(temp_dir.path().join("missing.json")).is_err());

        let path = temp_dir.path().join("garbage.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_model(&path).unwrap_err();
        assert!(err.to_string().contains("Malformed model file"));
    }
}

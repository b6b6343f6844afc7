use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::models::{BuiltinModel, ModelInfo};

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Model not downloaded: {0}")]
    NotDownloaded(String),
    #[error("Download error: {0}")]
    DownloadError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Artifact verification failed")]
    VerificationFailed,
    #[error("Hash mismatch: expected {expected}, got {actual} for {file_type} file")]
    HashMismatch {
        file_type: String,
        expected: String,
        actual: String,
    },
}

// One downloadable file within a model bundle.
struct BundleFile {
    file_type: &'static str,
    url: String,
    hash: String,
    path: PathBuf,
}

impl BundleFile {
    fn from_info(info: &ModelInfo, bundle_dir: &Path) -> Vec<Self> {
        let mut files = vec![
            Self {
                file_type: "model",
                url: info.model_url.clone(),
                hash: info.model_hash.clone(),
                path: bundle_dir.join("model.onnx"),
            },
            Self {
                file_type: "vocabulary",
                url: info.vocabulary_url.clone(),
                hash: info.vocabulary_hash.clone(),
                path: bundle_dir.join("locations.json"),
            },
        ];
        if let (Some(url), Some(hash)) = (&info.scaler_url, &info.scaler_hash) {
            files.push(Self {
                file_type: "scaler",
                url: url.clone(),
                hash: hash.clone(),
                path: bundle_dir.join("scaler.json"),
            });
        }
        files
    }
}

/// Local store for downloaded model bundles.
///
/// A bundle is everything one builtin model needs at load time: the ONNX
/// file, its location vocabulary, and scaling parameters when the model
/// was trained on standardized features.
#[derive(Clone)]
pub struct ArtifactStore {
    models_dir: PathBuf,
    download_lock: Arc<Mutex<()>>,
}

impl ArtifactStore {
    /// Creates a new ArtifactStore with the default models directory
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::get_default_models_dir())
    }

    /// Returns the default models directory path
    pub fn get_default_models_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("MAKAAN_CACHE") {
            return PathBuf::from(path).join("models");
        }

        // 2. Use platform-specific cache directory
        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("makaan").join("models");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("makaan").join("models");
        }

        // 4. If all else fails, use system temp directory (platform agnostic)
        env::temp_dir().join("makaan").join("models")
    }

    pub fn new<P: AsRef<Path>>(models_dir: P) -> io::Result<Self> {
        let models_dir = models_dir.as_ref().to_path_buf();
        fs::create_dir_all(&models_dir)?;
        Ok(Self {
            models_dir,
            download_lock: Arc::new(Mutex::new(())),
        })
    }

    fn bundle_dir(&self, model: BuiltinModel) -> PathBuf {
        self.models_dir.join(model.name())
    }

    fn bundle_files(&self, model: BuiltinModel) -> Vec<BundleFile> {
        BundleFile::from_info(&model.get_model_info(), &self.bundle_dir(model))
    }

    pub fn get_model_path(&self, model: BuiltinModel) -> PathBuf {
        self.bundle_dir(model).join("model.onnx")
    }

    pub fn get_vocabulary_path(&self, model: BuiltinModel) -> PathBuf {
        self.bundle_dir(model).join("locations.json")
    }

    /// Path to the scaling parameters file, for models that ship one
    pub fn get_scaler_path(&self, model: BuiltinModel) -> Option<PathBuf> {
        model
            .get_model_info()
            .scaler_url
            .map(|_| self.bundle_dir(model).join("scaler.json"))
    }

    pub fn is_model_downloaded(&self, model: BuiltinModel) -> bool {
        log::info!("Checking if model '{}' is downloaded:", model.name());
        let mut all_present = true;
        for file in self.bundle_files(model) {
            let exists = file.path.exists();
            log::info!(
                "  {} path: {:?} (exists: {})",
                file.file_type,
                file.path,
                exists
            );
            all_present &= exists;
        }
        all_present
    }

    pub async fn download_model(&self, model: BuiltinModel) -> Result<(), ArtifactError> {
        let _lock = self.download_lock.lock().await;

        let bundle_dir = self.bundle_dir(model);
        log::info!("Creating bundle directory at {:?}", bundle_dir);
        fs::create_dir_all(&bundle_dir)?;

        for file in self.bundle_files(model) {
            let result = if file.path.exists() {
                log::info!(
                    "{} file exists at {:?}, verifying...",
                    file.file_type,
                    file.path
                );
                if self.verify_file(&file.path, &file.hash)? {
                    log::info!("Existing {} file verified successfully", file.file_type);
                    Ok(())
                } else {
                    log::warn!("{} file verification failed, redownloading", file.file_type);
                    self.download_and_verify_file(&file).await
                }
            } else {
                log::info!("{} file does not exist, downloading...", file.file_type);
                self.download_and_verify_file(&file).await
            };

            if let Err(e) = result {
                log::error!("Failed to set up {} file: {}", file.file_type, e);
                // Cleanup on failure
                let _ = self.remove_download(model);
                return Err(e);
            }
        }

        log::info!("Model bundle '{}' ready to use", model.name());
        Ok(())
    }

    fn verify_file(&self, path: &Path, expected_hash: &str) -> Result<bool, ArtifactError> {
        log::info!("Verifying file: {:?}", path);
        let bytes = fs::read(path)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("{:x}", hasher.finalize());
        log::info!("Calculated hash: {}", hash);
        log::info!("Expected hash:   {}", expected_hash);
        Ok(hash == expected_hash)
    }

    pub fn verify_model(&self, model: BuiltinModel) -> Result<bool, ArtifactError> {
        for file in self.bundle_files(model) {
            if !file.path.exists() {
                log::info!("{} file does not exist at {:?}", file.file_type, file.path);
                return Ok(false);
            }
            let file_ok = self.verify_file(&file.path, &file.hash)?;
            log::info!("{} hash verification: {}", file.file_type, file_ok);
            if !file_ok {
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn download_and_verify_file(&self, file: &BundleFile) -> Result<(), ArtifactError> {
        log::info!(
            "Downloading {} file from {} to {:?}",
            file.file_type,
            file.url,
            file.path
        );
        let response = reqwest::get(&file.url).await?;
        log::info!("Download response status: {}", response.status());
        let bytes = response.bytes().await?;
        log::info!("Downloaded {} bytes", bytes.len());

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("{:x}", hasher.finalize());

        if hash != file.hash {
            log::error!(
                "{} hash mismatch: expected {}, got {}",
                file.file_type,
                file.hash,
                hash
            );
            return Err(ArtifactError::HashMismatch {
                file_type: file.file_type.to_string(),
                expected: file.hash.clone(),
                actual: hash,
            });
        }

        // Ensure parent directory exists
        if let Some(parent) = file.path.parent() {
            fs::create_dir_all(parent)?;
        }

        log::info!("Writing {} bytes to {:?}", bytes.len(), file.path);
        fs::write(&file.path, bytes)?;

        // Verify after writing
        if !self.verify_file(&file.path, &file.hash)? {
            return Err(ArtifactError::VerificationFailed);
        }

        log::info!(
            "{} file downloaded and verified successfully",
            file.file_type
        );
        Ok(())
    }

    pub fn remove_download(&self, model: BuiltinModel) -> Result<(), ArtifactError> {
        for file in self.bundle_files(model) {
            if file.path.exists() {
                fs::remove_file(&file.path)?;
            }
        }
        Ok(())
    }

    /// Ensures that a model bundle is downloaded and verified.
    /// If the bundle doesn't exist, it will be downloaded.
    /// If verification fails, it will be re-downloaded.
    pub async fn ensure_model_downloaded(&self, model: BuiltinModel) -> Result<(), ArtifactError> {
        log::info!("Checking if model {:?} is downloaded...", model);
        if !self.is_model_downloaded(model) {
            log::info!("Model not found, downloading...");
            self.download_model(model).await?;
        } else {
            log::info!("Model exists, verifying...");
            if !self.verify_model(model)? {
                log::info!("Model verification failed, re-downloading...");
                self.remove_download(model)?;
                self.download_model(model).await?;
            } else {
                log::info!("Model verification successful");
            }
        }
        Ok(())
    }
}

use crate::error::EnhanceError;
use image::RgbImage;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Flat, filename-keyed artifact folders under the data directory.
///
/// `uploads/` holds originals, `processed/` the current enhanced output,
/// `previews/` the ephemeral per-profile files. The filename is the sole
/// identity key: a second upload with the same name overwrites the first.
#[derive(Debug, Clone)]
pub struct Storage {
    uploads: PathBuf,
    processed: PathBuf,
    previews: PathBuf,
}

impl Storage {
    /// Create the folder layout, purging any previews left over from a
    /// previous run. Must complete before the server accepts requests.
    pub fn init(data_dir: &Path) -> Result<Self, EnhanceError> {
        let storage = Self {
            uploads: data_dir.join("uploads"),
            processed: data_dir.join("processed"),
            previews: data_dir.join("previews"),
        };

        fs::create_dir_all(&storage.uploads)?;
        fs::create_dir_all(&storage.processed)?;

        if storage.previews.exists() {
            tracing::info!("Purging preview directory {}", storage.previews.display());
            fs::remove_dir_all(&storage.previews)?;
        }
        fs::create_dir_all(&storage.previews)?;

        Ok(storage)
    }

    pub fn upload_path(&self, filename: &str) -> PathBuf {
        self.uploads.join(filename)
    }

    pub fn processed_path(&self, filename: &str) -> PathBuf {
        self.processed.join(filename)
    }

    pub fn preview_path(&self, profile: &str, filename: &str) -> PathBuf {
        self.previews.join(format!("{}_{}", profile, filename))
    }

    /// Path for an already-combined `{profile}_{filename}` preview name
    pub fn preview_file(&self, name: &str) -> PathBuf {
        self.previews.join(name)
    }
}

/// Reduce a client-supplied filename to its final path component.
///
/// Rejects names that are empty after stripping directories so that a
/// crafted filename can never escape the artifact folders.
pub fn sanitize_filename(name: &str) -> Result<String, EnhanceError> {
    let cleaned = Path::new(name)
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return Err(EnhanceError::InvalidRequest(format!(
            "Invalid filename: {:?}",
            name
        )));
    }

    Ok(cleaned)
}

/// Write raw bytes to `dest` atomically: the file appears complete or not
/// at all. The temp file lives in the destination directory so the final
/// rename never crosses a filesystem boundary.
pub fn write_bytes_atomic(dest: &Path, bytes: &[u8]) -> Result<(), EnhanceError> {
    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = tempfile::Builder::new()
        .suffix(&extension_suffix(dest))
        .tempfile_in(dir)?;

    temp.write_all(bytes)?;
    temp.persist(dest)
        .map_err(|e| EnhanceError::Io(e.to_string()))?;

    Ok(())
}

/// Encode `img` to `dest` atomically in the format implied by the
/// destination extension.
pub fn save_image_atomic(img: &RgbImage, dest: &Path) -> Result<(), EnhanceError> {
    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    // Keep the destination extension on the temp file so the encoder picks
    // the same format the final path implies.
    let temp = tempfile::Builder::new()
        .suffix(&extension_suffix(dest))
        .tempfile_in(dir)?;

    img.save(temp.path())?;
    temp.persist(dest)
        .map_err(|e| EnhanceError::Io(e.to_string()))?;

    Ok(())
}

fn extension_suffix(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Content type for a stored artifact, from its extension
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

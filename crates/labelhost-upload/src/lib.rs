//! File selection and upload for label images
//!
//! [`Uploader::select_and_upload`] walks one `select-file` request through:
//! pick a file, check its size, check its type, then store it under a fresh
//! `/api/assets/{uuid}` path. Validation happens before anything leaves the
//! machine; a file that fails it never reaches the asset store.
//!
//! Cancelling the picker is not an error: the result carries neither a path
//! nor an error.

use std::sync::Arc;

use labelhost_core::{
    error::Result,
    messages::{SelectFileRequest, UploadResult},
    AssetStore, FilePicker, PickedFile, UploadError,
};
use uuid::Uuid;

pub mod mime;
pub mod picker;
pub mod store;

pub use picker::CommandPicker;
pub use store::HttpAssetStore;

/// Path prefix under which uploaded assets are stored
pub const ASSET_PATH_PREFIX: &str = "/api/assets/";

/// A fresh storage path for one upload
pub fn new_asset_path() -> String {
    format!("{}{}", ASSET_PATH_PREFIX, Uuid::new_v4())
}

/// Rejects files over `max_size_kb` kilobytes (1 KB = 1024 bytes)
pub fn check_size(file: &PickedFile, max_size_kb: u64) -> Result<()> {
    let size = file.size_bytes();
    if size > max_size_kb.saturating_mul(1024) {
        return Err(UploadError::TooLarge {
            size_kb: size.div_ceil(1024),
            limit_kb: max_size_kb,
        }
        .into());
    }
    Ok(())
}

/// The file's MIME type, if it is one the asset store accepts
pub fn check_type(file: &PickedFile) -> Result<String> {
    let mime = mime::detect(&file.bytes, &file.name);
    if !mime::is_allowed(&mime) {
        return Err(UploadError::UnsupportedType(mime).into());
    }
    Ok(mime)
}

/// Picks, validates and stores image files
pub struct Uploader {
    picker: Arc<dyn FilePicker>,
    store: Arc<dyn AssetStore>,
}

impl Uploader {
    pub fn new(picker: Arc<dyn FilePicker>, store: Arc<dyn AssetStore>) -> Self {
        Self { picker, store }
    }

    /// Handles one `select-file` request; never fails
    pub async fn select_and_upload(&self, req: &SelectFileRequest) -> UploadResult {
        match self.try_select_and_upload(req).await {
            Ok(Some(path)) => {
                log::info!("Uploaded asset {}", path);
                UploadResult::uploaded(req.request_id.clone(), path)
            },
            Ok(None) => {
                log::debug!("File selection {} cancelled", req.request_id);
                UploadResult::cancelled(req.request_id.clone())
            },
            Err(e) => {
                log::warn!("File selection {} failed: {}", req.request_id, e);
                UploadResult::failure(req.request_id.clone(), e.to_string())
            },
        }
    }

    async fn try_select_and_upload(&self, req: &SelectFileRequest) -> Result<Option<String>> {
        let Some(file) = self.picker.pick(&req.accept_types).await? else {
            return Ok(None);
        };

        check_size(&file, req.max_size_kb)?;
        let mime = check_type(&file)?;

        let path = new_asset_path();
        self.store.put(&path, &mime, file.bytes).await?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, len: usize) -> PickedFile {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.resize(len.max(8), 0);
        PickedFile {
            name: name.into(),
            bytes,
        }
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(check_size(&file("a.png", 4000 * 1024), 4000).is_ok());
        let err = check_size(&file("a.png", 4000 * 1024 + 1), 4000).unwrap_err();
        assert_eq!(err.to_string(), "File too large: 4001 KB exceeds 4000 KB limit");
    }

    #[test]
    fn test_type_check_reports_detected_type() {
        assert_eq!(check_type(&file("a.png", 16)).unwrap(), "image/png");

        let gif = PickedFile {
            name: "a.gif".into(),
            bytes: b"GIF89a......".to_vec(),
        };
        assert_eq!(
            check_type(&gif).unwrap_err().to_string(),
            "Unsupported file type: image/gif"
        );
    }

    #[test]
    fn test_asset_paths_are_unique_uuids() {
        let a = new_asset_path();
        let b = new_asset_path();
        assert_ne!(a, b);
        let id = a.strip_prefix(ASSET_PATH_PREFIX).unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }
}

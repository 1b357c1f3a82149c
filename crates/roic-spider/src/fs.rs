use crate::{Error, Result};
use std::path::Path;
use tracing::trace;

/// Reads a `.json` file from `path`.
pub async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    trace!("reading file path: {path:?}");
    let file = tokio::fs::read(path).await.map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    trace!("file read; deserializing bytes ...");
    let data: T = serde_json::from_slice(&file).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(data)
}

/// Replace the file at `path` with `bytes`.
///
/// The bytes land in a `.tmp` sibling first and are renamed over `path`, so a
/// reader never sees a half-written file.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let io_err = |source: std::io::Error| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    // ensure the directory exists
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await.map_err(io_err)?;
    }

    let tmp = path.with_extension("tmp");
    trace!("writing {} bytes to {tmp:?}", bytes.len());
    tokio::fs::write(&tmp, bytes).await.map_err(io_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_err)?;

    Ok(())
}

/// Read the file at `path`, or `None` when there is no such file.
pub async fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

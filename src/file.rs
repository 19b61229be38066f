//! Local file I/O for the command-line front end.
//!
//! The local directory stands in for the storage backend: blobs are written
//! as opaque bytes under their (encrypted) names and read back unchanged.

use std::path::{Component, Path, PathBuf};

use std::io::ErrorKind;

use anyhow::{Context, Result, bail, ensure};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

pub async fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).await.with_context(|| format!("failed to read file: {}", path.display()))
}

/// Writes `bytes` to `path`, creating parent directories.
///
/// Refuses to replace an existing file unless `overwrite` is set. Without
/// `overwrite` the file is created exclusively, so concurrent writers to the
/// same path cannot both succeed.
pub async fn write_file(path: &Path, bytes: &[u8], overwrite: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }

    if overwrite {
        return fs::write(path, bytes).await.with_context(|| format!("failed to write file: {}", path.display()));
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => bail!("output file already exists: {} (use --force to overwrite)", path.display()),
        Err(e) => return Err(e).with_context(|| format!("failed to create file: {}", path.display())),
    };

    file.write_all(bytes).await.with_context(|| format!("failed to write file: {}", path.display()))?;
    file.flush().await.with_context(|| format!("failed to flush file: {}", path.display()))
}

/// The final path component as UTF-8.
pub fn file_name(path: &Path) -> Result<&str> {
    path.file_name().context("path has no file name")?.to_str().with_context(|| format!("file name is not valid UTF-8: {}", path.display()))
}

/// Directory outputs go to: the explicit one, else the input's own directory.
#[must_use]
pub fn output_dir(input: &Path, output: Option<&Path>) -> PathBuf {
    output.map(Path::to_path_buf).or_else(|| input.parent().map(Path::to_path_buf)).unwrap_or_default()
}

/// Joins a stored or decrypted name onto `dir`, rejecting anything that is
/// not a single plain path component.
///
/// Decrypted names come from the storage side and must not be able to write
/// outside the output directory.
pub fn join_name(dir: &Path, name: &str) -> Result<PathBuf> {
    let mut components = Path::new(name).components();
    let single = matches!((components.next(), components.next()), (Some(Component::Normal(part)), None) if part == name);
    ensure!(single, "refusing unsafe file name: {name:?}");

    Ok(dir.join(name))
}

use detcfg::export::ExportLink;
use std::path::PathBuf;

/// Saves an export under its download file name inside `dir`.
pub async fn write_export(dir: PathBuf, link: ExportLink) -> Result<PathBuf, String> {
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|err| format!("creating {}: {err}", dir.display()))?;
    let path = dir.join(link.format.file_name());
    tokio::fs::write(&path, link.body.as_bytes())
        .await
        .map_err(|err| format!("writing {}: {err}", path.display()))?;
    log::info!("saved {} export to {}", link.format, path.display());
    Ok(path)
}

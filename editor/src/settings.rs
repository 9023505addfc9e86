use anyhow::Context;
use detcfg::client::DEFAULT_BACKEND_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the editor talks to and where downloads land.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorSettings {
    pub backend_url: String,
    pub download_dir: PathBuf,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            download_dir: PathBuf::from("."),
        }
    }
}

impl EditorSettings {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading editor settings {}", path_ref.display()))?;
        let settings: EditorSettings = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing editor settings {}", path_ref.display()))?;
        Ok(settings)
    }

    /// Command-line values win over whatever the settings file said.
    pub fn with_overrides(mut self, backend_url: Option<String>, download_dir: Option<PathBuf>) -> Self {
        if let Some(url) = backend_url {
            self.backend_url = url;
        }
        if let Some(dir) = download_dir {
            self.download_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn settings_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"backend_url: http://10.0.0.5:8000\ndownload_dir: /tmp/exports\n")
            .unwrap();
        let path = temp.into_temp_path();
        let settings = EditorSettings::load(&path).unwrap();
        assert_eq!(settings.backend_url, "http://10.0.0.5:8000");
        assert_eq!(settings.download_dir, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"download_dir: out\n").unwrap();
        let path = temp.into_temp_path();
        let settings = EditorSettings::load(&path).unwrap();
        assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn overrides_replace_file_values() {
        let settings = EditorSettings::default()
            .with_overrides(Some("http://backend:9000".into()), None);
        assert_eq!(settings.backend_url, "http://backend:9000");
        assert_eq!(settings.download_dir, PathBuf::from("."));
    }

    #[test]
    fn unreadable_file_reports_path() {
        let err = EditorSettings::load("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}

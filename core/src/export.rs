//! Client-side download links for the pretty-printed config exports.

use crate::client::ApiEndpoint;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Json, ExportFormat::Yaml];

    pub fn endpoint(self) -> ApiEndpoint {
        match self {
            Self::Json => ApiEndpoint::ConfigJsonPretty,
            Self::Yaml => ApiEndpoint::ConfigYamlPretty,
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Yaml => "application/yaml",
        }
    }

    /// Name offered for the downloaded file.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Json => "detector-configs.json",
            Self::Yaml => "detector-configs.yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

/// One export body and the `data:` URI wrapping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLink {
    pub format: ExportFormat,
    pub body: String,
    pub data_uri: String,
}

impl ExportLink {
    pub fn new(format: ExportFormat, body: impl Into<String>) -> Self {
        let body = body.into();
        let data_uri = format!(
            "data:{},{}",
            format.media_type(),
            urlencoding::encode(&body)
        );
        Self {
            format,
            body,
            data_uri,
        }
    }
}

/// Latest link per format. A format stays empty until its first fetch lands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportLinks {
    json: Option<ExportLink>,
    yaml: Option<ExportLink>,
}

impl ExportLinks {
    pub fn get(&self, format: ExportFormat) -> Option<&ExportLink> {
        match format {
            ExportFormat::Json => self.json.as_ref(),
            ExportFormat::Yaml => self.yaml.as_ref(),
        }
    }

    pub fn set(&mut self, link: ExportLink) {
        match link.format {
            ExportFormat::Json => self.json = Some(link),
            ExportFormat::Yaml => self.yaml = Some(link),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_percent_encodes_body() {
        let link = ExportLink::new(ExportFormat::Json, "{\n    \"api_key\": \"k1\"\n}");
        assert_eq!(
            link.data_uri,
            "data:application/json,%7B%0A%20%20%20%20%22api_key%22%3A%20%22k1%22%0A%7D"
        );
    }

    #[test]
    fn yaml_link_uses_yaml_media_type() {
        let link = ExportLink::new(ExportFormat::Yaml, "api_key: k1\n");
        assert!(link.data_uri.starts_with("data:application/yaml,api_key%3A%20k1"));
        assert_eq!(link.format.file_name(), "detector-configs.yaml");
    }

    #[test]
    fn links_are_stored_per_format() {
        let mut links = ExportLinks::default();
        links.set(ExportLink::new(ExportFormat::Yaml, "a: 1"));
        assert!(links.get(ExportFormat::Json).is_none());
        links.set(ExportLink::new(ExportFormat::Yaml, "a: 2"));
        assert_eq!(links.get(ExportFormat::Yaml).unwrap().body, "a: 2");
    }
}

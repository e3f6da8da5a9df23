use crate::error::FillError;
use crate::render::SignatureFootprint;
use crate::template::TemplateChecks;
use std::path::PathBuf;

pub const DEFAULT_TEMPLATE_PATH: &str = "E-SOC Paperwork.pdf";
pub const DEFAULT_FONT_PATH: &str = "DejaVuSans.ttf";
pub const DEFAULT_ADDR: &str = "0.0.0.0:8002";
pub const DEFAULT_MEDICATION_PAGE: usize = 8;

pub const ENV_TEMPLATE_PATH: &str = "ESOC_TEMPLATE_PATH";
pub const ENV_FONT_PATH: &str = "ESOC_FONT_PATH";
pub const ENV_TEMPLATE_SHA256: &str = "ESOC_TEMPLATE_SHA256";
pub const ENV_EXPECTED_PAGES: &str = "ESOC_EXPECTED_PAGES";
pub const ENV_ADDR: &str = "ESOC_ADDR";

#[derive(Debug, Clone, PartialEq)]
pub struct FillConfig {
    pub template_path: PathBuf,
    pub font_path: PathBuf,
    pub template_sha256: Option<String>,
    pub expected_pages: Option<usize>,
    pub signature_footprint: SignatureFootprint,
    pub medication_page: usize,
    pub addr: String,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            template_sha256: None,
            expected_pages: None,
            signature_footprint: SignatureFootprint::default(),
            medication_page: DEFAULT_MEDICATION_PAGE,
            addr: DEFAULT_ADDR.to_string(),
        }
    }
}

impl FillConfig {
    pub fn from_env() -> Result<Self, FillError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FillError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();
        if let Some(path) = get(ENV_TEMPLATE_PATH) {
            config.template_path = PathBuf::from(path);
        }
        if let Some(path) = get(ENV_FONT_PATH) {
            config.font_path = PathBuf::from(path);
        }
        config.template_sha256 = get(ENV_TEMPLATE_SHA256);
        if let Some(raw) = get(ENV_EXPECTED_PAGES) {
            let pages = raw
                .parse::<usize>()
                .ok()
                .filter(|pages| *pages > 0)
                .ok_or_else(|| {
                    FillError::Config(format!(
                        "{ENV_EXPECTED_PAGES} must be a positive integer, got `{raw}`"
                    ))
                })?;
            config.expected_pages = Some(pages);
        }
        if let Some(addr) = get(ENV_ADDR) {
            config.addr = addr;
        }
        Ok(config)
    }

    pub fn template_checks(&self) -> TemplateChecks {
        TemplateChecks {
            sha256: self.template_sha256.clone(),
            expected_pages: self.expected_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_working_directory_assets() {
        let config = FillConfig::from_lookup(|_| None).expect("config");
        assert_eq!(config, FillConfig::default());
        assert_eq!(config.template_path, PathBuf::from("E-SOC Paperwork.pdf"));
        assert_eq!(config.addr, "0.0.0.0:8002");
        assert_eq!(config.signature_footprint.width, 120.0);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = FillConfig::from_lookup(lookup(&[
            (ENV_TEMPLATE_PATH, "/srv/forms/esoc.pdf"),
            (ENV_FONT_PATH, "/srv/fonts/DejaVuSans.ttf"),
            (ENV_EXPECTED_PAGES, "18"),
            (ENV_TEMPLATE_SHA256, " abc123 "),
            (ENV_ADDR, "   "),
        ]))
        .expect("config");
        assert_eq!(config.template_path, PathBuf::from("/srv/forms/esoc.pdf"));
        assert_eq!(config.expected_pages, Some(18));
        assert_eq!(config.template_sha256.as_deref(), Some("abc123"));
        assert_eq!(config.addr, DEFAULT_ADDR);
        assert_eq!(config.template_checks().expected_pages, Some(18));
    }

    #[test]
    fn bad_page_count_is_rejected() {
        for raw in ["zero", "0", "-3"] {
            let err = FillConfig::from_lookup(lookup(&[(ENV_EXPECTED_PAGES, raw)]))
                .expect_err("invalid page count");
            assert!(err.to_string().contains(ENV_EXPECTED_PAGES));
            assert_eq!(err.code(), "ConfigError");
            assert!(!err.is_client_error());
        }
    }
}

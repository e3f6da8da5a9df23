use crate::error::FillError;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Template,
    Font,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Template => "template",
            AssetKind::Font => "font",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Asset {
    pub kind: AssetKind,
    pub path: PathBuf,
    pub data: Vec<u8>,
}

impl Asset {
    pub fn load(kind: AssetKind, path: &Path) -> Result<Self, FillError> {
        let data = read_required(path)?;
        tracing::debug!(
            kind = kind.as_str(),
            path = %path.display(),
            bytes = data.len(),
            "loaded asset"
        );
        Ok(Self {
            kind,
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn sha256(&self) -> String {
        sha256_hex(&self.data)
    }

    pub fn verify_sha256(&self, expected: Option<&str>) -> Result<(), FillError> {
        let Some(expected) = expected.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(());
        };
        let actual = self.sha256();
        if actual.eq_ignore_ascii_case(expected) {
            return Ok(());
        }
        Err(FillError::Asset(format!(
            "{} {} has sha256 {}, expected {}",
            self.kind.as_str(),
            self.path.display(),
            actual,
            expected
        )))
    }
}

pub fn read_required(path: &Path) -> Result<Vec<u8>, FillError> {
    match std::fs::read(path) {
        Ok(data) => Ok(data),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(FillError::TemplateNotFound(path.to_path_buf()))
        }
        Err(err) => Err(FillError::Io(err)),
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        use std::fmt::Write;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempDir;

    #[test]
    fn missing_file_is_template_not_found() {
        let dir = TempDir::new("assets_missing");
        let err = Asset::load(AssetKind::Template, &dir.path().join("E-SOC Paperwork.pdf"))
            .expect_err("missing");
        assert_eq!(err.code(), "TemplateNotFoundError");
    }

    #[test]
    fn sha256_pin_is_checked_case_insensitively() {
        let dir = TempDir::new("assets_sha");
        let path = dir.path().join("font.ttf");
        std::fs::write(&path, b"abc").expect("write");
        let asset = Asset::load(AssetKind::Font, &path).expect("load");
        let digest = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
        assert_eq!(asset.sha256(), digest);
        assert!(asset.verify_sha256(Some(&digest.to_ascii_uppercase())).is_ok());
        assert!(asset.verify_sha256(None).is_ok());
        assert!(asset.verify_sha256(Some("  ")).is_ok());

        let err = asset.verify_sha256(Some("deadbeef")).expect_err("mismatch");
        assert_eq!(err.code(), "AssetError");
        assert!(err.to_string().contains("expected deadbeef"));
    }
}

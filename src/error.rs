use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum FillError {
    Validation(String),
    Config(String),
    TemplateNotFound(PathBuf),
    Asset(String),
    Template(String),
    Registry(String),
    Serialization(String),
    Io(std::io::Error),
}

impl FillError {
    pub fn code(&self) -> &'static str {
        match self {
            FillError::Validation(_) => "ValidationError",
            FillError::Config(_) => "ConfigError",
            FillError::TemplateNotFound(_) => "TemplateNotFoundError",
            FillError::Asset(_) => "AssetError",
            FillError::Template(_) => "TemplateError",
            FillError::Registry(_) => "RegistryError",
            FillError::Serialization(_) => "SerializationError",
            FillError::Io(_) => "IoError",
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, FillError::Validation(_))
    }
}

impl fmt::Display for FillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillError::Validation(message) => write!(f, "invalid request: {}", message),
            FillError::Config(message) => write!(f, "invalid configuration: {}", message),
            FillError::TemplateNotFound(path) => {
                write!(f, "required asset not found: {}", path.display())
            }
            FillError::Asset(message) => write!(f, "asset error: {}", message),
            FillError::Template(message) => write!(f, "template error: {}", message),
            FillError::Registry(message) => write!(f, "field registry error: {}", message),
            FillError::Serialization(message) => {
                write!(f, "pdf serialization failed: {}", message)
            }
            FillError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl std::error::Error for FillError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FillError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FillError {
    fn from(value: std::io::Error) -> Self {
        FillError::Io(value)
    }
}

impl From<lopdf::Error> for FillError {
    fn from(value: lopdf::Error) -> Self {
        FillError::Template(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_validation_is_a_client_error() {
        assert!(FillError::Validation("x".to_string()).is_client_error());
        assert!(!FillError::TemplateNotFound(PathBuf::from("a.pdf")).is_client_error());
        assert!(!FillError::Serialization("x".to_string()).is_client_error());
        assert!(!FillError::Config("x".to_string()).is_client_error());
    }

    #[test]
    fn template_not_found_names_the_path() {
        let err = FillError::TemplateNotFound(PathBuf::from("E-SOC Paperwork.pdf"));
        assert_eq!(err.code(), "TemplateNotFoundError");
        assert!(err.to_string().contains("E-SOC Paperwork.pdf"));
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error;
        let err = FillError::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(err.source().is_some());
        assert_eq!(err.code(), "IoError");
    }
}

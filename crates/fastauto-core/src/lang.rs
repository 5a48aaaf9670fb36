use std::fmt;
use std::path::Path;

use crate::error::{FastautoError, Result};

/// Language of a generated source file, chosen by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLang {
    Ts,
    Js,
}

impl SourceLang {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ts") => Ok(Self::Ts),
            Some("js") => Ok(Self::Js),
            _ => Err(FastautoError::UnsupportedExtension {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Ts => "ts",
            Self::Js => "js",
        }
    }

    /// Parser name passed to prettier.
    pub fn parser(&self) -> &'static str {
        match self {
            Self::Ts => "babel-ts",
            Self::Js => "babel",
        }
    }
}

impl fmt::Display for SourceLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            SourceLang::from_path(Path::new("users/:userId.ts")).unwrap(),
            SourceLang::Ts
        );
        assert_eq!(
            SourceLang::from_path(Path::new("bearer.js")).unwrap(),
            SourceLang::Js
        );
        assert!(matches!(
            SourceLang::from_path(Path::new("users.rs")),
            Err(FastautoError::UnsupportedExtension { .. })
        ));
        assert!(SourceLang::from_path(Path::new("users")).is_err());
    }
}

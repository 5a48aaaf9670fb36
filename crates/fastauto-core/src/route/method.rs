use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FastautoError;

/// HTTP verb a route stub can implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Get,
    Put,
    Patch,
    Post,
    Delete,
    Options,
    Head,
}

impl Method {
    /// Every method, in the order generated code lists them.
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Put,
        Method::Patch,
        Method::Post,
        Method::Delete,
        Method::Options,
        Method::Head,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Post => "post",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
        }
    }

    /// `Get`, `Put`, ... as used in interface names.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Get => "Get",
            Self::Put => "Put",
            Self::Patch => "Patch",
            Self::Post => "Post",
            Self::Delete => "Delete",
            Self::Options => "Options",
            Self::Head => "Head",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = FastautoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| FastautoError::InvalidMethod {
                method: s.to_string(),
            })
    }
}

/// Classification of a route path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouteType {
    /// Collection endpoint, e.g. `users`.
    Resource,
    /// Single item looked up by a parameter, e.g. `users/:userId`.
    Specific,
    /// Verb-named endpoint, e.g. `sendEmail`.
    Action,
    /// Sub-property of a specific item.
    Field,
}

impl RouteType {
    pub fn suggested_methods(&self) -> Vec<Method> {
        match self {
            Self::Resource => vec![Method::Get, Method::Post],
            Self::Specific => vec![Method::Get, Method::Put, Method::Delete],
            Self::Action => vec![Method::Get, Method::Post],
            Self::Field => vec![Method::Get, Method::Patch],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resource => "RESOURCE",
            Self::Specific => "SPECIFIC",
            Self::Action => "ACTION",
            Self::Field => "FIELD",
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_methods_table() {
        assert_eq!(
            RouteType::Resource.suggested_methods(),
            vec![Method::Get, Method::Post]
        );
        assert_eq!(
            RouteType::Specific.suggested_methods(),
            vec![Method::Get, Method::Put, Method::Delete]
        );
        assert_eq!(
            RouteType::Action.suggested_methods(),
            vec![Method::Get, Method::Post]
        );
        assert_eq!(
            RouteType::Field.suggested_methods(),
            vec![Method::Get, Method::Patch]
        );
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("GET".parse::<Method>().unwrap(), Method::Get);
        assert_eq!(" patch ".parse::<Method>().unwrap(), Method::Patch);
        assert!(matches!(
            "fetch".parse::<Method>(),
            Err(FastautoError::InvalidMethod { .. })
        ));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Method::Delete).unwrap(), "\"delete\"");
        assert_eq!(
            serde_json::to_string(&RouteType::Specific).unwrap(),
            "\"SPECIFIC\""
        );
    }
}

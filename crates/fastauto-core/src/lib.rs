pub mod config;
pub mod error;
pub mod format;
pub mod inflect;
pub mod lang;
pub mod route;
pub mod scaffold;
pub mod security;

pub use config::{Settings, CONFIG_FILE, TOML_CONFIG_FILE};
pub use error::{FastautoError, Result};
pub use format::{FormatConfig, Formatter};
pub use inflect::{EnglishPluralizer, Pluralizer};
pub use lang::SourceLang;
pub use route::{
    classify, get_parameters, validate_route_path, Classifier, ClassifyOptions, Method, NameInfo,
    RouteType,
};
pub use scaffold::{RouteRequest, RouteScaffolder, Scaffold, SecurityRequest, SecurityScaffolder};
pub use security::SecurityType;

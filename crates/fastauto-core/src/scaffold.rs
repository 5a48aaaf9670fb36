//! Route and security file scaffolding.
//!
//! Scaffolders own a target directory. `plan` validates the request and
//! renders the source without touching the filesystem; `create` also writes
//! the file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{FastautoError, Result};
use crate::format::{self, Formatter};
use crate::lang::SourceLang;
use crate::route::{self, ClassifyOptions, Method, NameInfo};
use crate::security::{self, SecurityType};

/// A rendered file, written or about to be.
#[derive(Debug, Clone)]
pub struct Scaffold {
    pub path: PathBuf,
    pub source: String,
    /// Classification behind a route file; `None` for security files.
    pub name_info: Option<NameInfo>,
    pub warnings: Vec<String>,
}

fn ensure_dir(kind: &'static str, dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(FastautoError::DirectoryNotFound {
            kind,
            path: dir.to_path_buf(),
        })
    }
}

fn ensure_vacant(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(FastautoError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn write_scaffold(scaffold: &Scaffold) -> Result<()> {
    if let Some(parent) = scaffold.path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&scaffold.path, &scaffold.source)?;
    info!(path = %scaffold.path.display(), "wrote scaffold");
    Ok(())
}

// ============================================================================
// Routes
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    /// Route path relative to the routes directory, e.g. `users/:userId.ts`
    pub route: String,
    pub is_field: bool,
    /// Methods to generate; empty means the suggested ones
    pub methods: Vec<Method>,
    /// Overwrite an existing file
    pub force: bool,
}

impl RouteRequest {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            ..Self::default()
        }
    }
}

pub struct RouteScaffolder {
    routes_dir: PathBuf,
    formatter: Option<Formatter>,
}

impl RouteScaffolder {
    pub fn new(routes_dir: PathBuf) -> Self {
        Self {
            routes_dir,
            formatter: None,
        }
    }

    pub fn from_settings(settings: &Settings, project_dir: &Path) -> Self {
        Self::new(settings.routes_dir(project_dir))
            .with_formatter(Formatter::from_config(&settings.format))
    }

    pub fn with_formatter(mut self, formatter: Option<Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn routes_dir(&self) -> &Path {
        &self.routes_dir
    }

    /// Validate and render without writing.
    pub fn plan(&self, request: &RouteRequest) -> Result<Scaffold> {
        ensure_dir("routes", &self.routes_dir)?;
        route::validate_route_path(&request.route)?;

        let path = self.routes_dir.join(&request.route);
        ensure_vacant(&path, request.force)?;
        let lang = SourceLang::from_path(&path)?;

        let name_info = route::classify(
            &request.route,
            ClassifyOptions {
                is_field: request.is_field,
            },
        );
        let source = route::generate(lang, &name_info, &request.methods);
        let (source, warnings) = format::apply(self.formatter.as_ref(), lang, source);

        debug!(path = %path.display(), name = %name_info.name, "planned route");

        Ok(Scaffold {
            path,
            source,
            name_info: Some(name_info),
            warnings,
        })
    }

    /// Render and write the route file, creating intermediate directories.
    pub fn create(&self, request: &RouteRequest) -> Result<Scaffold> {
        let scaffold = self.plan(request)?;
        write_scaffold(&scaffold)?;
        Ok(scaffold)
    }
}

// ============================================================================
// Security
// ============================================================================

#[derive(Debug, Clone)]
pub struct SecurityRequest {
    /// File name inside the security directory, e.g. `bearerToken.ts`
    pub name: String,
    pub security_type: SecurityType,
    pub force: bool,
}

impl SecurityRequest {
    pub fn new(security_type: SecurityType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            security_type,
            force: false,
        }
    }
}

pub struct SecurityScaffolder {
    security_dir: PathBuf,
    formatter: Option<Formatter>,
}

impl SecurityScaffolder {
    pub fn new(security_dir: PathBuf) -> Self {
        Self {
            security_dir,
            formatter: None,
        }
    }

    pub fn from_settings(settings: &Settings, project_dir: &Path) -> Self {
        Self::new(settings.security_dir(project_dir))
            .with_formatter(Formatter::from_config(&settings.format))
    }

    pub fn with_formatter(mut self, formatter: Option<Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn security_dir(&self) -> &Path {
        &self.security_dir
    }

    pub fn plan(&self, request: &SecurityRequest) -> Result<Scaffold> {
        ensure_dir("security", &self.security_dir)?;
        security::validate_security_name(&request.name)?;

        let path = self.security_dir.join(&request.name);
        ensure_vacant(&path, request.force)?;
        let lang = SourceLang::from_path(&path)?;

        let source = security::generate(lang, request.security_type);
        let (source, warnings) = format::apply(self.formatter.as_ref(), lang, source);

        Ok(Scaffold {
            path,
            source,
            name_info: None,
            warnings,
        })
    }

    pub fn create(&self, request: &SecurityRequest) -> Result<Scaffold> {
        let scaffold = self.plan(request)?;
        write_scaffold(&scaffold)?;
        Ok(scaffold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteType;
    use tempfile::TempDir;

    fn routes_fixture() -> (TempDir, RouteScaffolder) {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("src").join("routes");
        fs::create_dir_all(&dir).unwrap();
        (temp, RouteScaffolder::new(dir))
    }

    #[test]
    fn test_create_route() {
        let (_temp, scaffolder) = routes_fixture();

        let scaffold = scaffolder.create(&RouteRequest::new("users.ts")).unwrap();
        assert_eq!(scaffold.path, scaffolder.routes_dir().join("users.ts"));
        assert!(scaffold.path.exists());
        assert!(scaffold.warnings.is_empty());

        let info = scaffold.name_info.unwrap();
        assert_eq!(info.route_type, RouteType::Resource);

        let written = fs::read_to_string(&scaffold.path).unwrap();
        assert_eq!(written, scaffold.source);
        assert!(written.contains("interface GetRequestUsers extends RequestUsers"));
    }

    #[test]
    fn test_create_nested_route_makes_directories() {
        let (_temp, scaffolder) = routes_fixture();

        let scaffold = scaffolder
            .create(&RouteRequest::new("users/:userId/photos.ts"))
            .unwrap();
        assert!(scaffolder.routes_dir().join("users").join(":userId").is_dir());
        assert!(scaffold.path.ends_with("photos.ts"));
        assert_eq!(scaffold.name_info.unwrap().name, "UserByIdPhotos");
    }

    #[test]
    fn test_route_already_exists() {
        let (_temp, scaffolder) = routes_fixture();
        scaffolder.create(&RouteRequest::new("users.ts")).unwrap();

        let again = scaffolder.create(&RouteRequest::new("users.ts"));
        assert!(matches!(again, Err(FastautoError::AlreadyExists { .. })));

        let forced = RouteRequest {
            force: true,
            ..RouteRequest::new("users.ts")
        };
        assert!(scaffolder.create(&forced).is_ok());
    }

    #[test]
    fn test_missing_routes_dir() {
        let temp = TempDir::new().unwrap();
        let scaffolder = RouteScaffolder::new(temp.path().join("missing"));

        let result = scaffolder.plan(&RouteRequest::new("users.ts"));
        assert!(matches!(
            result,
            Err(FastautoError::DirectoryNotFound { kind: "routes", .. })
        ));
    }

    #[test]
    fn test_invalid_route() {
        let (_temp, scaffolder) = routes_fixture();
        let result = scaffolder.plan(&RouteRequest::new("users.rs"));
        assert!(matches!(result, Err(FastautoError::InvalidRoute { .. })));
    }

    #[test]
    fn test_plan_does_not_write() {
        let (_temp, scaffolder) = routes_fixture();
        let request = RouteRequest {
            is_field: true,
            methods: vec![Method::Get],
            ..RouteRequest::new("users/:userId/email.js")
        };

        let scaffold = scaffolder.plan(&request).unwrap();
        assert!(!scaffold.path.exists());
        assert_eq!(scaffold.name_info.unwrap().route_type, RouteType::Field);
        assert!(scaffold.source.contains("  get: {"));
        assert!(!scaffold.source.contains("  patch: {"));
    }

    #[test]
    fn test_missing_formatter_falls_back_with_warning() {
        let (_temp, scaffolder) = routes_fixture();
        let scaffolder = scaffolder.with_formatter(Some(Formatter::new(
            "fastauto-no-such-formatter-binary",
        )));

        let scaffold = scaffolder.create(&RouteRequest::new("orders.ts")).unwrap();
        assert_eq!(scaffold.warnings.len(), 1);
        assert!(scaffold.source.contains("GetRequestOrders"));
    }

    #[test]
    fn test_from_settings_uses_configured_dirs() {
        let temp = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.set("baseDir", "app").unwrap();
        settings.set("security", "auth").unwrap();

        let routes = RouteScaffolder::from_settings(&settings, temp.path());
        assert_eq!(routes.routes_dir(), temp.path().join("app").join("routes"));

        let security = SecurityScaffolder::from_settings(&settings, temp.path());
        assert_eq!(security.security_dir(), temp.path().join("app").join("auth"));
    }

    #[test]
    fn test_create_security() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("security");
        fs::create_dir_all(&dir).unwrap();
        let scaffolder = SecurityScaffolder::new(dir);

        let request = SecurityRequest::new(SecurityType::Basic, "usernameAndPassword.ts");
        let scaffold = scaffolder.create(&request).unwrap();
        assert!(scaffold.path.exists());
        assert!(scaffold.name_info.is_none());
        assert!(fs::read_to_string(&scaffold.path)
            .unwrap()
            .contains("StrictBasicAuthSecurity<Entity>"));

        let again = scaffolder.create(&request);
        assert!(matches!(again, Err(FastautoError::AlreadyExists { .. })));
    }

    #[test]
    fn test_security_validation() {
        let temp = TempDir::new().unwrap();
        let missing = SecurityScaffolder::new(temp.path().join("security"));
        assert!(matches!(
            missing.plan(&SecurityRequest::new(SecurityType::Bearer, "bearer.ts")),
            Err(FastautoError::DirectoryNotFound { kind: "security", .. })
        ));

        let scaffolder = SecurityScaffolder::new(temp.path().to_path_buf());
        assert!(matches!(
            scaffolder.plan(&SecurityRequest::new(SecurityType::Bearer, "bearer-token.ts")),
            Err(FastautoError::InvalidSecurityName { .. })
        ));
    }
}

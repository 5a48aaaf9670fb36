//! Route path classifier.
//!
//! Turns a route file path such as `users/:userId/photos.ts` into a
//! [`NameInfo`]: the PascalCase type name used by generated code, the kind of
//! endpoint the path describes, and the HTTP methods that usually go with it.
//!
//! The pipeline works on capitalized path segments:
//!
//! 1. `{{x}}` and `:x` parameter segments are reduced to `X`
//! 2. a segment that starts with the singular of the previous segment becomes a
//!    "By" segment (`Users`, `UserId` -> `Users`, `ById`)
//! 3. a segment followed by a "By" segment is singularized (`User`, `ById`)
//! 4. the last segment decides the [`RouteType`]
//!
//! ```rust
//! use fastauto_core::{classify, ClassifyOptions, RouteType};
//!
//! let info = classify("users/:userId.ts", ClassifyOptions::default());
//! assert_eq!(info.name, "UserById");
//! assert_eq!(info.route_type, RouteType::Specific);
//! assert_eq!(info.parameters, vec!["userId"]);
//! assert_eq!(info.resource.as_deref(), Some("User"));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::inflect::{EnglishPluralizer, Pluralizer};

use super::method::{Method, RouteType};

const BY_PREFIX: &str = "By";

static BRACE_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]*)\}\}").expect("brace parameter regex"));
static COLON_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":[^/]*").expect("colon parameter regex"));

/// Caller-supplied classification flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifyOptions {
    /// Force [`RouteType::Field`] regardless of the path.
    pub is_field: bool,
}

impl ClassifyOptions {
    pub fn field() -> Self {
        Self { is_field: true }
    }
}

/// Classification result for one route path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameInfo {
    /// PascalCase identifier built from the path segments.
    pub name: String,
    #[serde(rename = "type")]
    pub route_type: RouteType,
    pub suggested_methods: Vec<Method>,
    /// Path parameter names, brace syntax first, then colon syntax.
    pub parameters: Vec<String>,
    /// Nearest non-"By" segment, singular.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Trailing verb segment of an action route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// Path classifier over an injected pluralization oracle.
#[derive(Debug, Clone, Default)]
pub struct Classifier<P = EnglishPluralizer> {
    pluralizer: P,
}

impl<P: Pluralizer> Classifier<P> {
    pub fn new(pluralizer: P) -> Self {
        Self { pluralizer }
    }

    pub fn classify(&self, path: &str, options: ClassifyOptions) -> NameInfo {
        let path_no_ext = strip_extension(path);

        let segments: Vec<String> = path_no_ext
            .split('/')
            .filter(|s| !s.is_empty())
            .map(parameter_name)
            .map(|s| capitalize_first(&s))
            .collect();

        let merged = self.merge_previous(segments);
        let mut parts = self.singularize_next(&merged);

        let last = parts.last().map(String::as_str).unwrap_or_default();
        let route_type = if options.is_field {
            RouteType::Field
        } else if last.starts_with(BY_PREFIX) {
            RouteType::Specific
        } else if self.pluralizer.is_plural(last) {
            RouteType::Resource
        } else {
            RouteType::Action
        };

        let mut name = parts.concat();
        let mut action = None;
        if route_type == RouteType::Action {
            action = parts.pop();
            name = action.iter().chain(parts.iter()).map(String::as_str).collect();
        }

        let info = NameInfo {
            name,
            route_type,
            suggested_methods: route_type.suggested_methods(),
            parameters: get_parameters(&path_no_ext),
            resource: self.find_last_resource(&parts),
            action,
        };

        debug!(
            path,
            name = %info.name,
            route_type = %info.route_type,
            parameters = ?info.parameters,
            "classified route path"
        );

        info
    }

    /// Collapse parameter segments named after the previous segment into "By" segments.
    fn merge_previous(&self, segments: Vec<String>) -> Vec<String> {
        let mut merged: Vec<String> = Vec::with_capacity(segments.len());
        for segment in segments {
            let resolved = match merged.last() {
                Some(previous) => self.merge_with(previous, segment),
                None => segment,
            };
            merged.push(resolved);
        }
        merged
    }

    fn merge_with(&self, previous: &str, segment: String) -> String {
        let stem = self.stem(previous);
        if !segment.starts_with(stem.as_str()) {
            return segment;
        }

        let rest = segment.replacen(stem.as_str(), "", 1);
        format!(
            "{}{}",
            BY_PREFIX,
            capitalize_first(&self.pluralizer.singular(&rest))
        )
    }

    fn stem(&self, word: &str) -> String {
        if self.pluralizer.is_plural(word) {
            self.pluralizer.singular(word)
        } else {
            word.to_string()
        }
    }

    /// Singularize every segment that is followed by a "By" segment.
    fn singularize_next(&self, merged: &[String]) -> Vec<String> {
        merged
            .iter()
            .enumerate()
            .map(|(i, segment)| match merged.get(i + 1) {
                Some(next) if next.starts_with(BY_PREFIX) => self.pluralizer.singular(segment),
                _ => segment.clone(),
            })
            .collect()
    }

    fn find_last_resource(&self, parts: &[String]) -> Option<String> {
        parts
            .iter()
            .rev()
            .find(|part| !part.starts_with(BY_PREFIX))
            .map(|part| capitalize_first(&self.pluralizer.singular(part)))
    }
}

/// Classify `path` with the default English oracle.
pub fn classify(path: &str, options: ClassifyOptions) -> NameInfo {
    Classifier::new(EnglishPluralizer).classify(path, options)
}

/// Remove the first occurrence of the path's final extension.
///
/// `docs.ts/readme.ts` becomes `docs/readme.ts`: the text after the last dot
/// is looked up from the start of the path, not anchored at the end.
pub fn strip_extension(path: &str) -> String {
    let ext = format!(".{}", path.rsplit('.').next().unwrap_or_default());
    path.replacen(&ext, "", 1)
}

/// Parameter names in `path`: every `{{x}}` match, then every `:x` match.
pub fn get_parameters(path: &str) -> Vec<String> {
    let braces = BRACE_PARAM
        .captures_iter(path)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()));
    let colons = COLON_PARAM
        .find_iter(path)
        .map(|m| m.as_str().replace(':', ""));

    braces.chain(colons).collect()
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn parameter_name(segment: &str) -> String {
    if segment.starts_with("{{") {
        segment.replacen("{{", "", 1).replacen("}}", "", 1)
    } else if segment.starts_with(':') {
        segment.replacen(':', "", 1)
    } else {
        segment.to_string()
    }
}

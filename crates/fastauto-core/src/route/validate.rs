use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FastautoError, Result};

// First segment plain; later segments plain, `:param` or `{{param}}`.
static ROUTE_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9]+(/([A-Za-z0-9]+|:[A-Za-z0-9]+|\{\{[A-Za-z0-9]+\}\}))*\.(ts|js)$")
        .expect("route path regex")
});

pub fn is_valid_route_path(route: &str) -> bool {
    ROUTE_PATH.is_match(route)
}

/// Reject route arguments the classifier is not meant to see.
pub fn validate_route_path(route: &str) -> Result<()> {
    if is_valid_route_path(route) {
        Ok(())
    } else {
        Err(FastautoError::InvalidRoute {
            route: route.to_string(),
        })
    }
}

//! # Route Module
//!
//! Everything needed to go from a route file path to a `fastify-autoroutes`
//! module:
//!
//! - `classifier`: path -> [`NameInfo`]
//! - `method`: HTTP verbs and route kinds
//! - `validate`: accepted route path grammar
//! - `generator`: [`NameInfo`] -> TypeScript / JavaScript source
//!
//! ```rust
//! use fastauto_core::route::{self, ClassifyOptions, Method};
//! use fastauto_core::SourceLang;
//!
//! let info = route::classify("users.ts", ClassifyOptions::default());
//! assert_eq!(info.suggested_methods, vec![Method::Get, Method::Post]);
//!
//! let source = route::generate(SourceLang::Ts, &info, &[]);
//! assert!(source.contains("Body: CreateUser"));
//! ```

mod classifier;
mod generator;
mod method;
mod validate;

pub use classifier::{
    capitalize_first, classify, get_parameters, strip_extension, Classifier, ClassifyOptions,
    NameInfo,
};
pub use generator::{generate, resolve_methods};
pub use method::{Method, RouteType};
pub use validate::{is_valid_route_path, validate_route_path};

//! Route stub generation for `fastify-autoroutes`.

use tracing::debug;

use crate::lang::SourceLang;

use super::classifier::NameInfo;
use super::method::{Method, RouteType};

const PAGINATION_QUERY: &str = "Pagination & (GetByIds | Search)";

/// Render a route module for `info`.
///
/// An empty `methods` slice falls back to the suggested methods. Methods are
/// always emitted in [`Method::ALL`] order.
pub fn generate(lang: SourceLang, info: &NameInfo, methods: &[Method]) -> String {
    let methods = resolve_methods(info, methods);
    debug!(name = %info.name, %lang, ?methods, "generating route stub");

    match lang {
        SourceLang::Ts => generate_ts(info, &methods),
        SourceLang::Js => generate_js(info, &methods),
    }
}

pub fn resolve_methods(info: &NameInfo, requested: &[Method]) -> Vec<Method> {
    let wanted = if requested.is_empty() {
        info.suggested_methods.as_slice()
    } else {
        requested
    };

    Method::ALL
        .into_iter()
        .filter(|m| wanted.contains(m))
        .collect()
}

// ============================================================================
// TypeScript
// ============================================================================

fn generate_ts(info: &NameInfo, methods: &[Method]) -> String {
    let mut out = String::new();
    out.push_str(
        "import type { FastifyInstance, FastifyRequest, RequestGenericInterface } from 'fastify'\n",
    );
    out.push_str("import type { StrictResource } from 'fastify-autoroutes'\n\n");

    out.push_str(&base_interface(info));
    for method in methods {
        out.push('\n');
        out.push_str(&method_interface(*method, info));
    }

    out.push_str("\nexport default (fastify: FastifyInstance): StrictResource => ({\n");
    for method in methods {
        out.push_str(&implementation(*method, info, SourceLang::Ts));
    }
    out.push_str("})\n");
    out
}

fn base_interface(info: &NameInfo) -> String {
    if info.parameters.is_empty() {
        return format!(
            "interface Request{} extends RequestGenericInterface {{}}\n",
            info.name
        );
    }

    let params: String = info
        .parameters
        .iter()
        .map(|p| format!("    {}: string\n", p))
        .collect();

    format!(
        "interface Request{} extends RequestGenericInterface {{\n  Params: {{\n{}  }}\n}}\n",
        info.name, params
    )
}

fn method_interface(method: Method, info: &NameInfo) -> String {
    let members: Vec<String> = [querystring(method, info), body(method, info)]
        .into_iter()
        .flatten()
        .map(|m| format!("  {}\n", m))
        .collect();

    let head = format!(
        "interface {} extends Request{}",
        interface_name(method, info),
        info.name
    );

    if members.is_empty() {
        format!("{} {{}}\n", head)
    } else {
        format!("{} {{\n{}}}\n", head, members.concat())
    }
}

fn interface_name(method: Method, info: &NameInfo) -> String {
    format!("{}Request{}", method.title(), info.name)
}

fn querystring(method: Method, info: &NameInfo) -> Option<String> {
    match (method, info.route_type) {
        (Method::Get, RouteType::Resource) => Some(format!("Querystring: {}", PAGINATION_QUERY)),
        _ => None,
    }
}

fn body(method: Method, info: &NameInfo) -> Option<String> {
    match (method, info.route_type) {
        (Method::Put | Method::Patch, RouteType::Specific) => {
            Some(format!("Body: Update{}", resource_name(info)))
        }
        (Method::Post, RouteType::Resource) => Some(format!("Body: Create{}", resource_name(info))),
        (Method::Post, RouteType::Action) => Some(format!(
            "Body: Do{}",
            info.action.as_deref().unwrap_or(&info.name)
        )),
        _ => None,
    }
}

/// Handler result type, `None` for handlers that return nothing.
fn return_type(method: Method, info: &NameInfo) -> Option<String> {
    match method {
        Method::Get => match info.route_type {
            RouteType::Resource => Some(format!("Pagination<{}>", info.name)),
            RouteType::Specific => Some(info.name.clone()),
            RouteType::Field => Some(field_type(info)),
            RouteType::Action => Some("unknown".to_string()),
        },
        Method::Put | Method::Patch => match info.route_type {
            RouteType::Specific => Some(info.name.clone()),
            RouteType::Field => Some(field_type(info)),
            _ => None,
        },
        Method::Post => match info.route_type {
            RouteType::Resource => Some(resource_name(info).to_string()),
            RouteType::Action => Some("unknown".to_string()),
            _ => None,
        },
        Method::Delete | Method::Options | Method::Head => None,
    }
}

fn field_type(info: &NameInfo) -> String {
    match &info.resource {
        Some(resource) => format!("{}['{}']", info.name, resource.to_lowercase()),
        None => info.name.clone(),
    }
}

fn resource_name(info: &NameInfo) -> &str {
    info.resource.as_deref().unwrap_or(&info.name)
}

// ============================================================================
// JavaScript
// ============================================================================

fn generate_js(info: &NameInfo, methods: &[Method]) -> String {
    let mut out = String::from("export default (fastify) => ({\n");
    for method in methods {
        out.push_str(&implementation(*method, info, SourceLang::Js));
    }
    out.push_str("})\n");
    out
}

// ============================================================================
// Shared
// ============================================================================

fn implementation(method: Method, info: &NameInfo, lang: SourceLang) -> String {
    let returns = return_type(method, info);

    let signature = match lang {
        SourceLang::Ts => format!(
            "async (request: FastifyRequest<{}>): Promise<{}> =>",
            interface_name(method, info),
            returns.as_deref().unwrap_or("void")
        ),
        SourceLang::Js => "async (request) =>".to_string(),
    };

    let statement = match returns {
        Some(_) => format!(
            "throw new Error('not implemented: {} {}')",
            method, info.name
        ),
        None => "return".to_string(),
    };

    format!(
        r#"  {method}: {{
    schema: {{
      summary: '{method} {name}',
      description: 'long {method} {name}',
      tags: ['{name}'],
      accepts: ['application/json'],
      produces: ['application/json'],
      response: {{
        // 200: use({name})
      }},
    }},
    handler: {signature} {{
      {statement}
    }},
  }},
"#,
        method = method,
        name = info.name,
        signature = signature,
        statement = statement,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{classify, ClassifyOptions};

    fn ts(path: &str) -> String {
        generate(
            SourceLang::Ts,
            &classify(path, ClassifyOptions::default()),
            &[],
        )
    }

    #[test]
    fn test_resource_ts() {
        let source = ts("users.ts");
        assert!(source.starts_with("import type { FastifyInstance, FastifyRequest"));
        assert!(source.contains("interface RequestUsers extends RequestGenericInterface {}"));
        assert!(source.contains("interface GetRequestUsers extends RequestUsers {\n  Querystring: Pagination & (GetByIds | Search)\n}"));
        assert!(source.contains("interface PostRequestUsers extends RequestUsers {\n  Body: CreateUser\n}"));
        assert!(source.contains("export default (fastify: FastifyInstance): StrictResource => ({"));
        assert!(source.contains("  get: {"));
        assert!(source.contains("  post: {"));
        assert!(!source.contains("  put: {"));
        assert!(source.contains("Promise<Pagination<Users>>"));
        assert!(source.contains("summary: 'get Users'"));
        assert!(source.contains("tags: ['Users']"));
    }

    #[test]
    fn test_specific_ts() {
        let source = ts("users/:userId.ts");
        assert!(source.contains(
            "interface RequestUserById extends RequestGenericInterface {\n  Params: {\n    userId: string\n  }\n}"
        ));
        assert!(source.contains("interface PutRequestUserById extends RequestUserById {\n  Body: UpdateUser\n}"));
        assert!(source.contains("interface DeleteRequestUserById extends RequestUserById {}"));
        assert!(source.contains("FastifyRequest<GetRequestUserById>): Promise<UserById>"));
        assert!(source.contains("FastifyRequest<DeleteRequestUserById>): Promise<void>"));
        assert!(!source.contains("  post: {"));
    }

    #[test]
    fn test_action_ts() {
        let source = ts("sendEmail.ts");
        assert!(source.contains("interface PostRequestSendEmail extends RequestSendEmail {\n  Body: DoSendEmail\n}"));
        assert!(source.contains("Promise<unknown>"));
    }

    #[test]
    fn test_field_ts() {
        let info = classify("users/:userId/email.ts", ClassifyOptions::field());
        let source = generate(SourceLang::Ts, &info, &[]);
        assert!(source.contains("interface PatchRequestUserByIdEmail extends RequestUserByIdEmail {}"));
        assert!(source.contains("Promise<UserByIdEmail['email']>"));
    }

    #[test]
    fn test_methods_in_canonical_order() {
        let info = classify("users.ts", ClassifyOptions::default());
        let methods = resolve_methods(&info, &[Method::Delete, Method::Get]);
        assert_eq!(methods, vec![Method::Get, Method::Delete]);

        let source = generate(SourceLang::Ts, &info, &[Method::Delete, Method::Get]);
        let get = source.find("  get: {").unwrap();
        let delete = source.find("  delete: {").unwrap();
        assert!(get < delete);
        assert!(!source.contains("  post: {"));
    }

    #[test]
    fn test_js_has_no_types() {
        let info = classify("users/:userId.ts", ClassifyOptions::default());
        let source = generate(SourceLang::Js, &info, &[]);
        assert!(source.starts_with("export default (fastify) => ({"));
        assert!(source.contains("handler: async (request) => {"));
        assert!(!source.contains("interface"));
        assert!(!source.contains("import type"));
        assert!(source.contains("  put: {"));
        assert!(source.contains("  delete: {"));
    }

    #[test]
    fn test_void_handler_returns() {
        let info = classify("users/:userId.ts", ClassifyOptions::default());
        let source = generate(SourceLang::Ts, &info, &[Method::Delete]);
        assert!(source.contains("      return\n"));
        assert!(!source.contains("throw new Error"));
    }
}

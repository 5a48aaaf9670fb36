//! Security handler stubs for `fastify-autosecurity`.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{FastautoError, Result};
use crate::lang::SourceLang;

/// Entity type the generated handlers resolve to.
pub const ENTITY_NAME: &str = "Entity";

static SECURITY_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+\.(ts|js)$").expect("security name regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityType {
    /// `Authorization` header API key.
    Bearer,
    /// HTTP basic auth.
    Basic,
}

impl SecurityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bearer => "bearer",
            Self::Basic => "basic",
        }
    }

    /// Type exported by `fastify-autosecurity` for this scheme.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bearer => "StrictApiKeySecurity",
            Self::Basic => "StrictBasicAuthSecurity",
        }
    }
}

impl fmt::Display for SecurityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityType {
    type Err = FastautoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "bearer" => Ok(Self::Bearer),
            "basic" => Ok(Self::Basic),
            _ => Err(FastautoError::InvalidSecurityType {
                value: s.to_string(),
            }),
        }
    }
}

pub fn validate_security_name(name: &str) -> Result<()> {
    if SECURITY_NAME.is_match(name) {
        Ok(())
    } else {
        Err(FastautoError::InvalidSecurityName {
            name: name.to_string(),
        })
    }
}

/// Render a security module.
pub fn generate(lang: SourceLang, security_type: SecurityType) -> String {
    debug!(%lang, %security_type, "generating security stub");

    let typed = lang == SourceLang::Ts;
    let mut out = String::new();

    if typed {
        out.push_str("import type { FastifyInstance } from 'fastify'\n");
        out.push_str(&format!(
            "import type {{ {} }} from 'fastify-autosecurity'\n\n",
            security_type.type_name()
        ));
        out.push_str(&format!(
            "export default (fastify: FastifyInstance): {}<{}> => ({{\n",
            security_type.type_name(),
            ENTITY_NAME
        ));
    } else {
        out.push_str("export default (fastify) => ({\n");
    }

    out.push_str(security_block(security_type));
    out.push_str(&handle_block(security_type, typed));
    out.push_str(&scopes_block(typed));
    out.push_str("})\n");
    out
}

fn security_block(security_type: SecurityType) -> &'static str {
    match security_type {
        SecurityType::Basic => "  security: {\n    type: 'basic',\n  },\n",
        SecurityType::Bearer => {
            "  security: {\n    type: 'apiKey',\n    in: 'header',\n    name: 'Authorization',\n  },\n"
        }
    }
}

fn handle_block(security_type: SecurityType, typed: bool) -> String {
    let returns = if typed {
        format!(": Promise<{} | undefined>", ENTITY_NAME)
    } else {
        String::new()
    };
    let cast = if typed {
        format!(" as {}", ENTITY_NAME)
    } else {
        String::new()
    };
    let arg = |name: &str| {
        if typed {
            format!("{}: string", name)
        } else {
            name.to_string()
        }
    };

    match security_type {
        SecurityType::Basic => format!(
            r#"  handle: async ({username}, {password}){returns} => {{
    if (password.length === 0) {{
      throw new Error('missing password')
    }}

    // change with your entity for security
    return {{ username: username }}{cast}
  }},
"#,
            username = arg("username"),
            password = arg("password"),
            returns = returns,
            cast = cast,
        ),
        SecurityType::Bearer => format!(
            r#"  handle: async ({token}){returns} => {{
    if (token.length !== 10) {{
      throw new Error('our token is 10 character length')
    }}

    // change with your entity for security
    return {{ username: extractUsernameFromToken(token) }}{cast}
  }},
"#,
            token = arg("token"),
            returns = returns,
            cast = cast,
        ),
    }
}

fn scopes_block(typed: bool) -> String {
    let signature = if typed {
        format!(
            "async (entity: {}, scopes: string[]): Promise<boolean>",
            ENTITY_NAME
        )
    } else {
        "async (entity, scopes)".to_string()
    };

    format!(
        "  scopes: {} => {{\n    return scopes.every((scope) => hasPermission(entity, scope))\n  }},\n",
        signature
    )
}

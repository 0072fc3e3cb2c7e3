//! HTTP endpoint detection from route-registration idioms.
//!
//! Each [`LangFamily`] owns an ordered list of endpoint rules. A rule is a
//! regex plus the capture groups holding the method and the path; rules whose
//! idiom carries no method fall back to a fixed one.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::family::LangFamily;

/// One `(method, path)` pair registered by a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Endpoint {
    /// Upper-cased HTTP method, or `ANY` when the idiom does not say.
    pub method: String,
    pub path: String,
}

impl Endpoint {
    /// Node label, e.g. `(GET /users)`.
    pub fn label(&self) -> String {
        format!("({} {})", self.method, self.path)
    }
}

struct EndpointRule {
    regex: Regex,
    method_group: Option<usize>,
    path_group: usize,
    default_method: &'static str,
    /// Group 1 holds the call receiver; matches on these receivers are
    /// outbound client calls, not route registrations.
    client_receivers: &'static [&'static str],
}

impl EndpointRule {
    fn new(
        pattern: &str,
        method_group: Option<usize>,
        path_group: usize,
        default_method: &'static str,
    ) -> Self {
        Self {
            regex: Regex::new(pattern).expect("valid endpoint pattern"),
            method_group,
            path_group,
            default_method,
            client_receivers: &[],
        }
    }

    fn skipping_receivers(mut self, receivers: &'static [&'static str]) -> Self {
        self.client_receivers = receivers;
        self
    }

    fn extract(&self, lowered: &str, out: &mut Vec<Endpoint>) {
        for caps in self.regex.captures_iter(lowered) {
            let Some(path) = caps.get(self.path_group) else {
                continue;
            };
            if !self.client_receivers.is_empty()
                && caps
                    .get(1)
                    .is_some_and(|r| self.client_receivers.contains(&r.as_str()))
            {
                continue;
            }
            let method = self
                .method_group
                .and_then(|group| caps.get(group))
                .map(|m| m.as_str().to_ascii_uppercase())
                .unwrap_or_else(|| self.default_method.to_string());
            out.push(Endpoint {
                method,
                path: path.as_str().to_string(),
            });
        }
    }
}

const VERBS: &str = "get|post|put|delete|patch|options|head";

const JS_CLIENT_RECEIVERS: &[&str] = &[
    "axios", "http", "https", "client", "httpclient", "request", "superagent", "ky", "got",
    "$http",
];

static JAVASCRIPT_RULES: LazyLock<Vec<EndpointRule>> = LazyLock::new(|| {
    vec![
        // express / koa-router / fastify: usersRouter.get("/users", ...)
        EndpointRule::new(
            &format!(r#"([\w$]+)\.({VERBS}|all)\s*\(\s*['"`](/[^'"`]*)['"`]"#),
            Some(2),
            3,
            "ANY",
        )
        .skipping_receivers(JS_CLIENT_RECEIVERS),
        // nestjs: @Get("/users")
        EndpointRule::new(
            &format!(r#"@({VERBS})\(\s*['"`](/[^'"`]*)['"`]"#),
            Some(1),
            2,
            "ANY",
        ),
    ]
});

static PYTHON_RULES: LazyLock<Vec<EndpointRule>> = LazyLock::new(|| {
    vec![
        // fastapi / flask 2: @app.get("/users")
        EndpointRule::new(
            &format!(r#"@\w+(?:\.\w+)*\.({VERBS})\(\s*['"](/[^'"]*)['"]"#),
            Some(1),
            2,
            "ANY",
        ),
        // flask: @bp.route("/users", methods=["POST"])
        EndpointRule::new(
            r#"@\w+(?:\.\w+)*\.route\(\s*['"](/[^'"]*)['"](?:[^)]*?methods\s*=\s*[\[(]\s*['"](\w+)['"])?"#,
            Some(2),
            1,
            "GET",
        ),
    ]
});

static GO_RULES: LazyLock<Vec<EndpointRule>> = LazyLock::new(|| {
    vec![
        // gin / echo / chi / fiber: r.GET("/users", h)
        EndpointRule::new(
            &format!(r#"\.({VERBS}|any)\(\s*"(/[^"]*)""#),
            Some(1),
            2,
            "ANY",
        ),
        // net/http, optionally with a go 1.22 method prefix
        EndpointRule::new(
            &format!(r#"\.handle(?:func)?\(\s*"(?:({VERBS}) )?(/[^"]*)""#),
            Some(1),
            2,
            "ANY",
        ),
    ]
});

static RUST_RULES: LazyLock<Vec<EndpointRule>> = LazyLock::new(|| {
    vec![
        // actix-web / rocket attributes: #[get("/users")]
        EndpointRule::new(
            &format!(r#"#\[({VERBS})\(\s*"(/[^"]*)""#),
            Some(1),
            2,
            "ANY",
        ),
        // axum: .route("/users", get(list_users))
        EndpointRule::new(
            &format!(r#"\.route\(\s*"(/[^"]*)"\s*,\s*({VERBS})\("#),
            Some(2),
            1,
            "ANY",
        ),
        // actix-web: #[route("/users", method = "GET")]
        EndpointRule::new(
            r#"#\[route\(\s*"(/[^"]*)"(?:[^\]]*?method\s*=\s*"(\w+)")?"#,
            Some(2),
            1,
            "ANY",
        ),
    ]
});

static JVM_RULES: LazyLock<Vec<EndpointRule>> = LazyLock::new(|| {
    vec![
        // spring: @GetMapping("/users"), @PostMapping(value = "/users")
        EndpointRule::new(
            &format!(r#"@({VERBS})mapping\(\s*(?:(?:value|path)\s*=\s*)?\{{?\s*"(/[^"]*)""#),
            Some(1),
            2,
            "ANY",
        ),
        // spring: @RequestMapping(value = "/users", method = RequestMethod.GET)
        EndpointRule::new(
            r#"@requestmapping\(\s*(?:(?:value|path)\s*=\s*)?"(/[^"]*)"(?:[^)]*?method\s*=\s*requestmethod\.(\w+))?"#,
            Some(2),
            1,
            "ANY",
        ),
        // ktor: get("/users") { ... }
        EndpointRule::new(
            &format!(r#"(?m)^\s*({VERBS})\(\s*"(/[^"]*)"\s*\)\s*\{{"#),
            Some(1),
            2,
            "ANY",
        ),
    ]
});

fn rules_for(family: LangFamily) -> &'static [EndpointRule] {
    match family {
        LangFamily::JavaScript => JAVASCRIPT_RULES.as_slice(),
        LangFamily::Python => PYTHON_RULES.as_slice(),
        LangFamily::GoLike => GO_RULES.as_slice(),
        LangFamily::RustLike => RUST_RULES.as_slice(),
        LangFamily::JvmLike => JVM_RULES.as_slice(),
    }
}

/// Extract endpoints from a file's lower-cased text using its family's rules.
///
/// Results follow rule order, then match order within the text. Duplicates are
/// kept; the graph registry collapses them by identity.
pub fn detect_endpoints(family: LangFamily, lowered: &str) -> Vec<Endpoint> {
    let mut endpoints = Vec::new();
    for rule in rules_for(family) {
        rule.extract(lowered, &mut endpoints);
    }
    if !endpoints.is_empty() {
        tracing::trace!(family = %family, count = endpoints.len(), "endpoints detected");
    }
    endpoints
}

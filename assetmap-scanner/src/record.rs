use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Parse a verb token such as `get`, `POST` or `Delete`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            "PATCH" => Some(HttpMethod::Patch),
            _ => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Annotation family an endpoint was discovered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Framework {
    /// Class-level `@RequestMapping` with `@GetMapping`-style method bindings.
    Spring,
    /// `@Path` resources with bare `@GET`/`@POST` markers.
    #[serde(rename = "JAX-RS")]
    JaxRs,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Spring => "Spring",
            Framework::JaxRs => "JAX-RS",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Medium,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend route binding: verb + path + the handler it dispatches to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRecord {
    pub framework: Framework,
    pub http_method: HttpMethod,
    pub path: String,
    pub handler_name: String,
    pub source_file: String,
    pub line_number: usize,
}

pub type EndpointKey = (Framework, HttpMethod, String, String, String);

impl EndpointRecord {
    pub fn key(&self) -> EndpointKey {
        (
            self.framework,
            self.http_method,
            self.path.clone(),
            self.handler_name.clone(),
            self.source_file.clone(),
        )
    }
}

/// A navigation entry found in frontend markup or a route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    pub title: String,
    pub route: String,
    pub source_file: String,
    pub line_number: usize,
}

pub type MenuKey = (String, String, String);

impl MenuRecord {
    pub fn key(&self) -> MenuKey {
        (
            self.title.clone(),
            self.route.clone(),
            self.source_file.clone(),
        )
    }
}

/// A frontend expression that issues an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSiteRecord {
    pub http_method: HttpMethod,
    pub url: String,
    pub source_file: String,
    pub line_number: usize,
}

pub type CallSiteKey = (HttpMethod, String, String);

impl CallSiteRecord {
    pub fn key(&self) -> CallSiteKey {
        (self.http_method, self.url.clone(), self.source_file.clone())
    }
}

/// An inferred link between a menu entry and a backend endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationRecord {
    pub menu_route: String,
    pub menu_title: String,
    pub api_path: String,
    pub api_method: HttpMethod,
    pub confidence: Confidence,
    pub reason: String,
}

pub type RelationKey = (String, String, HttpMethod);

impl RelationRecord {
    pub fn key(&self) -> RelationKey {
        (self.menu_route.clone(), self.api_path.clone(), self.api_method)
    }
}

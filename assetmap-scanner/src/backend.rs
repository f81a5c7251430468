// Backend endpoint extraction from annotated Java sources
//
// Two independent annotation families are matched line by line. Nothing is
// parsed: a binding is accepted when a handler-shaped declaration follows it
// closely enough, and silently dropped otherwise.

use crate::normalize::{compose_path, line_of_offset};
use crate::record::{EndpointRecord, Framework, HttpMethod};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Lines searched after a binding for the handler declaration.
pub const HANDLER_LOOKAHEAD: usize = 12;

/// Lines searched after a bare verb marker for its `@Path` sub-path.
pub const SUB_PATH_LOOKAHEAD: usize = 5;

static CLASS_MAPPING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@RequestMapping\s*\(([^)]*)\)").expect("valid regex"));

static RESOURCE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@Path\s*\(([^)]*)\)").expect("valid regex"));

static MAPPING_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"@(GetMapping|PostMapping|PutMapping|DeleteMapping|PatchMapping|RequestMapping)\s*\(([^)]*)\)",
    )
    .expect("valid regex")
});

static VERB_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(GET|POST|PUT|DELETE|PATCH)\b").expect("valid regex"));

static REQUEST_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"RequestMethod\.(GET|POST|PUT|DELETE|PATCH)").expect("valid regex")
});

static METHOD_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:public|protected|private)\s+[\w<>,\[\]\s]+\s+(\w+)\s*\(").expect("valid regex")
});

static STRING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("valid regex"));

/// Run both annotation families over one file.
pub fn extract_endpoints(content: &str, source_file: &str) -> Vec<EndpointRecord> {
    let mut endpoints = Vec::new();

    endpoints.extend(scan_spring_bindings(content, source_file));
    endpoints.extend(scan_jaxrs_bindings(content, source_file));

    endpoints
}

/// `@RequestMapping` on the class plus `@GetMapping`/.../`@RequestMapping` on methods.
pub fn scan_spring_bindings(content: &str, source_file: &str) -> Vec<EndpointRecord> {
    let (class_path, class_line) = class_level_binding(content, &CLASS_MAPPING);
    let lines: Vec<&str> = content.lines().collect();
    let mut endpoints = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        // The class-level mapping is a prefix, not a method binding
        if class_line == Some(idx + 1) {
            continue;
        }
        let Some(caps) = MAPPING_ANNOTATION.captures(line) else {
            continue;
        };
        let annotation = caps.get(1).map_or("", |m| m.as_str());
        let args = caps.get(2).map_or("", |m| m.as_str());

        let Some(http_method) = spring_http_method(annotation, args) else {
            debug!(file = source_file, line = idx + 1, "Unresolvable verb, skipping binding");
            continue;
        };
        let Some(handler_name) = find_handler_name(&lines, idx + 1) else {
            debug!(file = source_file, line = idx + 1, "No handler after binding, skipping");
            continue;
        };

        endpoints.push(EndpointRecord {
            framework: Framework::Spring,
            http_method,
            path: compose_path(&class_path, &first_string_literal(args)),
            handler_name,
            source_file: source_file.to_string(),
            line_number: idx + 1,
        });
    }

    endpoints
}

/// `@Path` on the class plus bare `@GET`/`@POST`/... markers with an optional `@Path` below.
pub fn scan_jaxrs_bindings(content: &str, source_file: &str) -> Vec<EndpointRecord> {
    let (class_path, _) = class_level_binding(content, &RESOURCE_PATH);
    let lines: Vec<&str> = content.lines().collect();
    let mut endpoints = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(http_method) = VERB_MARKER
            .captures(line)
            .and_then(|caps| caps.get(1))
            .and_then(|m| HttpMethod::from_token(m.as_str()))
        else {
            continue;
        };

        let sub_path = lines
            .iter()
            .skip(idx + 1)
            .take(SUB_PATH_LOOKAHEAD)
            .find_map(|candidate| RESOURCE_PATH.captures(candidate))
            .and_then(|caps| caps.get(1))
            .map(|args| first_string_literal(args.as_str()))
            .unwrap_or_default();

        let Some(handler_name) = find_handler_name(&lines, idx + 1) else {
            debug!(file = source_file, line = idx + 1, "No handler after verb marker, skipping");
            continue;
        };

        endpoints.push(EndpointRecord {
            framework: Framework::JaxRs,
            http_method,
            path: compose_path(&class_path, &sub_path),
            handler_name,
            source_file: source_file.to_string(),
            line_number: idx + 1,
        });
    }

    endpoints
}

/// Path of the first class-level match and the 1-based line it sits on.
fn class_level_binding(content: &str, pattern: &Regex) -> (String, Option<usize>) {
    let Some(caps) = pattern.captures(content) else {
        return (String::new(), None);
    };
    let path = caps
        .get(1)
        .map(|args| first_string_literal(args.as_str()))
        .unwrap_or_default();
    let line = caps.get(0).map(|whole| line_of_offset(content, whole.start()));
    (path, line)
}

fn spring_http_method(annotation: &str, args: &str) -> Option<HttpMethod> {
    match annotation {
        "GetMapping" => Some(HttpMethod::Get),
        "PostMapping" => Some(HttpMethod::Post),
        "PutMapping" => Some(HttpMethod::Put),
        "DeleteMapping" => Some(HttpMethod::Delete),
        "PatchMapping" => Some(HttpMethod::Patch),
        "RequestMapping" => match REQUEST_METHOD.captures(args).and_then(|caps| caps.get(1)) {
            Some(verb) => HttpMethod::from_token(verb.as_str()),
            None => Some(HttpMethod::Get),
        },
        _ => None,
    }
}

/// Name of the first method declared within the lookahead window after `start`.
fn find_handler_name(lines: &[&str], start: usize) -> Option<String> {
    lines
        .iter()
        .skip(start)
        .take(HANDLER_LOOKAHEAD)
        .find_map(|line| METHOD_DECLARATION.captures(line).and_then(|caps| caps.get(1)))
        .map(|name| name.as_str().to_string())
}

fn first_string_literal(args: &str) -> String {
    STRING_LITERAL
        .captures(args)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPRING_CONTROLLER: &str = r#"import org.springframework.web.bind.annotation.*;
@RestController
@RequestMapping("/user")
public class DemoController {
    @GetMapping("/list")
    public String list(){ return "ok"; }
}
"#;

    const JAXRS_RESOURCE: &str = r#"import javax.ws.rs.*;
@Path("/order")
public class OrderService {
    @POST
    @Path("/create")
    public String create(){ return "ok"; }
}
"#;

    #[test]
    fn test_spring_class_and_method_binding() {
        let endpoints = extract_endpoints(SPRING_CONTROLLER, "DemoController.java");

        assert_eq!(endpoints.len(), 1);
        let endpoint = &endpoints[0];
        assert_eq!(endpoint.framework, Framework::Spring);
        assert_eq!(endpoint.http_method, HttpMethod::Get);
        assert_eq!(endpoint.path, "/user/list");
        assert_eq!(endpoint.handler_name, "list");
        assert_eq!(endpoint.source_file, "DemoController.java");
        assert_eq!(endpoint.line_number, 5);
    }

    #[test]
    fn test_jaxrs_verb_marker_with_sub_path() {
        let endpoints = extract_endpoints(JAXRS_RESOURCE, "OrderService.java");

        assert_eq!(endpoints.len(), 1);
        let endpoint = &endpoints[0];
        assert_eq!(endpoint.framework, Framework::JaxRs);
        assert_eq!(endpoint.http_method, HttpMethod::Post);
        assert_eq!(endpoint.path, "/order/create");
        assert_eq!(endpoint.handler_name, "create");
        assert_eq!(endpoint.line_number, 4);
    }

    #[test]
    fn test_request_mapping_reads_explicit_verb() {
        let source = r#"@RequestMapping("/api/items")
public class ItemController {
    @RequestMapping(value = "/remove", method = RequestMethod.DELETE)
    public ResponseEntity<Void> remove(@PathVariable Long id) {
        return null;
    }

    @RequestMapping("/all")
    public List<Item> all() {
        return null;
    }
}
"#;
        let endpoints = scan_spring_bindings(source, "ItemController.java");

        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].http_method, HttpMethod::Delete);
        assert_eq!(endpoints[0].path, "/api/items/remove");
        assert_eq!(endpoints[0].handler_name, "remove");
        assert_eq!(endpoints[1].http_method, HttpMethod::Get);
        assert_eq!(endpoints[1].path, "/api/items/all");
        assert_eq!(endpoints[1].handler_name, "all");
    }

    #[test]
    fn test_binding_without_sub_path_uses_class_path() {
        let source = r#"@RequestMapping("/health/")
public class HealthController {
    @PostMapping()
    public void ping() {}
}
"#;
        let endpoints = scan_spring_bindings(source, "HealthController.java");

        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].path, "/health");
        assert_eq!(endpoints[0].http_method, HttpMethod::Post);
    }

    #[test]
    fn test_no_class_path_yields_method_path_only() {
        let source = r#"public class Routes {
    @PutMapping("/profile")
    protected Map<String, Object> updateProfile(Body body) {}
}
"#;
        let endpoints = scan_spring_bindings(source, "Routes.java");

        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].path, "/profile");
        assert_eq!(endpoints[0].handler_name, "updateProfile");
    }

    #[test]
    fn test_handler_beyond_lookahead_is_skipped() {
        let mut source = String::from("@GetMapping(\"/far\")\n");
        for _ in 0..HANDLER_LOOKAHEAD {
            source.push_str("// filler\n");
        }
        source.push_str("public String far() {}\n");

        assert!(scan_spring_bindings(&source, "Far.java").is_empty());
    }

    #[test]
    fn test_handler_at_lookahead_edge_is_found() {
        let mut source = String::from("@GetMapping(\"/near\")\n");
        for _ in 0..HANDLER_LOOKAHEAD - 1 {
            source.push_str("// filler\n");
        }
        source.push_str("public String near() {}\n");

        let endpoints = scan_spring_bindings(&source, "Near.java");
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].handler_name, "near");
    }

    #[test]
    fn test_binding_without_handler_is_skipped() {
        let source = "@DeleteMapping(\"/orphan\")\nprivate static final int X = 1;\n";
        assert!(scan_spring_bindings(source, "Orphan.java").is_empty());
    }

    #[test]
    fn test_jaxrs_without_sub_path() {
        let source = r#"@Path("reports")
public class ReportResource {
    @GET
    public Response list() {}
}
"#;
        let endpoints = scan_jaxrs_bindings(source, "ReportResource.java");

        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].http_method, HttpMethod::Get);
        assert_eq!(endpoints[0].path, "/reports");
    }

    #[test]
    fn test_jaxrs_sub_path_outside_window_is_ignored() {
        let source = r#"@Path("/a")
public class A {
    @PATCH
    @Produces("application/json")
    @Consumes("application/json")
    @RolesAllowed("admin")
    @Deprecated
    @Timed
    @Path("/late")
    public Response late() {}
}
"#;
        let endpoints = scan_jaxrs_bindings(source, "A.java");

        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].path, "/a");
        assert_eq!(endpoints[0].handler_name, "late");
    }

    #[test]
    fn test_class_level_binding_is_not_an_endpoint() {
        let endpoints = scan_spring_bindings(SPRING_CONTROLLER, "DemoController.java");
        assert!(endpoints.iter().all(|e| e.path != "/user/user"));
    }

    #[test]
    fn test_type_keywords_in_window_do_not_stop_lookahead() {
        let source = r#"@RequestMapping("/school")
public class SchoolController {
    @GetMapping("/students")
    @ApiOperation("List students by class name")
    // fetch the record by id, see enum Grade
    public List<Student> students() { return null; }
}
"#;
        let endpoints = scan_spring_bindings(source, "SchoolController.java");

        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].path, "/school/students");
        assert_eq!(endpoints[0].handler_name, "students");
        assert_eq!(endpoints[0].line_number, 3);
    }

    #[test]
    fn test_class_level_mapping_after_imports_is_skipped() {
        let source = r#"package demo;

@RestController
@RequestMapping(value = "/catalog", produces = "application/json")
public class CatalogController {
    @RequestMapping(value = "/items", method = RequestMethod.POST)
    public Item add(Item item) { return item; }
}
"#;
        let endpoints = scan_spring_bindings(source, "CatalogController.java");

        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].path, "/catalog/items");
        assert_eq!(endpoints[0].http_method, HttpMethod::Post);
        assert_eq!(endpoints[0].line_number, 6);
    }

    #[test]
    fn test_windows_line_endings() {
        let source = SPRING_CONTROLLER.replace('\n', "\r\n");
        let endpoints = extract_endpoints(&source, "DemoController.java");

        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].path, "/user/list");
        assert_eq!(endpoints[0].handler_name, "list");
    }

    #[test]
    fn test_paths_are_normalized() {
        let sources = [SPRING_CONTROLLER, JAXRS_RESOURCE];
        for source in sources {
            for endpoint in extract_endpoints(source, "X.java") {
                assert!(endpoint.path.starts_with('/'));
                assert!(endpoint.path == "/" || !endpoint.path.ends_with('/'));
                assert!(!endpoint.path.contains("//"));
            }
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = extract_endpoints(JAXRS_RESOURCE, "OrderService.java");
        let second = extract_endpoints(JAXRS_RESOURCE, "OrderService.java");
        assert_eq!(first, second);
    }
}

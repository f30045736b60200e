//! Path canonicalization.
//!
//! Every resource is reachable under exactly one path: inside the base path,
//! without a trailing slash. Anything else is answered with a permanent
//! redirect to that form, carrying the query string over untouched.
//!
//! A path ending in `/` is corrected by dropping that one slash, and a path
//! outside the base path gets the base path in front. Both corrections can
//! apply at once, so `/ui/logo.png/` under `/kbn` becomes `/kbn/ui/logo.png`.

/// Outcome of canonicalizing a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalDecision {
    /// Path is canonical; dispatch it.
    Accept,
    /// Path is not canonical; redirect (301) to the target.
    RedirectPermanent(String),
}

/// Decide whether `path` is canonical under `base_path`.
///
/// `query` is the raw query string without the leading `?`. It is appended to
/// the redirect target verbatim, including when it is empty.
///
/// The root path is handled by the default-route redirect and is accepted
/// here unchanged.
pub fn canonicalize(path: &str, base_path: &str, query: Option<&str>) -> CanonicalDecision {
    if path == "/" {
        return CanonicalDecision::Accept;
    }

    let trimmed = path.strip_suffix('/').unwrap_or(path);
    let target = if base_path.is_empty() {
        // "//host" would be read by clients as a protocol-relative URL.
        format!("/{}", trimmed.trim_start_matches('/'))
    } else if is_within(trimmed, base_path) {
        trimmed.to_string()
    } else {
        join(base_path, trimmed)
    };

    if target == path {
        return CanonicalDecision::Accept;
    }

    match query {
        Some(query) => CanonicalDecision::RedirectPermanent(format!("{target}?{query}")),
        None => CanonicalDecision::RedirectPermanent(target),
    }
}

/// True if `path` is the base path itself or lies beneath it.
pub fn is_within(path: &str, base_path: &str) -> bool {
    match path.strip_prefix(base_path) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Path relative to the base path, always starting with `/`.
///
/// Paths outside the base path are returned unchanged.
pub fn strip_base(path: &str, base_path: &str) -> String {
    if base_path.is_empty() || !is_within(path, base_path) {
        return path.to_string();
    }
    match &path[base_path.len()..] {
        "" => "/".to_string(),
        rest => rest.to_string(),
    }
}

/// Target of the `GET /` redirect.
pub fn default_route_target(base_path: &str, default_route: &str) -> String {
    format!("{base_path}{default_route}")
}

fn join(base_path: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base_path.to_string()
    } else {
        format!("{base_path}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redirect(target: &str) -> CanonicalDecision {
        CanonicalDecision::RedirectPermanent(target.to_string())
    }

    #[test]
    fn test_no_base_path() {
        assert_eq!(canonicalize("/app/home", "", None), CanonicalDecision::Accept);
        assert_eq!(canonicalize("/app/home/", "", None), redirect("/app/home"));
        assert_eq!(canonicalize("/app/home/", "", Some("a=1&b")), redirect("/app/home?a=1&b"));
    }

    #[test]
    fn test_trailing_slash_stripped_and_prefixed() {
        assert_eq!(
            canonicalize("/ui/logo.png/", "/kbn", Some("v=2")),
            redirect("/kbn/ui/logo.png?v=2")
        );
    }

    #[test]
    fn test_bare_path_only_prefixed() {
        assert_eq!(canonicalize("/ui/logo.png", "/kbn", None), redirect("/kbn/ui/logo.png"));
    }

    #[test]
    fn test_already_under_base_path() {
        assert_eq!(canonicalize("/kbn/ui/logo.png", "/kbn", None), CanonicalDecision::Accept);
        assert_eq!(canonicalize("/kbn", "/kbn", None), CanonicalDecision::Accept);
        assert_eq!(canonicalize("/kbn/", "/kbn", None), redirect("/kbn"));
    }

    #[test]
    fn test_lookalike_prefix_is_not_within() {
        assert_eq!(canonicalize("/kbnx/a", "/kbn", None), redirect("/kbn/kbnx/a"));
    }

    #[test]
    fn test_query_kept_verbatim() {
        assert_eq!(
            canonicalize("/a/", "", Some("x=%20y&&z")),
            redirect("/a?x=%20y&&z")
        );
        assert_eq!(canonicalize("/a/", "", Some("")), redirect("/a?"));
    }

    #[test]
    fn test_root_accepted() {
        assert_eq!(canonicalize("/", "", None), CanonicalDecision::Accept);
        assert_eq!(canonicalize("/", "/kbn", None), CanonicalDecision::Accept);
    }

    #[test]
    fn test_redirect_target_is_canonical() {
        let paths = ["/a", "/a/", "/a/b", "/a/b/", "/ui/logo.png/", "/kbn/", "/kbnx"];
        for base in ["", "/kbn", "/x/y"] {
            for path in paths {
                if let CanonicalDecision::RedirectPermanent(target) = canonicalize(path, base, None) {
                    assert_eq!(
                        canonicalize(&target, base, None),
                        CanonicalDecision::Accept,
                        "{path} under {base:?} redirected to non-canonical {target}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_double_slash_converges() {
        let first = canonicalize("/a//", "", None);
        assert_eq!(first, redirect("/a/"));
        assert_eq!(canonicalize("/a/", "", None), redirect("/a"));
        assert_eq!(canonicalize("/a", "", None), CanonicalDecision::Accept);
    }

    #[test]
    fn test_never_redirects_off_host() {
        assert_eq!(canonicalize("//evil.example/", "", None), redirect("/evil.example"));
        assert_eq!(canonicalize("//evil.example", "", None), redirect("/evil.example"));
        assert_eq!(canonicalize("//evil.example/", "/kbn", None), redirect("/kbn/evil.example"));
    }

    #[test]
    fn test_strip_base() {
        assert_eq!(strip_base("/kbn/app", "/kbn"), "/app");
        assert_eq!(strip_base("/kbn", "/kbn"), "/");
        assert_eq!(strip_base("/other", "/kbn"), "/other");
        assert_eq!(strip_base("/app", ""), "/app");
    }

    #[test]
    fn test_default_route_target() {
        assert_eq!(default_route_target("", "/app/home"), "/app/home");
        assert_eq!(default_route_target("/kbn", "/app/home"), "/kbn/app/home");
    }
}

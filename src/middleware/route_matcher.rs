//! Path predicates used by the auth middleware.
//!
//! Two questions are answered here: should the middleware run on a path at
//! all ([`MiddlewareScope`]), and does a path require an authenticated caller
//! ([`RouteMatcher`]).

use regex::Regex;

/// Paths that require an authenticated identity.
pub const PROTECTED_ROUTES: &[&str] = &["/api/protected(.*)"];

/// Matches request paths against a set of route patterns.
///
/// Patterns are regular expressions matched against the whole path, so
/// `"/api/protected(.*)"` covers `/api/protected` and everything below it.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    patterns: Vec<Regex>,
}

impl RouteMatcher {
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| Regex::new(&format!("^(?:{})$", pattern.as_ref())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Matcher for [`PROTECTED_ROUTES`].
    pub fn protected_routes() -> Result<Self, regex::Error> {
        Self::new(PROTECTED_ROUTES)
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(path))
    }
}

/// Decides which paths the auth middleware runs on.
///
/// API and RPC paths are always in scope. Framework-internal paths and
/// static assets are not. Everything else is.
#[derive(Debug, Clone)]
pub struct MiddlewareScope {
    always: Regex,
    internal: Regex,
    static_asset: Regex,
}

impl MiddlewareScope {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            always: Regex::new(r"^/(?:api|trpc)")?,
            internal: Regex::new(r"^/_next")?,
            // `json` is listed first so a `.json` suffix is captured whole
            // and can be told apart from `.js`.
            static_asset: Regex::new(
                r"\.(json|html?|css|js|jpe?g|webp|png|gif|svg|ttf|woff2?|ico|csv|docx?|xlsx?|zip|webmanifest)",
            )?,
        })
    }

    pub fn applies_to(&self, path: &str) -> bool {
        if self.always.is_match(path) {
            return true;
        }

        if self.internal.is_match(path) {
            return false;
        }

        !self.is_static_asset(path)
    }

    fn is_static_asset(&self, path: &str) -> bool {
        self.static_asset
            .captures_iter(path)
            .any(|caps| &caps[1] != "json")
    }
}

//! Which request paths need a signed-in user.
//!
//! A path is restricted when its first `/`-separated segment equals one of
//! [`RESTRICTED_SEGMENTS`]. Later segments are never consulted, so
//! `/blog/user` stays public. Matching is exact and case-sensitive, so
//! `/blog/<id>` stays public while `/blogs` does not. Query strings are not
//! part of the path and are never inspected.

/// Path segments that require a session.
pub const RESTRICTED_SEGMENTS: [&str; 4] = ["blogs", "post", "user", "update"];

/// Whether a request for `path` must be redirected to the login page when
/// no user is signed in.
///
/// # Examples
/// ```
/// use blog::domain::requires_login;
///
/// assert!(requires_login("/blogs"));
/// assert!(requires_login("/user/5f1d7c3a9b2e4f0012345678"));
/// assert!(!requires_login("/blog/5f1d7c3a9b2e4f0012345678"));
/// assert!(!requires_login("/blog/user"));
/// assert!(!requires_login("/"));
/// ```
pub fn requires_login(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/')
        .nth(1)
        .is_some_and(|segment| RESTRICTED_SEGMENTS.contains(&segment))
}

//! Auth cookies for the admin dashboard.
//!
//! The browser client keeps its tokens in HttpOnly cookies; API clients may
//! use the JSON body and `Authorization: Bearer` instead. There is no cookie
//! crate in the stack, so headers are built and parsed here.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Cookie carrying the access JWT.
pub const SESSION_COOKIE: &str = "careline_session";

/// Cookie carrying the opaque refresh token.
pub const REFRESH_COOKIE: &str = "careline_refresh";

/// The refresh cookie is only sent to the auth endpoints.
pub const REFRESH_COOKIE_PATH: &str = "/api/admin/auth";

/// Value of cookie `name` from the request's `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `Set-Cookie` value that stores `value` for `max_age_secs`.
pub fn set_cookie(name: &str, value: &str, path: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{name}={value}; Path={path}; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that makes the browser drop `name`.
pub fn clear_cookie(name: &str, path: &str, secure: bool) -> String {
    set_cookie(name, "", path, 0, secure)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn reads_named_cookie_among_several() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; careline_session=abc.def.ghi; lang=fr"),
        );
        assert_eq!(
            read_cookie(&headers, SESSION_COOKIE).as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(read_cookie(&headers, REFRESH_COOKIE), None);
    }

    #[test]
    fn reads_across_multiple_headers_and_skips_empty() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("careline_refresh="));
        headers.append(COOKIE, HeaderValue::from_static("careline_session=tok"));
        assert_eq!(read_cookie(&headers, REFRESH_COOKIE), None);
        assert_eq!(read_cookie(&headers, SESSION_COOKIE).as_deref(), Some("tok"));
    }

    #[test]
    fn set_and_clear_flags() {
        let c = set_cookie(SESSION_COOKIE, "tok", "/", 900, false);
        assert_eq!(
            c,
            "careline_session=tok; Path=/; Max-Age=900; HttpOnly; SameSite=Lax"
        );
        let cleared = clear_cookie(REFRESH_COOKIE, REFRESH_COOKIE_PATH, true);
        assert!(cleared.starts_with("careline_refresh=; Path=/api/admin/auth; Max-Age=0"));
        assert!(cleared.ends_with("; Secure"));
    }
}

use crate::http::request::Method;

const ROOT: &str = "/";
const USER_AGENT: &str = "/user-agent";
const FILES: &str = "/files/";
const ECHO: &str = "/echo/";

/// The handler selected for a request, with any path tail it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    Root,
    UserAgent,
    /// GET `/files/<name>`
    FileGet(&'a str),
    /// GET `/echo/<text>`
    Echo(&'a str),
    /// POST `/files/<name>`
    FilePost(&'a str),
    NotFound,
}

impl<'a> Route<'a> {
    /// Picks a route for `method` and `target`.
    ///
    /// Exact matches are checked before prefixes; tails are returned verbatim,
    /// without decoding.
    ///
    /// # Example
    ///
    /// ```
    /// # use tinyserve::http::request::Method;
    /// # use tinyserve::router::Route;
    /// assert_eq!(Route::resolve(Method::GET, "/echo/abc"), Route::Echo("abc"));
    /// assert_eq!(Route::resolve(Method::POST, "/echo/abc"), Route::NotFound);
    /// ```
    pub fn resolve(method: Method, target: &'a str) -> Self {
        match method {
            Method::GET => {
                if target == ROOT {
                    Route::Root
                } else if target == USER_AGENT {
                    Route::UserAgent
                } else if let Some(name) = target.strip_prefix(FILES) {
                    Route::FileGet(name)
                } else if let Some(text) = target.strip_prefix(ECHO) {
                    Route::Echo(text)
                } else {
                    Route::NotFound
                }
            }
            Method::POST => match target.strip_prefix(FILES) {
                Some(name) => Route::FilePost(name),
                None => Route::NotFound,
            },
            Method::Unknown => Route::NotFound,
        }
    }

    /// Short label for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Root => "root",
            Route::UserAgent => "user-agent",
            Route::FileGet(_) => "file-get",
            Route::Echo(_) => "echo",
            Route::FilePost(_) => "file-post",
            Route::NotFound => "not-found",
        }
    }
}

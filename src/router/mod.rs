//! Request routing.
//!
//! Maps a parsed request onto one of a handful of handlers. Only the file
//! handlers have side effects, and they reach the disk exclusively through the
//! [`FileStore`] the router was built with.

mod handlers;
pub mod route;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::http::request::Request;
use crate::http::response::Response;
use crate::store::{FileStore, FileStoreError};

pub use route::Route;

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const TEXT_PLAIN: &str = "text/plain";

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("no route or resource")]
    NotFound,
    #[error("file routes need a configured directory")]
    MissingRoot,
    #[error("expected Content-Type application/octet-stream, got {0:?}")]
    ContentTypeMismatch(Option<String>),
    #[error("rejected file name {0:?}")]
    InvalidFileName(String),
    #[error(transparent)]
    Store(#[from] FileStoreError),
}

/// Dispatches requests to handlers.
///
/// Holds the read-only file root and the store; cheap to share behind an `Arc`.
pub struct Router {
    files_root: Option<PathBuf>,
    store: Arc<dyn FileStore>,
}

impl Router {
    pub fn new(files_root: Option<PathBuf>, store: Arc<dyn FileStore>) -> Self {
        Self { files_root, store }
    }

    /// Runs the handler for `request`.
    pub fn route(&self, request: &Request) -> Result<Response, RouteError> {
        let route = Route::resolve(request.method, &request.target);

        tracing::debug!(
            route = route.name(),
            method = ?request.method,
            target = %request.target,
            "Routing request"
        );

        match route {
            Route::Root => Ok(handlers::root()),
            Route::UserAgent => Ok(handlers::user_agent(request)),
            Route::Echo(text) => Ok(handlers::echo(text)),
            Route::FileGet(name) => handlers::file_get(self.root()?, self.store.as_ref(), name),
            Route::FilePost(name) => {
                handlers::file_post(self.root()?, self.store.as_ref(), name, request)
            }
            Route::NotFound => Err(RouteError::NotFound),
        }
    }

    /// Like [`Router::route`], but every error becomes a body-less 404.
    pub fn handle(&self, request: &Request) -> Response {
        match self.route(request) {
            Ok(response) => response,
            Err(e) => {
                match &e {
                    RouteError::NotFound => tracing::debug!(
                        method = ?request.method,
                        target = %request.target,
                        "No route matched"
                    ),
                    _ => tracing::warn!(
                        error = %e,
                        method = ?request.method,
                        target = %request.target,
                        "Request failed"
                    ),
                }
                Response::not_found()
            }
        }
    }

    fn root(&self) -> Result<&PathBuf, RouteError> {
        self.files_root.as_ref().ok_or(RouteError::MissingRoot)
    }
}

use std::path::{Path, PathBuf};

use tracing::info;

use crate::http::response::{Response, StatusCode};
use crate::http::request::Request;
use crate::router::{RouteError, OCTET_STREAM, TEXT_PLAIN};
use crate::store::FileStore;

pub(super) fn root() -> Response {
    Response::empty(StatusCode::Ok)
}

// Missing header reflects as an empty body.
pub(super) fn user_agent(request: &Request) -> Response {
    Response::ok(TEXT_PLAIN, request.user_agent().unwrap_or_default())
}

pub(super) fn echo(text: &str) -> Response {
    Response::ok(TEXT_PLAIN, text)
}

pub(super) fn file_get(
    root: &Path,
    store: &dyn FileStore,
    name: &str,
) -> Result<Response, RouteError> {
    let path = resolve(root, name)?;

    if !store.exists(&path) {
        return Err(RouteError::NotFound);
    }

    let size = store.size(&path)?;
    let contents = store.read(&path)?;
    info!(path = %path.display(), size, "Serving file");

    Ok(Response::ok(OCTET_STREAM, contents))
}

pub(super) fn file_post(
    root: &Path,
    store: &dyn FileStore,
    name: &str,
    request: &Request,
) -> Result<Response, RouteError> {
    match request.content_type() {
        Some(ct) if ct.starts_with(OCTET_STREAM) => {}
        other => return Err(RouteError::ContentTypeMismatch(other.map(str::to_string))),
    }

    let path = resolve(root, name)?;
    store.write(&path, &request.body)?;
    info!(path = %path.display(), bytes = request.body.len(), "Stored file");

    Ok(Response::empty(StatusCode::Created))
}

/// Joins `name` onto `root`, refusing anything that could leave the root.
fn resolve(root: &Path, name: &str) -> Result<PathBuf, RouteError> {
    let escapes = name.is_empty()
        || name.starts_with('/')
        || name.contains('\0')
        || name.split(['/', '\\']).any(|segment| segment == "..");

    if escapes {
        return Err(RouteError::InvalidFileName(name.to_string()));
    }

    Ok(root.join(name))
}

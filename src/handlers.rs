use axum::{
    extract::{FromRequest, RawForm, Request, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use log::{debug, error, info, warn};
use percent_encoding::percent_decode_str;

use crate::components::templates::{EDIT, VIEW};
use crate::errors::WikiError;
use crate::types::{AppState, Operation, Page, PageBody, Title};
use crate::utils::form_value;
use crate::validator::parse_request_path;

/// Form field carrying the page body
pub const BODY_FIELD: &str = "body";

/// Entry point for every request: validate the path, then hand the title
/// to the handler for its operation.
pub async fn dispatch(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, WikiError> {
    let raw_path = request.uri().path();
    let path = percent_decode_str(raw_path)
        .decode_utf8()
        .map_err(|_| WikiError::InvalidPath(raw_path.to_string()))
        .inspect_err(|_| warn!("Rejected undecodable path: '{}'", raw_path))?
        .into_owned();
    let (operation, title) = parse_request_path(&path).inspect_err(|_| {
        warn!("Rejected request path: '{}'", path);
    })?;

    info!("{} {} -> {} '{}'", request.method(), path, operation, title);

    match operation {
        Operation::View => handle_view(&state, title),
        Operation::Edit => handle_edit(&state, title),
        Operation::Save => handle_save(&state, title, request).await,
    }
}

/// Show a page with its links resolved, or send the user to create it
pub fn handle_view(state: &AppState, title: Title) -> Result<Response, WikiError> {
    let page = match state.store.load(&title) {
        Ok(page) => page,
        Err(e) => {
            log_load_failure(&title, &e);
            return Ok(redirect(Operation::Edit.path(&title)));
        }
    };

    debug!("Rendering body of '{}': {}", title, page.body_text());
    let resolved = state.resolver.resolve(&page.body, state.store.as_ref());
    // HTML responses are UTF-8; invalid sequences display as U+FFFD, the stored bytes are untouched.
    let body = PageBody::Markup(String::from_utf8_lossy(&resolved));

    let html = state.templates.render(VIEW, &page.title, &body)?;
    Ok(Html(html).into_response())
}

/// Show the edit form, pre-filled with the raw body when the page exists
pub fn handle_edit(state: &AppState, title: Title) -> Result<Response, WikiError> {
    let page = state.store.load(&title).unwrap_or_else(|e| {
        log_load_failure(&title, &e);
        Page::empty(title.clone())
    });

    let body = PageBody::Text(page.body_text());
    let html = state.templates.render(EDIT, &page.title, &body)?;
    Ok(Html(html).into_response())
}

/// Create or overwrite a page from the submitted `body` field.
///
/// The value is kept as raw bytes. A missing field saves an empty page.
/// A failed write goes back to the edit form; the submitted text is not kept.
pub async fn handle_save(
    state: &AppState,
    title: Title,
    request: Request,
) -> Result<Response, WikiError> {
    let payload = match RawForm::from_request(request, state).await {
        Ok(RawForm(payload)) => payload,
        Err(rejection) => {
            warn!("Rejected save for '{}': {}", title, rejection);
            return Ok(rejection.into_response());
        }
    };

    let body = form_value(&payload, BODY_FIELD).unwrap_or_default();
    let page = Page::new(title, body);
    match state.store.save(&page) {
        Ok(()) => Ok(redirect(Operation::View.path(&page.title))),
        Err(e) => {
            error!("Saving '{}' failed, returning to edit: {}", page.title, e);
            Ok(redirect(Operation::Edit.path(&page.title)))
        }
    }
}

fn log_load_failure(title: &Title, err: &WikiError) {
    if err.is_missing_page() {
        info!("Page '{}' does not exist", title);
    } else {
        error!("Page '{}' could not be loaded: {}", title, err);
    }
}

fn redirect(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

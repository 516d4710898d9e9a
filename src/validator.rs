use crate::errors::WikiError;
use crate::types::{Operation, Title};

/// Split a request path of the exact shape `/<op>/<title>` into its parts.
///
/// Anything else, including trailing slashes, extra segments and titles
/// outside `[a-zA-Z0-9]+`, is `InvalidPath`.
pub fn parse_request_path(path: &str) -> Result<(Operation, Title), WikiError> {
    let invalid = || WikiError::InvalidPath(path.to_string());

    let rest = path.strip_prefix('/').ok_or_else(invalid)?;
    let (op, title) = rest.split_once('/').ok_or_else(invalid)?;
    let operation = op.parse::<Operation>().map_err(|_| invalid())?;
    let title = Title::parse(title).map_err(|_| invalid())?;

    Ok((operation, title))
}

use axum::Router;

use crate::handlers;
use crate::types::AppState;

/// Build the wiki router.
///
/// Every path goes through [`handlers::dispatch`], which validates it and
/// picks the handler for its operation; everything else is a 404.
pub fn build_router(state: AppState) -> Router {
    Router::new().fallback(handlers::dispatch).with_state(state)
}

//! GET /dashboard

use axum::Json;
use quickdeck_core::identity::IdentitySummary;

use crate::middleware::auth::SessionUser;
use crate::response::DataResponse;

/// Who is signed in. The backend token stays in the session.
pub async fn overview(SessionUser(identity): SessionUser) -> Json<DataResponse<IdentitySummary>> {
    Json(DataResponse {
        data: identity.summary(),
    })
}

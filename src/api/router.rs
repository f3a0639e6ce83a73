//! HTTP router.
//!
//! Returns a composable `Router` so integration tests can drive it
//! with `tower::ServiceExt::oneshot` against an in-memory database.
//!
//! `/login`, `/register`, and `/uploads/*` are open; everything else
//! sits behind the bearer-token middleware.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Request body cap, sized for lab result uploads (32 MB).
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Build the application router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost
/// layer); endpoint handlers use `State<ApiContext>` via `with_state`.
pub fn api_router(ctx: ApiContext) -> Router {
    let protected = Router::new()
        .route("/me", get(endpoints::auth::me))
        .route("/kick-counts", post(endpoints::kick_counts::record))
        .route(
            "/kick-counts/pregnancy/:id",
            get(endpoints::kick_counts::list),
        )
        .route(
            "/vaccinations/pregnant-woman/:id",
            get(endpoints::vaccinations::list),
        )
        .route("/vaccinations/:id", put(endpoints::vaccinations::update))
        .route("/vaccine-types", get(endpoints::vaccinations::types))
        .route(
            "/medical-histories/pregnant-woman/:id",
            get(endpoints::medical_histories::get_by_woman),
        )
        .route(
            "/medical-histories/:id",
            put(endpoints::medical_histories::update),
        )
        .route(
            "/previous-pregnancies/pregnant-woman/:id",
            get(endpoints::previous_pregnancies::list),
        )
        .route(
            "/pregnancies/pregnant-woman/:id",
            get(endpoints::pregnancies::list_by_woman),
        )
        .route("/antenatal-visits", post(endpoints::antenatal_visits::create))
        .route(
            "/antenatal-visits/pregnancy/:id",
            get(endpoints::antenatal_visits::list),
        )
        .route("/doctor/patients", get(endpoints::doctor_patients::roster))
        .route(
            "/doctor/patients/:id",
            get(endpoints::doctor_patients::detail),
        )
        .route(
            "/doctor/patient/:id/visits",
            get(endpoints::antenatal_visits::patient_visits),
        )
        .route(
            "/doctor/patient/:id/appointment",
            post(endpoints::doctor_patients::create_appointment),
        )
        .route(
            "/doctor/patient/:id/medical-history",
            get(endpoints::medical_histories::doctor_get),
        )
        .route(
            "/doctor/patient/:id/previous-pregnancies",
            get(endpoints::previous_pregnancies::list),
        )
        .route(
            "/doctor/antenatal-visit",
            post(endpoints::antenatal_visits::create),
        )
        .route("/doctor/pregnancy", post(endpoints::pregnancies::create))
        .route(
            "/doctor/pregnancy/:id/end",
            post(endpoints::pregnancies::end),
        )
        .route(
            "/doctor/pregnancy/:id/lab-results",
            get(endpoints::lab_results::list),
        )
        .route(
            "/doctor/lab-result",
            post(endpoints::lab_results::doctor_create),
        )
        .route(
            "/doctor/medical-history",
            post(endpoints::medical_histories::doctor_upsert),
        )
        .route(
            "/doctor/vaccination",
            post(endpoints::vaccinations::doctor_upsert),
        )
        .route(
            "/doctor/previous-pregnancy",
            post(endpoints::previous_pregnancies::doctor_create),
        )
        .route("/profile/husband", put(endpoints::profile::update_husband))
        .route(
            "/profile/personal",
            put(endpoints::profile::update_personal_info),
        )
        .route(
            "/profile/medical-history",
            put(endpoints::profile::update_medical_history),
        )
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        // Extension must be outermost so the middleware can extract ApiContext
        .layer(axum::Extension(ctx.clone()));

    let unprotected = Router::new()
        .route("/login", post(endpoints::auth::login))
        .route("/register", post(endpoints::auth::register))
        .with_state(ctx.clone());

    Router::new()
        .merge(protected)
        .merge(unprotected)
        .nest_service("/uploads", ServeDir::new(ctx.uploads_dir.clone()))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use log::error;
use serde::Serialize;
use tokio::net::TcpListener;

use crate::{
    config::Config,
    controllers::detail::{resolve_lookup, LookupOutcome},
    filters::FilterCriteria,
    models::property::PropertyRecord,
    store::{PropertyStore, StoreClient},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<StoreClient>,
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

#[derive(Serialize)]
pub struct PageResponse {
    pub page: &'static str,
    pub title: &'static str,
}

#[derive(Serialize)]
pub struct ListingResponse {
    pub count: usize,
    pub properties: Vec<PropertyRecord>,
}

#[derive(Serialize)]
pub struct DetailResponse {
    pub property: PropertyRecord,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/about", get(about_page))
        .route("/lifestyle", get(lifestyle_page))
        .route("/locations", get(locations_page))
        .route("/contact", get(contact_page))
        .route("/properties", get(list_properties))
        .route("/properties/:slug", get(property_details))
        .fallback(unknown_route)
        .layer(middleware::from_fn(cors_layer))
        .with_state(state)
}

pub async fn start_http_server(
    state: AppState,
    mut shutdown_rx: tokio::sync::broadcast::Receiver<()>,
) {
    let bind_addr = state
        .config
        .http_bind_address
        .clone()
        .unwrap_or_else(|| "0.0.0.0:8080".to_string());

    let listener = TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|err| panic!("failed to bind http listener on {}: {}", bind_addr, err));
    let app = router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
        .expect("HTTP server crashed");
}

async fn cors_layer(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut response = Response::new(axum::body::Body::empty());
        apply_cors_headers(response.headers_mut());
        *response.status_mut() = StatusCode::NO_CONTENT;
        response
    } else {
        let mut response = next.run(req).await;
        apply_cors_headers(response.headers_mut());
        response
    }
}

fn apply_cors_headers(headers: &mut axum::http::HeaderMap) {
    headers.insert(
        axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        axum::http::header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    headers.insert(
        axum::http::header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
}

fn page(page: &'static str, title: &'static str) -> Json<ApiResponse<PageResponse>> {
    Json(ApiResponse {
        data: PageResponse { page, title },
    })
}

async fn home_page() -> Json<ApiResponse<PageResponse>> {
    page("home", "Himalayan Luxury Living")
}

async fn about_page() -> Json<ApiResponse<PageResponse>> {
    page("about", "About Us")
}

async fn lifestyle_page() -> Json<ApiResponse<PageResponse>> {
    page("lifestyle", "Mountain Lifestyle")
}

async fn locations_page() -> Json<ApiResponse<PageResponse>> {
    page("locations", "Our Locations")
}

async fn contact_page() -> Json<ApiResponse<PageResponse>> {
    page("contact", "Contact Us")
}

/// Listing query. Filter fields arrive as query parameters; a `city`
/// parameter seeds the city filter for links coming from location pages.
async fn list_properties(
    State(state): State<AppState>,
    Query(criteria): Query<FilterCriteria>,
) -> Result<Json<ApiResponse<ListingResponse>>, StatusCode> {
    match state.store.list_properties(&criteria).await {
        Ok(properties) => Ok(Json(ApiResponse {
            data: ListingResponse {
                count: properties.len(),
                properties,
            },
        })),
        Err(err) => {
            error!("listing query failed: {:?}", err);
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

async fn property_details(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.store.property_by_slug(&slug).await {
        Ok(rows) => match resolve_lookup(&slug, rows) {
            LookupOutcome::Found(record) => (
                StatusCode::OK,
                Json(ApiResponse {
                    data: DetailResponse { property: *record },
                }),
            )
                .into_response(),
            LookupOutcome::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    message: "This property does not exist or was removed",
                }),
            )
                .into_response(),
            LookupOutcome::IntegrityViolation => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    message: "Failed to load property details",
                }),
            )
                .into_response(),
        },
        Err(err) => {
            error!("detail query for {:?} failed: {:?}", slug, err);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    message: "Failed to load property details",
                }),
            )
                .into_response()
        }
    }
}

// Any unrecognized path resolves to the home route.
async fn unknown_route() -> Redirect {
    Redirect::to("/")
}

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post, put, MethodRouter},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config;
use crate::database::ShopPool;
use crate::handlers::{admins, auth, categories, customers, products, system};
use crate::mail::SharedMailer;
use crate::middleware::{
    jwt_auth_middleware, require_superadmin, validate_admin_middleware, validate_customer_middleware,
};

/// The whole application: `/api/v1` resources, system routes, 404 fallback.
pub fn app(pool: PgPool, mailer: SharedMailer) -> Router {
    let settings = config::config();

    let api = Router::new()
        .merge(category_routes())
        .merge(product_routes())
        .merge(customer_routes())
        .merge(auth_routes())
        .merge(admin_routes());

    let mut router = Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .nest("/api/v1", api)
        .fallback(system::not_found)
        .layer(DefaultBodyLimit::max(settings.api.max_request_size_bytes))
        .layer(Extension(ShopPool(pool)))
        .layer(Extension(mailer));

    if settings.security.enable_cors {
        router = router.layer(cors_layer(&settings.security.cors_origins));
    }
    if settings.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

// Layers run outermost-last, so the JWT check is added after the checks
// that depend on its claims.

fn customer_only(route: MethodRouter) -> MethodRouter {
    route
        .route_layer(from_fn(validate_customer_middleware))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn admin_only(route: MethodRouter) -> MethodRouter {
    route
        .route_layer(from_fn(validate_admin_middleware))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn superadmin_only(route: MethodRouter) -> MethodRouter {
    route
        .route_layer(from_fn(require_superadmin))
        .route_layer(from_fn(validate_admin_middleware))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn category_routes() -> Router {
    Router::new()
        .route(
            "/categories",
            get(categories::category_list).merge(admin_only(post(categories::category_create))),
        )
        .route(
            "/categories/:id",
            get(categories::category_show).merge(admin_only(
                put(categories::category_update).delete(categories::category_delete),
            )),
        )
}

fn product_routes() -> Router {
    Router::new()
        .route(
            "/products",
            get(products::product_list).merge(admin_only(post(products::product_create))),
        )
        .route("/products/search", get(products::product_search))
        .route(
            "/products/:id",
            get(products::product_show).merge(admin_only(
                put(products::product_update).delete(products::product_delete),
            )),
        )
}

fn customer_routes() -> Router {
    Router::new()
        .route("/customers", admin_only(get(customers::customer_list)))
        .route(
            "/customers/:id",
            admin_only(get(customers::customer_show).delete(customers::customer_delete)),
        )
}

fn auth_routes() -> Router {
    Router::new()
        .route("/auth/register", post(auth::customer_register))
        .route("/auth/login", post(auth::customer_login))
        .route("/auth/me", customer_only(get(auth::customer_me)))
        .route("/auth/update-details", customer_only(put(auth::customer_update_details)))
        .route("/auth/change-password", customer_only(put(auth::customer_change_password)))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password/:resettoken", post(auth::reset_password))
}

fn admin_routes() -> Router {
    Router::new()
        .route(
            "/admins",
            superadmin_only(get(admins::admin_list).post(admins::admin_create))
                .merge(admin_only(put(admins::admin_update_self))),
        )
        .route("/admins/me", admin_only(get(admins::admin_me)))
        .route("/admins/login", post(admins::admin_login))
        .route("/admins/change-password", admin_only(post(admins::admin_change_password)))
        .route(
            "/admins/:id",
            superadmin_only(
                get(admins::admin_show)
                    .put(admins::admin_update)
                    .delete(admins::admin_delete),
            ),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

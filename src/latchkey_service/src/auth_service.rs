use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
        request,
    },
    middleware,
    routing::{get, post},
};
use latchkey_adapters::{AllowedOrigins, BearerFilter, JwtTokenCodec};
use latchkey_axum::{AppState, authenticate, routes};
use latchkey_core::{Notifier, RecoveryTokenStore, UserStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// The authentication service: every route behind the bearer filter.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Assemble the routes.
    ///
    /// # Arguments
    /// * `state` - Stores, notifier, hasher, codec and link settings
    /// * `api_prefix` - Path prefix for everything except `/ping`; may be empty
    ///
    /// # Note on Architecture
    /// The bearer filter wraps the whole router, so it runs before any
    /// extractor or handler. It is built from the same codec that signs tokens
    /// at login.
    pub fn new<U, T, N>(state: AppState<U, T, N>, api_prefix: &str) -> Self
    where
        U: UserStore + Clone + 'static,
        T: RecoveryTokenStore + Clone + 'static,
        N: Notifier + 'static,
    {
        let filter = BearerFilter::new(state.codec.clone());

        let api = Router::new()
            .route("/auth/login", post(routes::login::<U, T, N>))
            .route("/auth/signup", post(routes::signup::<U, T, N>))
            .route(
                "/auth/resend/email-confirmation/{email}",
                get(routes::resend_confirmation::<U, T, N>),
            )
            .route(
                "/auth/email-confirm/{token}",
                get(routes::confirm_email::<U, T, N>),
            )
            .route(
                "/auth/send/reset-password-email/{email}",
                get(routes::send_password_reset::<U, T, N>),
            )
            .route(
                "/auth/change-password",
                post(routes::change_password::<U, T, N>),
            )
            .route("/user/current-user", get(routes::current_user::<U, T, N>))
            .route("/user/all", get(routes::list_users::<U, T, N>))
            .with_state(state);

        let router = Router::new().route("/ping", get(routes::ping));
        // axum refuses to nest at the root.
        let router = if api_prefix.is_empty() {
            router.merge(api)
        } else {
            router.nest(api_prefix, api)
        };

        let router = router.layer(middleware::from_fn_with_state(
            filter,
            authenticate::<JwtTokenCodec>,
        ));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AuthService into a router that can be mounted on another
    /// router.
    ///
    /// CORS is only enabled when `allowed_origins` is given and non-empty.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|o| !o.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        origin
                            .to_str()
                            .is_ok_and(|origin| allowed_origins.contains(origin))
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server on `listener`.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Latchkey listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}

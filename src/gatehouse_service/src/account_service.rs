use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS},
        request,
    },
    middleware::from_fn_with_state,
    routing::{get, post},
};
use gatehouse_adapters::{AppState, config::AllowedOrigins};
use gatehouse_axum::{
    PipelineState, intercept,
    routes::{
        forgot_password, get_profile, login, register, reset_password, update_profile, verify,
    },
};
use gatehouse_core::{
    AccountStore, EmailClient, PasswordHasher, Pipeline, RequireBearer, RequireRole, Role,
    TokenIssuer, TrimStrings,
};
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// The account lifecycle HTTP service.
pub struct AccountService {
    router: Router,
}

impl AccountService {
    /// Builds the routes over the given ports.
    ///
    /// Public routes only get their strings trimmed. `/profile` additionally requires a
    /// valid bearer token for a `user` or `admin`. Anything else is served from
    /// `assets_dir`, falling back to its `index.html`.
    pub fn new<S, H, T, E>(state: AppState<S, H, T, E>, assets_dir: &str, body_limit: usize) -> Self
    where
        S: AccountStore + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        T: TokenIssuer + Clone + 'static,
        E: EmailClient + Clone + 'static,
    {
        let assets_service = ServeDir::new(assets_dir)
            .fallback(ServeFile::new(format!("{assets_dir}/index.html")));

        let public_pipeline = Pipeline::new().then(TrimStrings);
        let protected_pipeline = Pipeline::new()
            .then(RequireBearer::new(state.issuer.clone()))
            .then(RequireRole::new([Role::User, Role::Admin]))
            .then(TrimStrings);

        let public = Router::new()
            .route("/register", post(register::<S, H, T, E>))
            .route("/verify", post(verify::<S, H, T, E>))
            .route("/login", post(login::<S, H, T, E>))
            .route("/forgot", post(forgot_password::<S, H, T, E>))
            .route("/reset", post(reset_password::<S, H, T, E>))
            .route_layer(from_fn_with_state(
                PipelineState::new(public_pipeline, body_limit),
                intercept,
            ));

        let protected = Router::new()
            .route(
                "/profile",
                get(get_profile::<S, H, T, E>).patch(update_profile::<S, H, T, E>),
            )
            .route_layer(from_fn_with_state(
                PipelineState::new(protected_pipeline, body_limit),
                intercept,
            ));

        let router = public
            .merge(protected)
            .layer(DefaultBodyLimit::max(body_limit))
            .with_state(state)
            .fallback_service(assets_service);

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

    fn with_response_layers(mut self) -> Self {
        self.router = self
            .router
            .layer(CompressionLayer::new())
            .layer(SetResponseHeaderLayer::if_not_present(
                X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ));
        self
    }

    /// Convert the service into a router that can be mounted on another router.
    ///
    /// CORS is only enabled when `allowed_origins` is given and not empty.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PATCH])
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
        self.with_response_layers().with_trace_layer().router
    }

    /// Serve until ctrl-c or SIGTERM.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Account service listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

use axum::{
    Router,
    http::{HeaderValue, Method, header, request},
    middleware::from_fn_with_state,
    routing::post,
};
use bastion_application::PoliciesGuard;
use bastion_axum::{
    AppState, PolicyScope, authenticate, enforce_policies,
    routes::{
        confirm_tfa, create_api_key, generate_tfa_qr_code, refresh_tokens, sign_in, sign_out,
        sign_up,
    },
};
use bastion_core::{ApiKeyStore, CredentialHasher, RefreshSessionStore, TokenSigner, UserStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{
    make_span_with_request_id, on_request, on_response, propagate_request_id_layer,
    set_request_id_layer,
};

/// Policy group every route of this service belongs to.
pub const AUTHENTICATION_GROUP: &str = "authentication";

/// Operation names as they appear in the [`OperationTable`](bastion_application::OperationTable).
pub mod operations {
    pub const SIGN_UP: &str = "sign-up";
    pub const SIGN_IN: &str = "sign-in";
    pub const REFRESH_TOKENS: &str = "refresh-tokens";
    pub const SIGN_OUT: &str = "sign-out";
    pub const TFA_GENERATE: &str = "tfa-generate";
    pub const TFA_CONFIRM: &str = "tfa-confirm";
    pub const CREATE_API_KEY: &str = "create-api-key";
}

/// Authentication routes mounted under `/authentication`.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Every route passes through the policy guard for its operation. Routes
    /// that act on behalf of a principal also sit behind bearer or API-key
    /// authentication, which runs first so the guard sees the verified claims.
    pub fn new<U, H, S, T, K>(state: AppState<U, H, S, T, K>, guard: PoliciesGuard) -> Self
    where
        U: UserStore + Clone + 'static,
        H: CredentialHasher + 'static,
        S: RefreshSessionStore + 'static,
        T: TokenSigner + 'static,
        K: ApiKeyStore + 'static,
    {
        let scope = |operation: &'static str| PolicyScope::new(guard.clone(), AUTHENTICATION_GROUP, operation);

        let public = Router::new()
            .route(
                "/sign-up",
                post(sign_up::<U, H, S, T, K>)
                    .route_layer(from_fn_with_state(scope(operations::SIGN_UP), enforce_policies)),
            )
            .route(
                "/sign-in",
                post(sign_in::<U, H, S, T, K>)
                    .route_layer(from_fn_with_state(scope(operations::SIGN_IN), enforce_policies)),
            )
            .route(
                "/refresh-tokens",
                post(refresh_tokens::<U, H, S, T, K>).route_layer(from_fn_with_state(
                    scope(operations::REFRESH_TOKENS),
                    enforce_policies,
                )),
            );

        let protected = Router::new()
            .route(
                "/sign-out",
                post(sign_out::<U, H, S, T, K>)
                    .route_layer(from_fn_with_state(scope(operations::SIGN_OUT), enforce_policies)),
            )
            .route(
                "/2fa/generate",
                post(generate_tfa_qr_code::<U, H, S, T, K>).route_layer(from_fn_with_state(
                    scope(operations::TFA_GENERATE),
                    enforce_policies,
                )),
            )
            .route(
                "/2fa/confirm",
                post(confirm_tfa::<U, H, S, T, K>).route_layer(from_fn_with_state(
                    scope(operations::TFA_CONFIRM),
                    enforce_policies,
                )),
            )
            .route(
                "/api-keys",
                post(create_api_key::<U, H, S, T, K>).route_layer(from_fn_with_state(
                    scope(operations::CREATE_API_KEY),
                    enforce_policies,
                )),
            )
            .route_layer(from_fn_with_state(
                state.clone(),
                authenticate::<U, H, S, T, K>,
            ));

        let router = Router::new()
            .nest("/authentication", public.merge(protected))
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self
            .router
            .layer(propagate_request_id_layer())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            )
            .layer(set_request_id_layer());
        self
    }

    /// Convert the AuthService into a router that can be merged into another
    /// application. An empty origin list leaves CORS off.
    pub fn as_nested_router(mut self, allowed_origins: Vec<HeaderValue>) -> Router {
        if !allowed_origins.is_empty() {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Vec<HeaderValue>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}

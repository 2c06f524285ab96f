//! API Route Definitions
//!
//! Routes are assembled through a builder so deployments can expose only the
//! endpoints they need. Customer management routes and password change sit
//! behind the access-token middleware; they are only mounted once an auth
//! layer has been supplied with `with_auth`.

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};

use super::handlers::*;
use super::middleware::auth_middleware;
use crate::service::JwtService;

/// Builder for creating API routes with configurable endpoints
#[derive(Default)]
pub struct RouterBuilder {
    /// GET /health
    health_check: bool,
    /// POST /customers/register
    register: bool,
    /// POST /customers/login
    login: bool,
    /// POST /customers/refresh-token
    refresh_token: bool,
    /// PATCH /customers/{id}/password
    change_password: bool,
    /// GET /customers
    list_customers: bool,
    /// GET /customers/{id}
    get_customer: bool,
    /// PATCH /customers/{id}
    update_customer: bool,
    /// DELETE /customers/{id}
    delete_customer: bool,
    /// Token issuer guarding the protected routes
    jwt_service: Option<Arc<JwtService>>,
}

impl RouterBuilder {
    /// Creates a new router builder with all routes disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a router builder with every endpoint enabled
    pub fn with_all_routes() -> Self {
        Self {
            health_check: true,
            register: true,
            login: true,
            refresh_token: true,
            change_password: true,
            list_customers: true,
            get_customer: true,
            update_customer: true,
            delete_customer: true,
            jwt_service: None,
        }
    }

    /// Creates a router builder with only the public authentication endpoints
    ///
    /// Register, login and refresh, plus the health check. Suitable for an
    /// edge service that never touches customer profiles.
    pub fn with_auth_routes() -> Self {
        Self {
            health_check: true,
            register: true,
            login: true,
            refresh_token: true,
            ..Self::default()
        }
    }

    /// Creates a router with only the health check
    pub fn with_minimal_routes() -> Self {
        Self {
            health_check: true,
            ..Self::default()
        }
    }

    /// Supplies the token issuer used to authenticate protected routes
    pub fn with_auth(mut self, jwt_service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(jwt_service);
        self
    }

    pub fn health_check(mut self, enabled: bool) -> Self {
        self.health_check = enabled;
        self
    }

    pub fn register(mut self, enabled: bool) -> Self {
        self.register = enabled;
        self
    }

    pub fn login(mut self, enabled: bool) -> Self {
        self.login = enabled;
        self
    }

    pub fn refresh_token(mut self, enabled: bool) -> Self {
        self.refresh_token = enabled;
        self
    }

    /// Enables or disables PATCH /customers/{id}/password (protected)
    pub fn change_password(mut self, enabled: bool) -> Self {
        self.change_password = enabled;
        self
    }

    /// Enables or disables GET /customers (protected)
    pub fn list_customers(mut self, enabled: bool) -> Self {
        self.list_customers = enabled;
        self
    }

    /// Enables or disables GET /customers/{id} (protected)
    pub fn get_customer(mut self, enabled: bool) -> Self {
        self.get_customer = enabled;
        self
    }

    /// Enables or disables PATCH /customers/{id} (protected)
    pub fn update_customer(mut self, enabled: bool) -> Self {
        self.update_customer = enabled;
        self
    }

    /// Enables or disables DELETE /customers/{id} (protected)
    pub fn delete_customer(mut self, enabled: bool) -> Self {
        self.delete_customer = enabled;
        self
    }

    fn has_protected_routes(&self) -> bool {
        self.change_password
            || self.list_customers
            || self.get_customer
            || self.update_customer
            || self.delete_customer
    }

    /// Builds the Axum router with the configured routes
    ///
    /// Protected routes requested without `with_auth` are left out entirely.
    /// They check that the caller holds a valid access token, not that the
    /// caller owns the `{id}` in the path.
    pub fn build(self) -> Router<AppState> {
        let mut router = Router::new();

        if self.health_check {
            router = router.route("/health", get(health_check));
        }

        if self.register {
            router = router.route("/customers/register", post(register));
        }

        if self.login {
            router = router.route("/customers/login", post(login));
        }

        if self.refresh_token {
            router = router.route("/customers/refresh-token", post(refresh_token));
        }

        if !self.has_protected_routes() {
            return router;
        }

        let Some(jwt_service) = self.jwt_service else {
            log::warn!("Protected customer routes requested without an auth layer; skipping them");
            return router;
        };

        let mut protected = Router::new();

        if self.change_password {
            protected = protected.route("/customers/{id}/password", patch(change_password));
        }

        if self.list_customers {
            protected = protected.route("/customers", get(list_customers));
        }

        // Method routers on the same path must be merged into one route
        let mut by_id = None;
        if self.get_customer {
            by_id = Some(get(get_customer));
        }
        if self.update_customer {
            by_id = Some(match by_id {
                Some(method_router) => method_router.patch(update_customer),
                None => patch(update_customer),
            });
        }
        if self.delete_customer {
            by_id = Some(match by_id {
                Some(method_router) => method_router.delete(delete_customer),
                None => axum::routing::delete(delete_customer),
            });
        }
        if let Some(method_router) = by_id {
            protected = protected.route("/customers/{id}", method_router);
        }

        router.merge(protected.route_layer(from_fn_with_state(jwt_service, auth_middleware)))
    }
}

/// Creates every route, protected by the given token issuer
pub fn create_routes(jwt_service: Arc<JwtService>) -> Router<AppState> {
    RouterBuilder::with_all_routes()
        .with_auth(jwt_service)
        .build()
}

/// Creates a router with only the health check
pub fn create_minimal_routes() -> Router<AppState> {
    RouterBuilder::with_minimal_routes().build()
}

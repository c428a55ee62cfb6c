//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod attendance;
mod authentication;
mod error;
mod groups;
mod request;
mod response;
mod scores;
mod students;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::request::Pagination;
pub(crate) use crate::handler::response::{ErrorResponse, UserProfile};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all API routes nested under `/api`.
pub fn api_routes() -> Router<ServiceState> {
    let router = Router::new()
        .merge(authentication::routes())
        .merge(groups::routes())
        .merge(students::routes())
        .merge(attendance::routes())
        .merge(scores::routes());

    Router::new().nest("/api", router).fallback(handler)
}

#[cfg(test)]
mod test {
    use axum::Router;
    use axum_test::TestServer;

    use crate::handler::api_routes;
    use crate::service::{ServiceConfig, ServiceState};

    /// Returns a new [`TestServer`] with the given router.
    ///
    /// The connection pool is created eagerly but connections are only
    /// established on first use, so routes that fail before touching the
    /// database can be tested without one.
    pub fn create_test_server_with_router(
        router: impl Fn() -> Router<ServiceState>,
    ) -> anyhow::Result<TestServer> {
        let (server, _state) = create_test_server_with_state(router)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] along with the state backing it.
    pub fn create_test_server_with_state(
        router: impl Fn() -> Router<ServiceState>,
    ) -> anyhow::Result<(TestServer, ServiceState)> {
        let config = ServiceConfig::default();
        let state = ServiceState::from_config(&config)?;
        let app = router().with_state(state.clone());
        let server = TestServer::new(app)?;
        Ok((server, state))
    }

    /// Returns a new [`TestServer`] with the full API router.
    pub fn create_test_server() -> anyhow::Result<TestServer> {
        create_test_server_with_router(api_routes)
    }

    #[tokio::test]
    async fn unknown_routes_fall_back_to_not_found() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/does-not-exist/").await;
        response.assert_status_not_found();

        Ok(())
    }

    #[tokio::test]
    async fn api_routes_are_nested() -> anyhow::Result<()> {
        let server = create_test_server()?;

        // The same path outside of the `/api` prefix does not exist.
        let response = server.get("/auth/user/").await;
        response.assert_status_not_found();

        Ok(())
    }
}

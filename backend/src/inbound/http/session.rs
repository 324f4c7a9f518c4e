//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie carries only the authenticated user id. Role and entitlements
//! are resolved per request through the identity directory so a purchase or
//! role change takes effect without a new login.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    ///
    /// A value that is not a valid user id is treated as absent so a stale
    /// or tampered cookie degrades to an anonymous caller.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| {
            UserId::new(&value)
                .inspect_err(|error| tracing::warn!(%error, "ignoring malformed session user id"))
                .ok()
        }))
    }

    /// Require an authenticated user id or fail with `unauthenticated`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthenticated("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use crate::inbound::http::test_utils::test_session_middleware;

    const ADA: &str = "11111111-2222-4333-8444-555555555555";

    /// Store `raw` verbatim under the user id key, bypassing validation.
    async fn seed(session: Session, raw: web::Path<String>) -> HttpResponse {
        match session.insert(USER_ID_KEY, raw.into_inner()) {
            Ok(()) => HttpResponse::NoContent().finish(),
            Err(_) => HttpResponse::InternalServerError().finish(),
        }
    }

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = session.require_user_id()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    async fn login_as_ada(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = UserId::new(ADA).map_err(|err| Error::internal(err.to_string()))?;
        session.persist_user(&id)?;
        Ok(HttpResponse::NoContent().finish())
    }

    #[rstest]
    #[case::persisted_login(Some("/login"), StatusCode::OK)]
    #[case::no_cookie(None, StatusCode::UNAUTHORIZED)]
    #[case::malformed_id(Some("/seed/not-a-uuid"), StatusCode::UNAUTHORIZED)]
    #[case::blank_id(Some("/seed/%20"), StatusCode::UNAUTHORIZED)]
    #[actix_web::test]
    async fn whoami_reflects_cookie_contents(
        #[case] setup: Option<&str>,
        #[case] expected: StatusCode,
    ) {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/login", web::post().to(login_as_ada))
                .route("/seed/{raw}", web::post().to(seed))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let mut request = test::TestRequest::get().uri("/whoami");
        if let Some(uri) = setup {
            let res = test::call_service(&app, test::TestRequest::post().uri(uri).to_request()).await;
            assert_eq!(res.status(), StatusCode::NO_CONTENT);
            let cookie = res
                .response()
                .cookies()
                .find(|cookie| cookie.name() == "session")
                .map(|cookie| cookie.into_owned())
                .expect("session cookie set");
            request = request.cookie(cookie);
        }

        let res = test::call_service(&app, request.to_request()).await;
        assert_eq!(res.status(), expected);
        if expected == StatusCode::OK {
            assert_eq!(test::read_body(res).await, ADA);
        }
    }
}

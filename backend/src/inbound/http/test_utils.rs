//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::{App, HttpResponse, test as actix_test, web};

use crate::domain::course::CourseId;
use crate::domain::ports::{
    CourseContentCommand, CourseContentQuery, FixtureCourseContentCommand,
    FixtureCourseContentQuery, IdentityDirectory,
};
use crate::domain::{CallerIdentity, Error, Role, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

pub fn admin_identity() -> CallerIdentity {
    CallerIdentity {
        id: UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id"),
        name: "Grace".to_owned(),
        email: "grace@example.com".to_owned(),
        role: Role::Admin,
        entitlements: Vec::new(),
    }
}

pub fn learner_identity(entitlements: Vec<CourseId>) -> CallerIdentity {
    CallerIdentity {
        id: UserId::new("11111111-2222-4333-8444-555555555555").expect("fixture id"),
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        role: Role::User,
        entitlements,
    }
}

async fn test_login(
    session: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let user_id = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// App wired with session middleware, the given state and a test-only
/// `POST /test/login/{user_id}` route that seeds the session cookie.
pub fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .route("/test/login/{user_id}", web::post().to(test_login))
}

pub fn test_app_with_identities(
    identities: Arc<dyn IdentityDirectory>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let query: Arc<dyn CourseContentQuery> = Arc::new(FixtureCourseContentQuery);
    let command: Arc<dyn CourseContentCommand> = Arc::new(FixtureCourseContentCommand);
    test_app(HttpState::new(query, command, identities))
}

/// Log in as `user_id` and return the session cookie.
pub async fn login_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    user_id: &UserId,
) -> Cookie<'static> {
    let request = actix_test::TestRequest::post()
        .uri(&format!("/test/login/{user_id}"))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success());
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

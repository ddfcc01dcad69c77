//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, test, web};

use crate::domain::test_fixtures::fixture_clock;
use crate::domain::{ExchangeRequestService, FeedService, InboxService, ListingService};
use crate::inbound::http::session::USER_ID_KEY;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::MemoryDocumentStore;

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

async fn test_sign_in(
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    session.insert(USER_ID_KEY, path.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}

/// Stand-in for the external sign-in flow: `GET /test/sign-in/{user}`.
pub fn sign_in_route(cfg: &mut web::ServiceConfig) {
    cfg.route("/test/sign-in/{user}", web::get().to(test_sign_in));
}

/// Sign `user` in and return the session cookie.
pub async fn sign_in<S, B>(app: &S, user: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/test/sign-in/{user}"))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "sign-in route failed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("sign-in sets the session cookie")
}

/// HTTP state wired to real services over one in-memory store.
pub fn memory_state() -> (HttpState, Arc<MemoryDocumentStore>) {
    let store = Arc::new(MemoryDocumentStore::new());
    let listings = Arc::new(ListingService::new(store.clone(), fixture_clock()));
    let state = HttpState {
        listings: listings.clone(),
        listings_query: listings,
        requests: Arc::new(ExchangeRequestService::new(
            store.clone(),
            store.clone(),
            fixture_clock(),
        )),
        inbox: Arc::new(InboxService::new(store.clone(), store.clone())),
        feed: Arc::new(FeedService::new(store.clone(), store.clone())),
    };
    (state, store)
}

/// Initialise the `/api/v1` surface with test sessions and the sign-in route.
pub async fn init_api(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    test::init_service(
        actix_web::App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .configure(sign_in_route)
            .service(web::scope("/api/v1").configure(super::configure_api)),
    )
    .await
}

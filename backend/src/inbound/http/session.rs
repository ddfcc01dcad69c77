//! Session access for HTTP handlers.
//!
//! The external sign-in flow writes the provider's user id into the cookie
//! session under [`USER_ID_KEY`]. Handlers only read it back.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

/// Session key holding the signed-in user's id.
pub const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes the acting user.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the underlying Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Signed-in user, if any. Malformed ids are treated as absent.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|err| Error::internal(format!("failed to read session: {err}")))?;
        Ok(raw.and_then(|raw| match UserId::new(raw) {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(error = %err, "ignoring malformed user id in session cookie");
                None
            }
        }))
    }

    /// Signed-in user or `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("sign in required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Self::new) })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use super::*;
    use crate::inbound::http::test_utils::{sign_in, sign_in_route, test_session_middleware};

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = session.require_user_id()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    #[actix_web::test]
    async fn reads_user_written_by_sign_in() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .configure(sign_in_route)
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let cookie = sign_in(&app, "Xy9kQ2").await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "Xy9kQ2");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("  padded  "))]
    #[actix_web::test]
    async fn missing_or_malformed_user_is_unauthorised(#[case] stored: Option<&'static str>) {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/store",
                    web::get().to(move |session: Session| async move {
                        if let Some(raw) = stored {
                            session.insert(USER_ID_KEY, raw)?;
                        }
                        Ok::<_, actix_web::Error>(HttpResponse::Ok())
                    }),
                )
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let store_res =
            test::call_service(&app, test::TestRequest::get().uri("/store").to_request()).await;
        let mut req = test::TestRequest::get().uri("/whoami");
        if let Some(cookie) = store_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
        {
            req = req.cookie(cookie.into_owned());
        }

        let res = test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

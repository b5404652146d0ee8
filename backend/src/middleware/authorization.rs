//! Role-gate middleware for session-authenticated scopes.
//!
//! [`RequireRole`] inspects the session before any extractor runs, so a
//! caller without the role is rejected regardless of the request body. The
//! session middleware must wrap the scope this is applied to.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::UserType;
use crate::inbound::http::session::SessionContext;

/// Reject requests whose session does not hold `role`.
///
/// Anonymous callers receive 401 `login required`; other roles receive 403.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use companion_backend::middleware::RequireRole;
///
/// let app = App::new().service(web::scope("/admin").wrap(RequireRole::admin()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireRole {
    role: UserType,
}

impl RequireRole {
    /// Gate on an arbitrary role.
    pub fn new(role: UserType) -> Self {
        Self { role }
    }

    /// Gate on [`UserType::Admin`].
    pub fn admin() -> Self {
        Self::new(UserType::Admin)
    }

    /// Gate on [`UserType::Companion`].
    pub fn companion() -> Self {
        Self::new(UserType::Companion)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            role: self.role,
        }))
    }
}

/// Service wrapper produced by [`RequireRole`].
pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    role: UserType,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let role = self.role;
        // The check runs inside the future so errors capture the request's
        // trace id.
        Box::pin(async move {
            let session = SessionContext::new(req.get_session());
            match session.require_role(role) {
                Ok(user) => {
                    debug!(user_id = %user.id, %role, "role check passed");
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    debug!(%role, code = ?error.code(), "role check failed");
                    let response = error.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{AuthenticatedUser, Error as DomainError, UserId};
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl actix_web::body::MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/as/{role}",
                web::get().to(|session: SessionContext, role: web::Path<String>| async move {
                    let user_type = role
                        .parse::<UserType>()
                        .map_err(|err| DomainError::invalid_request(err.to_string()))?;
                    session.persist_user(&AuthenticatedUser {
                        id: UserId::random(),
                        user_type,
                    })?;
                    Ok::<_, DomainError>(HttpResponse::Ok())
                }),
            )
            .service(
                web::scope("/admin")
                    .wrap(RequireRole::admin())
                    .route("/ping", web::post().to(|| async { HttpResponse::Ok() })),
            )
    }

    #[actix_web::test]
    async fn anonymous_callers_are_unauthorised() {
        let app = test::init_service(test_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/admin/ping")
                .set_payload("not json at all")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: DomainError = test::read_body_json(res).await;
        assert_eq!(body.message(), "login required");
    }

    #[rstest]
    #[case("Client", StatusCode::FORBIDDEN)]
    #[case("Companion", StatusCode::FORBIDDEN)]
    #[case("Admin", StatusCode::OK)]
    #[actix_web::test]
    async fn only_the_required_role_passes(#[case] role: &str, #[case] expected: StatusCode) {
        let app = test::init_service(test_app()).await;
        let login = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/as/{role}"))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&login);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/admin/ping")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), expected);
    }
}

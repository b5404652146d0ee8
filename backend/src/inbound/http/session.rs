//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The session cookie carries the authenticated user's id and role. Values
//! that fail to parse are treated as an anonymous session.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AuthenticatedUser, Error, UserId, UserType};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const USER_TYPE_KEY: &str = "user_type";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated identity, rotating the session cookie.
    pub fn persist_user(&self, user: &AuthenticatedUser) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user.id.as_ref())
            .and_then(|()| self.0.insert(USER_TYPE_KEY, user.user_type.as_str()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop every session value and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }

    /// Fetch the current identity, if the session holds a valid one.
    pub fn user(&self) -> Result<Option<AuthenticatedUser>, Error> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| Error::internal(format!("failed to read session: {error}")))
        };
        let (Some(raw_id), Some(raw_type)) = (read(USER_ID_KEY)?, read(USER_TYPE_KEY)?) else {
            return Ok(None);
        };

        let id = match UserId::new(raw_id) {
            Ok(id) => id,
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                return Ok(None);
            }
        };
        let user_type = match raw_type.parse::<UserType>() {
            Ok(user_type) => user_type,
            Err(error) => {
                warn!(%error, "invalid user type in session cookie");
                return Ok(None);
            }
        };
        Ok(Some(AuthenticatedUser { id, user_type }))
    }

    /// Require an authenticated user or return `401 Unauthorized`.
    pub fn require_user(&self) -> Result<AuthenticatedUser, Error> {
        self.user()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require an authenticated user holding `role`.
    ///
    /// Anonymous sessions yield 401; other roles yield 403.
    pub fn require_role(&self, role: UserType) -> Result<AuthenticatedUser, Error> {
        let user = self.require_user()?;
        if user.user_type == role {
            Ok(user)
        } else {
            Err(Error::forbidden(format!(
                "Access denied. {role} privileges required."
            )))
        }
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

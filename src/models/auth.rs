//! Authenticated user claims extracted from the identity cookie.
//!
//! Sign-in happens on the external auth service; this application only
//! validates the JWT it issued and exposes the claims to handlers.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Decode and validate a JWT issued by the auth service.
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = decode::<AuthenticatedUser>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }

    /// Encode claims back into a JWT; used by tests and fixtures.
    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }
}

/// Returns true when the user carries the given role.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = match Identity::from_request(req, payload).into_inner() {
            Ok(identity) => identity,
            Err(_) => return ready(Err(ErrorUnauthorized("not signed in"))),
        };

        let token = match identity.id() {
            Ok(token) => token,
            Err(_) => return ready(Err(ErrorUnauthorized("not signed in"))),
        };

        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            return ready(Err(ErrorUnauthorized("server configuration missing")));
        };

        match AuthenticatedUser::from_jwt(&token, &config.secret) {
            Ok(user) => ready(Ok(user)),
            Err(e) => {
                log::warn!("Rejecting identity cookie: {e}");
                ready(Err(ErrorUnauthorized("invalid session")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "ops@example.com".to_string(),
            name: "Ops".to_string(),
            roles: vec!["ops".to_string()],
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        }
    }

    #[test]
    fn jwt_round_trip() {
        let user = sample_user();
        let token = user.to_jwt("test-secret").expect("encode");
        let decoded = AuthenticatedUser::from_jwt(&token, "test-secret").expect("decode");
        assert_eq!(decoded, user);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sample_user().to_jwt("test-secret").expect("encode");
        assert!(AuthenticatedUser::from_jwt(&token, "other-secret").is_err());
    }

    #[test]
    fn check_role_matches_exactly() {
        let roles = vec!["ops".to_string(), "ops_admin".to_string()];
        assert!(check_role("ops", &roles));
        assert!(check_role("ops_admin", &roles));
        assert!(!check_role("installer", &roles));
    }
}

use crate::model::UserRecord;
use encore_rbac::{Grant, Identity, RbacError, Role, Workcenter};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("invalid claims: {0}")]
    InvalidClaims(#[from] RbacError),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Claims carried by Encore bearer tokens.
///
/// `workcenters` and `permissions` are optional: tokens minted from an SSO
/// role alone omit them and the verifier falls back to the role's default
/// matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workcenters: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Grant>>,
    pub iat: i64,
    pub exp: i64,
}

/// Mints HS256 tokens for development and tests.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Mint a token carrying the user's explicit memberships and grants.
    pub fn mint(&self, user: &UserRecord) -> AuthResult<String> {
        let now = now_epoch_seconds();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.as_str().to_string(),
            workcenters: Some(
                user.workcenters
                    .iter()
                    .map(|workcenter| workcenter.as_str().to_string())
                    .collect(),
            ),
            permissions: Some(user.grants.clone()),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };
        let token =
            jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }
}

/// Verifies HS256 tokens and rebuilds the request identity.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    leeway: u64,
}

impl TokenVerifier {
    pub fn new(secret: &str, leeway: u64) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway,
        }
    }

    /// Verify a bearer token and resolve it to an [`Identity`].
    ///
    /// Tags outside the closed role/workcenter sets are authentication
    /// failures, never silent downgrades. Claims that omit memberships or
    /// grants fall back to the role's defaults.
    pub fn verify(&self, token: &str) -> AuthResult<Identity> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;
        let token = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)?;
        identity_from_claims(token.claims)
    }
}

fn identity_from_claims(claims: Claims) -> AuthResult<Identity> {
    let role: Role = claims.role.parse()?;
    let workcenters = match claims.workcenters {
        Some(tags) => tags
            .iter()
            .map(|tag| tag.parse::<Workcenter>())
            .collect::<Result<Vec<_>, _>>()?,
        None => role.default_workcenters(),
    };
    let grants = claims
        .permissions
        .unwrap_or_else(|| role.default_grants());
    Ok(Identity::new(claims.sub, role)
        .with_workcenters(workcenters)
        .with_grants(grants))
}

fn now_epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0))
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_rbac::{Action, Resource};

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", Duration::from_secs(600))
    }

    fn verifier() -> TokenVerifier {
        TokenVerifier::new("test-secret", 5)
    }

    fn test_user(role: Role) -> UserRecord {
        UserRecord::new("lead@encore.test", "Test Lead", role)
    }

    #[test]
    fn mint_and_verify_roundtrip() {
        let user = test_user(Role::ProductionLead);
        let token = issuer().mint(&user).expect("mint token");
        let identity = verifier().verify(&token).expect("verify token");
        assert_eq!(identity.subject, user.id.to_string());
        assert_eq!(identity.role, Role::ProductionLead);
        assert!(identity.workcenters.contains(&Workcenter::Production));
        assert!(
            identity
                .grants
                .contains(&Grant::scoped(Resource::Tasks, Action::Update, Workcenter::Production))
        );
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let user = test_user(Role::Viewer);
        let token = issuer().mint(&user).expect("mint token");
        let err = TokenVerifier::new("other-secret", 5)
            .verify(&token)
            .expect_err("wrong secret");
        assert!(matches!(err, AuthError::Jwt(_)));
    }

    #[test]
    fn verify_rejects_expired_token() {
        let now = now_epoch_seconds();
        let claims = Claims {
            sub: "u-1".to_string(),
            email: "old@encore.test".to_string(),
            name: "Old".to_string(),
            role: "viewer".to_string(),
            workcenters: None,
            permissions: None,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode");
        let err = verifier().verify(&token).expect_err("expired");
        assert!(matches!(err, AuthError::Jwt(_)));
    }

    #[test]
    fn unknown_role_fails_closed() {
        let now = now_epoch_seconds();
        let claims = Claims {
            sub: "u-1".to_string(),
            email: "who@encore.test".to_string(),
            name: "Who".to_string(),
            role: "superuser".to_string(),
            workcenters: None,
            permissions: None,
            iat: now,
            exp: now + 600,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode");
        let err = verifier().verify(&token).expect_err("unknown role");
        assert!(matches!(
            err,
            AuthError::InvalidClaims(RbacError::UnknownRole(_))
        ));
    }

    #[test]
    fn unknown_workcenter_fails_closed() {
        let now = now_epoch_seconds();
        let claims = Claims {
            sub: "u-1".to_string(),
            email: "who@encore.test".to_string(),
            name: "Who".to_string(),
            role: "operations_lead".to_string(),
            workcenters: Some(vec!["catering".to_string()]),
            permissions: None,
            iat: now,
            exp: now + 600,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode");
        let err = verifier().verify(&token).expect_err("unknown workcenter");
        assert!(matches!(
            err,
            AuthError::InvalidClaims(RbacError::UnknownWorkcenter(_))
        ));
    }

    #[test]
    fn missing_claims_fall_back_to_role_defaults() {
        let now = now_epoch_seconds();
        let claims = Claims {
            sub: "u-1".to_string(),
            email: "sec@encore.test".to_string(),
            name: "Sec".to_string(),
            role: "security_lead".to_string(),
            workcenters: None,
            permissions: None,
            iat: now,
            exp: now + 600,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode");
        let identity = verifier().verify(&token).expect("verify");
        assert!(identity.workcenters.contains(&Workcenter::Security));
        assert_eq!(identity.grants, Role::SecurityLead.default_grants());
    }
}

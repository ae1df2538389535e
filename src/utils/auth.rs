use axum::http::{header, HeaderMap};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::config::AuthConfig;

/// 会员令牌声明，membership_expires_at 为会员到期时间（Unix 秒）
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MemberClaims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub membership_expires_at: Option<i64>,
}

/// 鉴权通过后的主体
#[derive(Debug, Clone, PartialEq)]
pub enum Principal {
    Admin,
    Member { user_id: String },
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("缺少凭证")]
    MissingToken,
    #[error("凭证无效")]
    InvalidToken,
    #[error("会员已过期或不存在")]
    MembershipExpired,
}

/// 请求级鉴权闸口：先按会员令牌校验，失败后回退管理员令牌
#[derive(Clone)]
pub struct AuthGate {
    jwt_secret: String,
    admin_token: String,
}

impl AuthGate {
    pub fn new(cfg: &AuthConfig) -> Self {
        Self {
            jwt_secret: cfg.jwt_secret.clone(),
            admin_token: cfg.admin_token.clone(),
        }
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AuthError> {
        let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;

        match self.validate_member(token) {
            Ok(principal) => Ok(principal),
            Err(member_err) => {
                if token == self.admin_token {
                    Ok(Principal::Admin)
                } else {
                    Err(member_err)
                }
            }
        }
    }

    fn validate_member(&self, token: &str) -> Result<Principal, AuthError> {
        let data = decode::<MemberClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AuthError::InvalidToken)?;

        let now = chrono::Utc::now().timestamp();
        match data.claims.membership_expires_at {
            Some(expires_at) if expires_at > now => Ok(Principal::Member {
                user_id: data.claims.sub,
            }),
            _ => Err(AuthError::MembershipExpired),
        }
    }

    /// 签发会员令牌（供登录服务与测试使用）
    pub fn issue_member_token(
        &self,
        user_id: &str,
        membership_expires_at: Option<i64>,
        token_ttl_secs: u64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = MemberClaims {
            sub: user_id.to_string(),
            exp: now + token_ttl_secs as usize,
            iat: now,
            membership_expires_at,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn gate() -> AuthGate {
        AuthGate {
            jwt_secret: "test-secret-key-32-bytes-long!!!".to_string(),
            admin_token: "admin-token-for-tests".to_string(),
        }
    }

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_active_member_passes() {
        let gate = gate();
        let expires = chrono::Utc::now().timestamp() + 86_400;
        let token = gate.issue_member_token("u1", Some(expires), 3600).unwrap();
        let principal = gate.authenticate(&headers_with(&token)).unwrap();
        assert_eq!(
            principal,
            Principal::Member {
                user_id: "u1".to_string()
            }
        );
    }

    #[test]
    fn test_expired_membership_rejected() {
        let gate = gate();
        let expired = chrono::Utc::now().timestamp() - 60;
        let token = gate.issue_member_token("u1", Some(expired), 3600).unwrap();
        let err = gate.authenticate(&headers_with(&token)).unwrap_err();
        assert!(matches!(err, AuthError::MembershipExpired));
    }

    #[test]
    fn test_admin_token_passes() {
        let gate = gate();
        let principal = gate
            .authenticate(&headers_with("admin-token-for-tests"))
            .unwrap();
        assert_eq!(principal, Principal::Admin);
    }

    #[test]
    fn test_missing_and_garbage_tokens() {
        let gate = gate();
        assert!(matches!(
            gate.authenticate(&HeaderMap::new()).unwrap_err(),
            AuthError::MissingToken
        ));
        assert!(matches!(
            gate.authenticate(&headers_with("not-a-jwt")).unwrap_err(),
            AuthError::InvalidToken
        ));
    }
}

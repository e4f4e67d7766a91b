//! HS256 bearer token codec backed by `jsonwebtoken`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{TokenCodec, TokenCodecError};
use crate::domain::{AccessToken, Principal, Role};

/// Claims carried by every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Claims {
    uid: String,
    email: String,
    role: String,
    exp: i64,
    iat: i64,
}

impl Claims {
    fn into_principal(self) -> Result<Principal, TokenCodecError> {
        let user_id = Uuid::parse_str(&self.uid)
            .map_err(|err| TokenCodecError::claims(format!("uid: {err}")))?;
        let role = self
            .role
            .parse::<Role>()
            .map_err(|err| TokenCodecError::claims(err.to_string()))?;
        Ok(Principal {
            user_id,
            email: self.email,
            role,
        })
    }
}

/// Signs and verifies tokens with a shared HMAC secret.
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenCodec {
    /// Build a codec from the signing secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
        }
    }
}

#[async_trait]
impl TokenCodec for JwtTokenCodec {
    async fn issue(
        &self,
        principal: &Principal,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<AccessToken, TokenCodecError> {
        let claims = Claims {
            uid: principal.user_id.to_string(),
            email: principal.email.clone(),
            role: principal.role.as_str().to_owned(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map(AccessToken::new)
            .map_err(|err| TokenCodecError::encoding(err.to_string()))
    }

    async fn decode(&self, token: &str) -> Result<Principal, TokenCodecError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |err| match err.kind() {
                ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                    TokenCodecError::claims(err.to_string())
                }
                _ => TokenCodecError::invalid(err.to_string()),
            },
        )?;
        data.claims.into_principal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::{fixture, rstest};

    const SECRET: &[u8] = b"intake-signing-secret";

    #[fixture]
    fn codec() -> JwtTokenCodec {
        JwtTokenCodec::new(SECRET)
    }

    fn principal(role: Role) -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            email: "clerk@pvz.example".to_owned(),
            role,
        }
    }

    fn sign_raw<T: Serialize>(claims: &T) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(SECRET))
            .expect("raw claims encode")
    }

    #[rstest]
    #[case(Role::Employee)]
    #[case(Role::Moderator)]
    #[tokio::test]
    async fn issued_tokens_decode_to_the_same_principal(
        codec: JwtTokenCodec,
        #[case] role: Role,
    ) {
        let expected = principal(role);
        let now = Utc::now();
        let token = codec
            .issue(&expected, now, now + Duration::hours(24))
            .await
            .expect("token issued");

        let decoded = codec.decode(token.as_str()).await.expect("token decodes");
        assert_eq!(decoded, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn tokens_signed_with_another_secret_are_invalid(codec: JwtTokenCodec) {
        let now = Utc::now();
        let foreign = JwtTokenCodec::new(b"someone-else")
            .issue(&principal(Role::Employee), now, now + Duration::hours(1))
            .await
            .expect("token issued");

        let error = codec.decode(foreign.as_str()).await.expect_err("rejected");
        assert!(matches!(error, TokenCodecError::Invalid { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn expired_tokens_are_invalid(codec: JwtTokenCodec) {
        let issued = Utc::now() - Duration::hours(30);
        let token = codec
            .issue(&principal(Role::Moderator), issued, issued + Duration::hours(24))
            .await
            .expect("token issued");

        let error = codec.decode(token.as_str()).await.expect_err("rejected");
        assert!(matches!(error, TokenCodecError::Invalid { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn garbage_is_invalid(codec: JwtTokenCodec) {
        let error = codec.decode("not.a.token").await.expect_err("rejected");
        assert!(matches!(error, TokenCodecError::Invalid { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_roles_are_malformed_claims(codec: JwtTokenCodec) {
        let now = Utc::now();
        let token = sign_raw(&Claims {
            uid: Uuid::new_v4().to_string(),
            email: "root@pvz.example".to_owned(),
            role: "admin".to_owned(),
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        });

        let error = codec.decode(&token).await.expect_err("rejected");
        assert!(matches!(error, TokenCodecError::Claims { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn claims_missing_fields_are_malformed(codec: JwtTokenCodec) {
        #[derive(Serialize)]
        struct Partial {
            exp: i64,
        }

        let token = sign_raw(&Partial {
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        });

        let error = codec.decode(&token).await.expect_err("rejected");
        assert!(matches!(error, TokenCodecError::Claims { .. }));
    }
}

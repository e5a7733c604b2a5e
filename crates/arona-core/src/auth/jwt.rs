//! Local decoding of the callback token's payload.
//!
//! The signature is not checked here; the backend verifies it on every
//! request. The payload is only used to show who signed in and where to go.

use base64::Engine;
use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::DecodeError;
use crate::types::UserProfile;

/// base64url, with or without trailing padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode the profile claims from a JWT without verifying it.
///
/// Only the payload segment is read, so a missing signature segment is
/// accepted.
pub fn decode_profile(token: &str) -> Result<UserProfile, DecodeError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() < 2 {
        return Err(DecodeError::Token {
            reason: "no payload segment".to_string(),
        });
    }

    let payload = PAYLOAD_ENGINE
        .decode(parts[1])
        .map_err(|e| DecodeError::Token {
            reason: format!("payload is not base64url: {}", e),
        })?;

    let claims: serde_json::Value =
        serde_json::from_slice(&payload).map_err(|e| DecodeError::Token {
            reason: format!("payload is not JSON: {}", e),
        })?;

    UserProfile::from_value(claims)
}

#[cfg(test)]
pub(crate) fn encode_token(claims: &serde_json::Value) -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_owner_claims() {
        let token = encode_token(&json!({
            "id": "1234",
            "username": "arona",
            "avatar": "https://cdn.discordapp.com/avatars/1234/a.png",
            "isOwner": true,
            "iat": 1_700_000_000,
            "exp": 1_700_086_400
        }));

        let profile = decode_profile(&token).unwrap();
        assert_eq!(profile.username(), "arona");
        assert!(profile.is_owner());
    }

    #[test]
    fn accepts_padded_payload() {
        use base64::engine::general_purpose::URL_SAFE as PADDED;

        let payload = PADDED.encode(json!({ "username": "ab" }).to_string());
        let token = format!("e30.{}.sig", payload);
        assert_eq!(decode_profile(&token).unwrap().username(), "ab");
    }

    #[test]
    fn accepts_token_without_signature() {
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let payload = URL_SAFE_NO_PAD.encode(json!({ "username": "sensei" }).to_string());
        let token = format!("e30.{}", payload);
        assert_eq!(decode_profile(&token).unwrap().username(), "sensei");
    }

    #[test]
    fn rejects_token_without_payload() {
        assert!(matches!(
            decode_profile("not-a-jwt"),
            Err(DecodeError::Token { .. })
        ));
    }

    #[test]
    fn rejects_non_json_payload() {
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let token = format!("e30.{}.sig", URL_SAFE_NO_PAD.encode("plain text"));
        assert!(decode_profile(&token).is_err());
    }

    #[test]
    fn rejects_claims_without_username() {
        let token = encode_token(&json!({ "isOwner": true }));
        assert!(matches!(
            decode_profile(&token),
            Err(DecodeError::Schema { .. })
        ));
    }
}

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use thiserror::Error;

use crate::domain::model::Advice;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("advice serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not a valid advice record: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Encodes an advice record into an opaque, URL-safe share token.
pub fn encode_advice(advice: &Advice) -> Result<String, EncodeError> {
    let json = serde_json::to_vec(advice)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decodes a share token back into an advice record. Tampered, truncated or
/// otherwise malformed tokens yield an error, never a panic.
pub fn decode_advice(token: &str) -> Result<Advice, DecodeError> {
    let bytes = URL_SAFE_NO_PAD.decode(token.trim())?;
    let advice = serde_json::from_slice(&bytes)?;
    Ok(advice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CompetenceLevel, ContactPreference, Selection};
    use chrono::Utc;

    fn sample_advice() -> Advice {
        let mut selection = Selection {
            name: "Esmée van der Berg".to_string(),
            email: "esmee@example.com".to_string(),
            background: "werktuigbouwkunde".to_string(),
            role: "procesengineer".to_string(),
            interests: vec!["A".to_string(), "C".to_string()],
            wants_contact: Some(ContactPreference::Yes),
            ..Default::default()
        };
        selection
            .competences
            .insert("cmm".to_string(), CompetenceLevel::NotFamiliar);
        selection
            .competences
            .insert("ip".to_string(), CompetenceLevel::Skilled);

        Advice {
            created_at: Utc::now(),
            selection,
            recommended: vec!["designForMfg".to_string(), "cmm".to_string()],
        }
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let advice = sample_advice();
        let token = encode_advice(&advice).unwrap();
        let decoded = decode_advice(&token).unwrap();
        assert_eq!(decoded, advice);
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = encode_advice(&sample_advice()).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_multibyte_labels_round_trip() {
        let mut advice = sample_advice();
        advice.selection.name = "Jörg Müller-Łukasz 中文".to_string();
        let decoded = decode_advice(&encode_advice(&advice).unwrap()).unwrap();
        assert_eq!(decoded.selection.name, advice.selection.name);
    }

    #[test]
    fn test_garbage_token_is_an_error() {
        assert!(decode_advice("!!! not base64 !!!").is_err());
        assert!(decode_advice("").is_err());
    }

    #[test]
    fn test_truncated_token_is_an_error() {
        let token = encode_advice(&sample_advice()).unwrap();
        let truncated = &token[..token.len() / 2];
        assert!(decode_advice(truncated).is_err());
    }

    #[test]
    fn test_valid_base64_with_wrong_payload_is_an_error() {
        let token = URL_SAFE_NO_PAD.encode(b"{\"not\": \"an advice record\"}");
        assert!(matches!(decode_advice(&token), Err(DecodeError::Payload(_))));
    }
}

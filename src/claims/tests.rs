use super::*;
use base64::engine::general_purpose::URL_SAFE;
use serde_json::json;

// =========================================================
// 辅助函数
// =========================================================

fn make_token(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, body)
}

// =========================================================
// 成功解码
// =========================================================

#[test]
fn test_decode_returns_payload_claims() {
    let token = make_token(&json!({ "user_id": 42, "role": "trader", "exp": 1_900_000_000u64 }));

    let claims = decode_claims(&token).unwrap();
    assert_eq!(claims.get("user_id"), Some(&json!(42)));
    assert_eq!(claims.user_id(), Some(42));
    assert_eq!(claims.role(), Some(Role::Trader));
    assert_eq!(claims.expires_at(), Some(1_900_000_000));
    assert_eq!(claims.as_map().len(), 3);
}

#[test]
fn test_decode_keeps_unknown_claims() {
    let token = make_token(&json!({ "sub": "alice", "nested": { "a": [1, 2] } }));

    let claims = decode_claims(&token).unwrap();
    assert_eq!(claims.get("sub"), Some(&json!("alice")));
    assert_eq!(claims.get("nested"), Some(&json!({ "a": [1, 2] })));
    assert_eq!(claims.user_id(), None);
    assert_eq!(claims.role(), None);
}

#[test]
fn test_decode_accepts_padded_payload() {
    let header = URL_SAFE.encode("{}");
    let body = URL_SAFE.encode(r#"{"role":"client"}"#);
    assert!(body.ends_with('='));
    let token = format!("{}.{}.sig", header, body);

    let claims = decode_claims(&token).unwrap();
    assert_eq!(claims.role(), Some(Role::Client));
}

#[test]
fn test_signature_is_not_verified() {
    let token = make_token(&json!({ "role": "seller" }));
    let tampered = format!("{}garbage", token);

    let claims = decode_claims(&tampered).unwrap();
    assert_eq!(claims.role(), Some(Role::Seller));
}

#[test]
fn test_float_expiry_and_expired_check() {
    let token = make_token(&json!({ "exp": 1000.0 }));
    let claims = decode_claims(&token).unwrap();

    assert_eq!(claims.expires_at(), Some(1000));
    assert!(!claims.is_expired_at(999));
    assert!(claims.is_expired_at(1000));
    assert!(claims.is_expired_at(5000));
}

#[test]
fn test_missing_expiry_is_never_expired() {
    let token = make_token(&json!({ "user_id": 1 }));
    let claims = decode_claims(&token).unwrap();
    assert!(!claims.is_expired_at(u64::MAX));
}

// =========================================================
// 失败路径
// =========================================================

#[test]
fn test_not_a_token() {
    let err = decode_claims("not-a-token").unwrap_err();
    assert!(matches!(err, DecodeError::SegmentCount { found: 1 }));
    assert!(parse_token("not-a-token").is_none());
}

#[test]
fn test_wrong_segment_count() {
    assert!(matches!(
        decode_claims("a.b").unwrap_err(),
        DecodeError::SegmentCount { found: 2 }
    ));
    assert!(matches!(
        decode_claims("a.b.c.d").unwrap_err(),
        DecodeError::SegmentCount { found: 4 }
    ));
    assert!(matches!(
        decode_claims("").unwrap_err(),
        DecodeError::SegmentCount { found: 1 }
    ));
}

#[test]
fn test_invalid_base64_payload() {
    let err = decode_claims("abc.@@@.ghi").unwrap_err();
    assert!(matches!(err, DecodeError::Base64(_)));
}

#[test]
fn test_payload_not_json() {
    let token = format!("abc.{}.ghi", URL_SAFE_NO_PAD.encode("hello"));
    let err = decode_claims(&token).unwrap_err();
    assert!(matches!(err, DecodeError::Json(_)), "unexpected: {err}");
    assert!(parse_token(&token).is_none());
}

#[test]
fn test_payload_not_an_object() {
    let body = URL_SAFE_NO_PAD.encode("[1,2,3]");
    let token = format!("h.{}.s", body);
    assert!(matches!(
        decode_claims(&token).unwrap_err(),
        DecodeError::NotAnObject
    ));
}

#[test]
fn test_error_message_is_readable() {
    let err = decode_claims("only.two").unwrap_err();
    assert_eq!(err.to_string(), "令牌应包含 3 段，实际为 2 段");
}

//! End-to-end round trips through the public callback API.

use botgate_callback::{CallbackCrypto, CallbackError, Credential, EncryptedEnvelope, StreamReply};
use botgate_crypto::compute_signature;

const TOKEN: &str = "t0k3n";
const ENCODING_KEY: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

fn engine(receiver_id: Option<&str>) -> CallbackCrypto {
    let cred = Credential::new(TOKEN, ENCODING_KEY, receiver_id.map(String::from)).unwrap();
    CallbackCrypto::new(cred)
}

#[test]
fn stream_payload_roundtrips_byte_for_byte() {
    let engine = engine(Some("bot-001"));
    let payload = r#"{"msgtype":"stream","stream":{"id":"s1","finish":false,"content":"hi"}}"#;

    let wire = engine.encrypt_message(payload, "n1").unwrap();
    let recovered = engine
        .decrypt_message(&wire.msgsignature, &wire.timestamp, &wire.nonce, &wire.encrypt)
        .unwrap();
    assert_eq!(recovered, payload);
}

#[test]
fn url_verification_echoes_the_wrapped_plaintext() {
    let engine = engine(None);
    let wire = engine.encrypt_message("echo-me-back", "n1").unwrap();
    let echoed = engine
        .verify_url(&wire.msgsignature, &wire.timestamp, &wire.nonce, &wire.encrypt)
        .unwrap();
    assert_eq!(echoed, "echo-me-back");
}

#[test]
fn wire_body_parses_and_decrypts_through_json() {
    // Full wire trip: reply struct -> encrypted JSON body -> parsed
    // envelope -> recovered payload.
    let engine = engine(Some("bot-001"));
    let reply = StreamReply::new("s1", "chunk one", false);
    let body = engine.encrypt_stream_reply(&reply, "n2").unwrap();

    let wire: EncryptedEnvelope = serde_json::from_str(&body).unwrap();
    assert_eq!(wire.nonce, "n2");
    assert_eq!(
        wire.msgsignature,
        compute_signature(TOKEN, &wire.timestamp, &wire.nonce, &wire.encrypt)
    );

    let plaintext = engine
        .decrypt_message(&wire.msgsignature, &wire.timestamp, &wire.nonce, &wire.encrypt)
        .unwrap();
    assert_eq!(
        plaintext,
        r#"{"msgtype":"stream","stream":{"id":"s1","finish":false,"content":"chunk one"}}"#
    );
}

#[test]
fn foreign_receiver_id_is_a_uniform_decryption_failure() {
    let tenant_a = engine(Some("tenant-a"));
    let tenant_b = engine(Some("tenant-b"));

    let wire = tenant_a.encrypt_message("payload", "n1").unwrap();
    let err = tenant_b
        .decrypt_message(&wire.msgsignature, &wire.timestamp, &wire.nonce, &wire.encrypt)
        .unwrap_err();
    assert!(matches!(err, CallbackError::DecryptionFailed));
    assert_eq!(err.to_string(), "message decryption failed");
}

#[test]
fn rejection_reasons_share_one_error_message() {
    // Forged signature and tampered ciphertext must be indistinguishable
    // from the caller's side.
    let engine = engine(Some("bot-001"));
    let wire = engine.encrypt_message("payload", "n1").unwrap();

    let forged_sig = engine
        .decrypt_message("0badc0de", &wire.timestamp, &wire.nonce, &wire.encrypt)
        .unwrap_err();

    let mut tampered = wire.encrypt.clone().into_bytes();
    tampered[0] = if tampered[0] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();
    let bad_ciphertext = engine
        .decrypt_message(&wire.msgsignature, &wire.timestamp, &wire.nonce, &tampered)
        .unwrap_err();

    assert_eq!(forged_sig.to_string(), bad_ciphertext.to_string());
}

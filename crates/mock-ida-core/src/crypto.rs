//! Hashing, signing and encryption primitives
//!
//! - Token derivation: kyc tokens, partner specific user tokens (PSUT) and
//!   OTP challenge keys are base64url SHA3-256 digests.
//! - `KycSigner`: signs a claims document into a compact JWS.
//! - `KycEncrypter`: wraps a signed document for a relying party.
//! - `KycPackager`: signs and, when configured, encrypts.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::Serialize;
use sha3::{Digest, Sha3_256};
use std::sync::Arc;

use crate::error::{IdaError, Result};
use crate::types::KycDocument;

/// JWS algorithm name for Ed25519
const JWS_ALG: &str = "EdDSA";

/// base64url (no padding) SHA3-256 digest of `data`
pub fn b64_sha3(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(Sha3_256::digest(data))
}

/// Hash several values as distinct inputs
///
/// Each part is prefixed with its byte length, so ("ab", "c") and ("a", "bc")
/// never collide and no character inside a part is interpreted.
fn b64_sha3_parts(parts: &[&str]) -> String {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part.as_bytes());
    }
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Key under which an OTP challenge is kept pending
pub fn challenge_key(transaction_id: &str, individual_id: &str, otp: &str) -> String {
    b64_sha3_parts(&[transaction_id, individual_id, otp])
}

/// Derive the partner specific user token for an individual at a relying party
///
/// Pure function of its inputs: the same pair always yields the same token.
pub fn derive_psut(individual_id: &str, relying_party_id: &str) -> String {
    b64_sha3(format!("{}{}", individual_id, relying_party_id).as_bytes())
}

/// Mint a fresh, unguessable kyc token
pub fn generate_kyc_token() -> String {
    b64_sha3(uuid::Uuid::new_v4().to_string().as_bytes())
}

// =============================================================================
// Signing
// =============================================================================

/// Signing collaborator: claims document in, compact signed token out
pub trait KycSigner: Send + Sync {
    fn sign(&self, document: &KycDocument) -> Result<String>;
}

#[derive(Serialize)]
struct JwsHeader<'a> {
    alg: &'a str,
    typ: &'a str,
    kid: &'a str,
}

/// Ed25519 compact JWS signer
#[derive(Clone)]
pub struct JwsSigner {
    kid: String,
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl std::fmt::Debug for JwsSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwsSigner")
            .field("kid", &self.kid)
            .field("signing_key", &"[redacted]")
            .finish()
    }
}

impl JwsSigner {
    /// Generate a signer with a random key
    pub fn generate(kid: impl Into<String>) -> Self {
        Self::from_signing_key(kid, SigningKey::generate(&mut OsRng))
    }

    pub fn from_signing_key(kid: impl Into<String>, signing_key: SigningKey) -> Self {
        let verifying_key = signing_key.verifying_key();
        Self {
            kid: kid.into(),
            signing_key,
            verifying_key,
        }
    }

    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// Raw public key bytes (the JWK `x` parameter once base64url encoded)
    pub fn verifying_key_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }
}

impl KycSigner for JwsSigner {
    fn sign(&self, document: &KycDocument) -> Result<String> {
        let header = serde_json::to_vec(&JwsHeader {
            alg: JWS_ALG,
            typ: "JWT",
            kid: &self.kid,
        })?;
        let payload = serde_json::to_vec(document)?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let signature = self.signing_key.sign(signing_input.as_bytes());

        Ok(format!(
            "{}.{}",
            signing_input,
            URL_SAFE_NO_PAD.encode(signature.to_bytes())
        ))
    }
}

// =============================================================================
// Encryption
// =============================================================================

/// Encryption collaborator: signed token in, compact encrypted token out
pub trait KycEncrypter: Send + Sync {
    fn encrypt(&self, relying_party_id: &str, signed: &str) -> Result<String>;
}

/// Encrypter with no relying party key source
///
/// Relying party public keys are not registered anywhere in the mock, so
/// every encryption attempt fails with `EncryptionUnsupported`.
#[derive(Debug, Default, Clone)]
pub struct UnresolvedKeyEncrypter;

impl KycEncrypter for UnresolvedKeyEncrypter {
    fn encrypt(&self, relying_party_id: &str, _signed: &str) -> Result<String> {
        Err(IdaError::EncryptionUnsupported(relying_party_id.to_string()))
    }
}

/// Signs a claims document and encrypts it when configured
#[derive(Clone)]
pub struct KycPackager {
    signer: Arc<dyn KycSigner>,
    encrypter: Arc<dyn KycEncrypter>,
    encrypt: bool,
}

impl KycPackager {
    pub fn new(signer: Arc<dyn KycSigner>, encrypter: Arc<dyn KycEncrypter>, encrypt: bool) -> Self {
        Self {
            signer,
            encrypter,
            encrypt,
        }
    }

    /// Sign-only packager
    pub fn signing_only(signer: Arc<dyn KycSigner>) -> Self {
        Self::new(signer, Arc::new(UnresolvedKeyEncrypter), false)
    }

    pub fn encrypts(&self) -> bool {
        self.encrypt
    }

    pub fn package(&self, relying_party_id: &str, document: &KycDocument) -> Result<String> {
        let signed = self.signer.sign(document)?;
        if self.encrypt {
            self.encrypter.encrypt(relying_party_id, &signed)
        } else {
            Ok(signed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    fn decode_claims(signer: &JwsSigner, token: &str) -> jsonwebtoken::errors::Result<KycDocument> {
        let x = URL_SAFE_NO_PAD.encode(signer.verifying_key_bytes());
        let key = DecodingKey::from_ed_components(&x)?;
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        Ok(decode::<KycDocument>(token, &key, &validation)?.claims)
    }

    fn sample_document() -> KycDocument {
        let mut doc = KycDocument::new();
        doc.insert("sub".into(), serde_json::json!("psut-123"));
        doc.insert("name".into(), serde_json::json!("John"));
        doc
    }

    #[test]
    fn test_psut_is_deterministic() {
        let a = derive_psut("ind-1", "rp-x");
        let b = derive_psut("ind-1", "rp-x");
        let c = derive_psut("ind-1", "rp-y");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_psut_accepts_empty_relying_party() {
        // Relying party ids are not validated
        assert_eq!(derive_psut("ind", ""), b64_sha3(b"ind"));
        assert_ne!(derive_psut("ind", ""), derive_psut("ind", "rp"));
    }

    #[test]
    fn test_kyc_tokens_are_unique() {
        let a = generate_kyc_token();
        let b = generate_kyc_token();
        assert_ne!(a, b);
        // 32 byte digest, base64url without padding
        assert_eq!(a.len(), 43);
    }

    #[test]
    fn test_challenge_key_treats_inputs_as_opaque() {
        // Format-like characters in the transaction id are hashed verbatim
        let a = challenge_key("txn-%s-%s", "ind", "111111");
        let b = challenge_key("txn-%s-%s", "ind", "111111");
        assert_eq!(a, b);

        // Boundaries between inputs matter
        assert_ne!(challenge_key("ab", "c", "1"), challenge_key("a", "bc", "1"));
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = JwsSigner::generate("mock-ida-key");
        let token = signer.sign(&sample_document()).unwrap();

        assert_eq!(token.split('.').count(), 3);
        let claims = decode_claims(&signer, &token).unwrap();
        assert_eq!(claims, sample_document());
    }

    #[test]
    fn test_verification_fails_with_wrong_key() {
        let signer = JwsSigner::generate("key-1");
        let other = JwsSigner::generate("key-2");
        let token = signer.sign(&sample_document()).unwrap();

        assert!(decode_claims(&other, &token).is_err());
    }

    #[test]
    fn test_signer_debug_redacts_key() {
        let signer = JwsSigner::generate("key-1");
        let debug = format!("{:?}", signer);
        assert!(debug.contains("key-1"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn test_packager_without_encryption_returns_signed_document() {
        let signer = Arc::new(JwsSigner::generate("key-1"));
        let packager = KycPackager::signing_only(signer.clone());

        let kyc = packager.package("rp-1", &sample_document()).unwrap();
        assert_eq!(decode_claims(&signer, &kyc).unwrap(), sample_document());
    }

    #[test]
    fn test_packager_with_encryption_is_unsupported() {
        let packager = KycPackager::new(
            Arc::new(JwsSigner::generate("key-1")),
            Arc::new(UnresolvedKeyEncrypter),
            true,
        );

        let result = packager.package("rp-1", &sample_document());
        assert_eq!(
            result.unwrap_err(),
            IdaError::EncryptionUnsupported("rp-1".into())
        );
    }
}

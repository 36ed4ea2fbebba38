//! Claims policy engine
//!
//! Turns an identity record plus the claims and locales accepted by the user
//! into a flat claims document. Each claim name maps to a pure transform over
//! the identity record; transforms are kept in a registry so new claims can
//! be added without touching the dispatch.
//!
//! ## Locale resolution
//!
//! Only the first requested locale is used. Within it, every value whose
//! language tag equals or starts with the locale (case-insensitive) is
//! selected. With a single requested locale the output key is the bare claim
//! name; with several, each value is keyed `claim#languageTag`.

use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::error::ClaimsError;
use crate::types::{IdentityRecord, KycDocument, LanguageValue};

/// A claim transform: identity record and locale selection to claim entries
pub type ClaimTransform = fn(&IdentityRecord, &LocaleSelection) -> Result<KycDocument, ClaimsError>;

/// Locales requested for an exchange, after defaulting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSelection {
    locales: Vec<String>,
}

impl LocaleSelection {
    /// Use `requested`, or `default_language` alone when nothing was requested
    pub fn new(requested: &[String], default_language: &str) -> Self {
        let locales = if requested.is_empty() {
            vec![default_language.to_string()]
        } else {
            requested.to_vec()
        };
        Self { locales }
    }

    pub fn is_single_language(&self) -> bool {
        self.locales.len() == 1
    }

    /// The locale that is actually honoured
    pub fn primary(&self) -> &str {
        self.locales.first().map(String::as_str).unwrap_or_default()
    }

    /// Resolve per-locale values of `claim_name` into claim entries
    pub fn resolve(
        &self,
        claim_name: &str,
        values: Option<&[LanguageValue]>,
    ) -> Result<KycDocument, ClaimsError> {
        let mut entries = KycDocument::new();
        let Some(values) = values else {
            return Ok(entries);
        };

        let locale = self.primary().to_lowercase();
        for value in values.iter().filter(|v| matches_locale(&v.language, &locale)) {
            let key = if self.is_single_language() {
                claim_name.to_string()
            } else {
                format!("{}#{}", claim_name, value.language)
            };
            if entries.contains_key(&key) {
                return Err(ClaimsError::AmbiguousLocaleValue(key));
            }
            entries.insert(key, Value::String(value.value.clone()));
        }

        Ok(entries)
    }
}

fn matches_locale(language: &str, locale_lower: &str) -> bool {
    language.to_lowercase().starts_with(locale_lower)
}

fn scalar(claim_name: &str, value: Option<&str>) -> KycDocument {
    let mut entries = KycDocument::new();
    if let Some(value) = value {
        entries.insert(claim_name.to_string(), Value::String(value.to_string()));
    }
    entries
}

fn name_claim(identity: &IdentityRecord, locales: &LocaleSelection) -> Result<KycDocument, ClaimsError> {
    locales.resolve("name", identity.full_name.as_deref())
}

fn gender_claim(identity: &IdentityRecord, locales: &LocaleSelection) -> Result<KycDocument, ClaimsError> {
    locales.resolve("gender", identity.gender.as_deref())
}

fn birthdate_claim(identity: &IdentityRecord, _: &LocaleSelection) -> Result<KycDocument, ClaimsError> {
    Ok(scalar("birthdate", identity.date_of_birth.as_deref()))
}

fn email_claim(identity: &IdentityRecord, _: &LocaleSelection) -> Result<KycDocument, ClaimsError> {
    Ok(scalar("email", identity.email.as_deref()))
}

fn phone_number_claim(identity: &IdentityRecord, _: &LocaleSelection) -> Result<KycDocument, ClaimsError> {
    Ok(scalar("phone_number", identity.phone.as_deref()))
}

fn picture_claim(identity: &IdentityRecord, _: &LocaleSelection) -> Result<KycDocument, ClaimsError> {
    Ok(scalar("picture", identity.encoded_photo.as_deref()))
}

fn individual_id_claim(identity: &IdentityRecord, _: &LocaleSelection) -> Result<KycDocument, ClaimsError> {
    Ok(scalar("individual_id", Some(identity.individual_id.as_str()).filter(|id| !id.is_empty())))
}

fn address_claim(identity: &IdentityRecord, locales: &LocaleSelection) -> Result<KycDocument, ClaimsError> {
    let mut address = KycDocument::new();
    address.extend(locales.resolve("street_address", identity.street_address.as_deref())?);
    address.extend(locales.resolve("locality", identity.locality.as_deref())?);
    address.extend(locales.resolve("region", identity.region.as_deref())?);
    address.extend(scalar("postal_code", identity.postal_code.as_deref()));
    address.extend(locales.resolve("country", identity.country.as_deref())?);

    let mut entries = KycDocument::new();
    entries.insert("address".into(), Value::Object(address));
    Ok(entries)
}

/// Maps requested claim names to claim entries
#[derive(Clone)]
pub struct ClaimsPolicyEngine {
    default_language: String,
    transforms: HashMap<String, ClaimTransform>,
}

impl std::fmt::Debug for ClaimsPolicyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut claims: Vec<&String> = self.transforms.keys().collect();
        claims.sort();
        f.debug_struct("ClaimsPolicyEngine")
            .field("default_language", &self.default_language)
            .field("claims", &claims)
            .finish()
    }
}

impl ClaimsPolicyEngine {
    /// Create an engine with the standard claim set
    pub fn new(default_language: impl Into<String>) -> Self {
        let mut engine = Self {
            default_language: default_language.into(),
            transforms: HashMap::new(),
        };
        engine.register("name", name_claim);
        engine.register("gender", gender_claim);
        engine.register("birthdate", birthdate_claim);
        engine.register("email", email_claim);
        engine.register("phone_number", phone_number_claim);
        engine.register("address", address_claim);
        engine.register("picture", picture_claim);
        engine.register("individual_id", individual_id_claim);
        engine
    }

    fn register(&mut self, claim_name: impl Into<String>, transform: ClaimTransform) {
        self.transforms.insert(claim_name.into(), transform);
    }

    /// Build the claims document for the accepted claims
    ///
    /// Unknown claim names are skipped.
    pub fn build(
        &self,
        identity: &IdentityRecord,
        accepted_claims: &[String],
        claim_locales: &[String],
    ) -> Result<KycDocument, ClaimsError> {
        let locales = LocaleSelection::new(claim_locales, &self.default_language);
        let mut document = KycDocument::new();

        for claim in accepted_claims {
            match self.transforms.get(claim.as_str()) {
                Some(transform) => document.extend(transform(identity, &locales)?),
                None => debug!(claim = %claim, "Ignoring unsupported claim"),
            }
        }

        Ok(document)
    }
}

//! Profile: human-readable attributes attached to an ID.
//!
//! A profile may be signed. Signing serializes the public properties into
//! `data` (a JSON string) and stores the base64 signature of those bytes
//! in `signature`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::crypto::{PrivateKey, PublicKey};
use crate::entity::Identifier;
use crate::error::{IdentityError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "ID")]
    pub id: Identifier,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Fields this crate does not interpret, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    pub fn new(id: Identifier, names: Vec<String>) -> Self {
        Self {
            id,
            names,
            data: None,
            signature: None,
            extra: Map::new(),
        }
    }

    /// Display name: the first entry of `names`, else a string `name`
    /// field.
    pub fn name(&self) -> Option<&str> {
        self.names
            .first()
            .map(String::as_str)
            .or_else(|| self.extra.get("name").and_then(Value::as_str))
    }

    pub fn is_signed(&self) -> bool {
        self.data.is_some() && self.signature.is_some()
    }

    fn properties(&self) -> Map<String, Value> {
        let mut props = Map::new();
        props.insert("ID".to_string(), Value::String(self.id.to_string()));
        if let Some(name) = self.name() {
            props.insert("name".to_string(), Value::String(name.to_string()));
        }
        if let Some(avatar) = self.extra.get("avatar") {
            props.insert("avatar".to_string(), avatar.clone());
        }
        props
    }

    /// Sign the profile's public properties with `key`.
    pub fn sign(&mut self, key: &PrivateKey) -> Result<()> {
        let data = serde_json::to_string(&Value::Object(self.properties()))
            .map_err(|e| IdentityError::SerializationError(e.to_string()))?;
        let signature = key.sign_to_base64(data.as_bytes())?;
        self.data = Some(data);
        self.signature = Some(signature);
        log::debug!("signed profile for {}", self.id);
        Ok(())
    }

    /// Verify `signature` over `data` and that `data` names this profile's ID.
    pub fn verify(&self, key: &PublicKey) -> Result<()> {
        let (data, signature) = match (&self.data, &self.signature) {
            (Some(data), Some(signature)) => (data, signature),
            _ => return Err(IdentityError::InvalidProfile("profile is not signed".into())),
        };
        key.verify_base64(data.as_bytes(), signature)?;

        let props: Map<String, Value> = serde_json::from_str(data)
            .map_err(|e| IdentityError::InvalidProfile(format!("profile data: {e}")))?;
        match props.get("ID").and_then(Value::as_str) {
            Some(id) if id == self.id.to_string() => Ok(()),
            _ => Err(IdentityError::InvalidProfile(format!(
                "signed data does not belong to {}",
                self.id
            ))),
        }
    }
}

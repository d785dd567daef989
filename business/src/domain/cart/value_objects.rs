use std::sync::LazyLock;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of random bytes behind a cart hash. Encodes to 22 URL-safe characters.
const HASH_BYTES: usize = 16;

static HASH_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{22}$").expect("static cart hash pattern"));

/// Primary identifier of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(Uuid);

impl CartId {
    /// Generates a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Builds an identifier from external input.
    ///
    /// Malformed input yields `None`; callers treat it the same as an absent cart.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CartId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CartId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque random token used to share a cart without exposing its id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartHash(String);

impl CartHash {
    /// Generates a new URL-safe random token.
    pub fn generate() -> Self {
        let bytes: [u8; HASH_BYTES] = rand::random();
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Validates a token received from outside. Returns `None` when the format does not match.
    pub fn parse(raw: &str) -> Option<Self> {
        HASH_FORMAT.is_match(raw).then(|| Self(raw.to_string()))
    }

    /// Constructor for values already persisted in the repository (no validation).
    pub fn from_repository(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CartHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

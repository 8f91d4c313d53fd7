use std::fmt;

use rand::{Rng, RngCore};
use serde::Serialize;

/// Per-page-load visitor token shaped like a UUID v4. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VisitorId(String);

impl VisitorId {
    pub fn generate() -> Self { Self::generate_with(&mut rand::thread_rng()) }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        let id = uuid::Builder::from_random_bytes(bytes).into_uuid();
        Self(id.hyphenated().to_string())
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

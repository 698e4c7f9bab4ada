//! Opaque, format-specific metadata bag.
//!
//! Loaders put whatever header values they need here; the processing engine
//! never interprets it, only clears it on reset.

use serde_json::Value;
use std::collections::BTreeMap;

pub type Meta = BTreeMap<String, Value>;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Slot name a host uses to persist a value.
pub trait StorageKey {
    const KEY: &'static str;
}

/// JSON round-trip for stored values. Missing or corrupt blobs fall back to the default.
pub trait StoredOrDefault: StorageKey + Default + Serialize + DeserializeOwned {
    fn from_stored(blob: Option<&str>) -> Self {
        let Some(blob) = blob else {
            return Self::default();
        };
        match serde_json::from_str(blob) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Discarding stored `{}`: {}", Self::KEY, err);
                Self::default()
            }
        }
    }

    fn to_stored(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<T: StorageKey + Default + Serialize + DeserializeOwned> StoredOrDefault for T {}

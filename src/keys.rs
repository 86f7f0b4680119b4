//! Key metadata as seen by the decision engine. Secret material stays in the key store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::SiteOwned;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionKey {
    pub id: i32,
    pub site_id: i32,
    pub created: DateTime<Utc>,
    pub activates: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl EncryptionKey {
    pub fn new(id: i32, site_id: i32, created: DateTime<Utc>, activates: DateTime<Utc>, expires: DateTime<Utc>) -> Self {
        Self { id, site_id, created, activates, expires }
    }
}

impl SiteOwned for EncryptionKey {
    fn site_id(&self) -> i32 { self.site_id }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn owning_site_comes_from_metadata() {
        let now = Utc::now();
        let k = EncryptionKey::new(1, 5, now, now, now + Duration::hours(1));
        assert_eq!(SiteOwned::site_id(&k), 5);
        let text = serde_json::to_string(&k).unwrap();
        assert_eq!(serde_json::from_str::<EncryptionKey>(&text).unwrap(), k);
    }
}

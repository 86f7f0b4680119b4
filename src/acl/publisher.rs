//! Holder for the current ACL snapshot. Refresh builds a new snapshot and swaps it in;
//! readers take a clone (which shares the map) and decide without holding the lock.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::info;

use super::snapshot::AclSnapshot;

#[derive(Debug, Default)]
pub struct AclSnapshotPublisher {
    current: RwLock<AclSnapshot>,
    version: AtomicU64,
}

impl AclSnapshotPublisher {
    pub fn new(initial: AclSnapshot) -> Self {
        Self { current: RwLock::new(initial), version: AtomicU64::new(1) }
    }

    pub fn current(&self) -> AclSnapshot { self.current.read().clone() }

    /// Bumped on every publish; 0 means nothing was ever published.
    pub fn version(&self) -> u64 { self.version.load(Ordering::Acquire) }

    /// Replace the current snapshot and return the new version.
    pub fn publish(&self, snapshot: AclSnapshot) -> u64 {
        let sites = snapshot.len();
        let version = {
            let mut w = self.current.write();
            *w = snapshot;
            self.version.fetch_add(1, Ordering::AcqRel) + 1
        };
        info!(target: "keyauthz::acl", version, sites, "published acl snapshot");
        version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::acl::{EncryptionKeyAcl, LegacyFallback};
    use crate::identity::{SiteOwned, SitePrincipal};

    struct P(i32);
    impl SitePrincipal for P { fn site_id(&self) -> Option<i32> { Some(self.0) } }
    struct K(i32);
    impl SiteOwned for K { fn site_id(&self) -> i32 { self.0 } }

    #[test]
    fn readers_keep_their_snapshot_across_publish() {
        let publisher = AclSnapshotPublisher::default();
        assert_eq!(publisher.version(), 0);
        assert!(publisher.current().is_empty());

        let v1 = publisher.publish([(5, EncryptionKeyAcl::allow_list([7]))].into_iter().collect());
        assert_eq!(v1, 1);
        let held = publisher.current();

        let v2 = publisher.publish([(5, EncryptionKeyAcl::allow_list([]))].into_iter().collect());
        assert_eq!(v2, 2);

        assert!(held.can_access_key(&P(7), &K(5), LegacyFallback::DefaultDeny).unwrap());
        assert!(!publisher.current().can_access_key(&P(7), &K(5), LegacyFallback::DefaultDeny).unwrap());
        // a held snapshot still shares the map it was published with
        assert_eq!(held.all_acls().get(&5), Some(&EncryptionKeyAcl::allow_list([7])));
        assert_ne!(held, publisher.current());
    }

    #[test]
    fn concurrent_readers_see_whole_snapshots() {
        let publisher = Arc::new(AclSnapshotPublisher::new(AclSnapshot::empty()));
        let writer = {
            let p = publisher.clone();
            std::thread::spawn(move || {
                for i in 0..200 {
                    let allowed: Vec<i32> = (0..=i % 10).collect();
                    p.publish([(1, EncryptionKeyAcl::allow_list(allowed.clone())), (2, EncryptionKeyAcl::allow_list(allowed))].into_iter().collect());
                }
            })
        };
        for _ in 0..200 {
            let snap = publisher.current();
            if let (Some(a), Some(b)) = (snap.acl_for_site(1), snap.acl_for_site(2)) {
                assert_eq!(a, b);
            }
        }
        writer.join().unwrap();
        assert_eq!(publisher.version(), 201);
    }
}

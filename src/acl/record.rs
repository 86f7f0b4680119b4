use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Per-site rule on which other sites may read this site's keys.
/// Allow-list: only listed sites. Block-list: everyone except listed sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionKeyAcl {
    is_allow_list: bool,
    #[serde(default)]
    access_list: BTreeSet<i32>,
}

impl EncryptionKeyAcl {
    pub fn new(is_allow_list: bool, access_list: impl IntoIterator<Item = i32>) -> Self {
        Self { is_allow_list, access_list: access_list.into_iter().collect() }
    }
    pub fn allow_list(sites: impl IntoIterator<Item = i32>) -> Self { Self::new(true, sites) }
    pub fn block_list(sites: impl IntoIterator<Item = i32>) -> Self { Self::new(false, sites) }

    pub fn is_allow_list(&self) -> bool { self.is_allow_list }
    pub fn access_list(&self) -> &BTreeSet<i32> { &self.access_list }

    pub fn can_be_accessed_by_site(&self, site_id: i32) -> bool {
        self.access_list.contains(&site_id) == self.is_allow_list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_admits_only_members() {
        let acl = EncryptionKeyAcl::allow_list([7, 8]);
        assert!(acl.can_be_accessed_by_site(7));
        assert!(acl.can_be_accessed_by_site(8));
        assert!(!acl.can_be_accessed_by_site(9));
    }

    #[test]
    fn block_list_admits_everyone_else() {
        let acl = EncryptionKeyAcl::block_list([9]);
        assert!(!acl.can_be_accessed_by_site(9));
        assert!(acl.can_be_accessed_by_site(7));
    }

    #[test]
    fn empty_lists() {
        assert!(!EncryptionKeyAcl::allow_list([]).can_be_accessed_by_site(1));
        assert!(EncryptionKeyAcl::block_list([]).can_be_accessed_by_site(1));
    }
}

use super::*;

struct Site(Option<i32>);
impl SitePrincipal for Site {
    fn site_id(&self) -> Option<i32> { self.0 }
}

struct Key(i32);
impl SiteOwned for Key {
    fn site_id(&self) -> i32 { self.0 }
}

fn five_allows_seven() -> AclSnapshot {
    [(5, EncryptionKeyAcl::allow_list([7]))].into_iter().collect()
}

#[test]
fn acl_allow_and_deny() {
    let snap = five_allows_seven();
    assert!(snap.can_access_key(&Site(Some(7)), &Key(5), LegacyFallback::DefaultDeny).unwrap());
    assert!(!snap.can_access_key(&Site(Some(9)), &Key(5), LegacyFallback::DefaultAllow).unwrap());
}

#[test]
fn same_site_bypasses_acl() {
    // Site 5 is absent from its own allow-list.
    let snap = five_allows_seven();
    let d = snap.decide(&Site(Some(5)), &Key(5), LegacyFallback::DefaultDeny).unwrap();
    assert!(d.allow);
    assert_eq!(d.reason, DecisionReason::SameSite);

    let blocks_self: AclSnapshot = [(5, EncryptionKeyAcl::block_list([5]))].into_iter().collect();
    assert!(blocks_self.can_access_key(&Site(Some(5)), &Key(5), LegacyFallback::DefaultDeny).unwrap());
    assert!(AclSnapshot::empty().can_access_key(&Site(Some(5)), &Key(5), LegacyFallback::DefaultDeny).unwrap());
}

#[test]
fn missing_acl_uses_fallback() {
    let snap = five_allows_seven();
    let allow = snap.decide(&Site(Some(7)), &Key(12), LegacyFallback::DefaultAllow).unwrap();
    assert_eq!(allow, AccessDecision { allow: true, reason: DecisionReason::NoAclFallback });
    assert!(!snap.can_access_key(&Site(Some(7)), &Key(12), LegacyFallback::DefaultDeny).unwrap());
}

#[test]
fn principal_without_site_is_invalid() {
    let err = five_allows_seven().can_access_key(&Site(None), &Key(5), LegacyFallback::DefaultAllow).unwrap_err();
    assert_eq!(err.code_str(), "invalid_argument");
}

#[test]
fn all_acls_exposes_contents() {
    let snap = five_allows_seven();
    assert_eq!(snap.len(), 1);
    assert!(!snap.is_empty());
    assert_eq!(snap.all_acls().get(&5), Some(&EncryptionKeyAcl::allow_list([7])));
    assert!(snap.acl_for_site(12).is_none());
}

#[test]
fn fallback_parsing() {
    assert_eq!("allow".parse::<LegacyFallback>().unwrap(), LegacyFallback::DefaultAllow);
    assert_eq!("DEFAULT_DENY".parse::<LegacyFallback>().unwrap(), LegacyFallback::DefaultDeny);
    assert!("maybe".parse::<LegacyFallback>().is_err());
    assert_eq!(LegacyFallback::default(), LegacyFallback::DefaultAllow);
}

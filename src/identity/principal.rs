//! Seams between the decision engine and whatever principal/key types the host store loads.

/// A principal that belongs to a site. `None` only before the site store assigns one.
pub trait SitePrincipal {
    fn site_id(&self) -> Option<i32>;
}

/// A resource owned by exactly one site.
pub trait SiteOwned {
    fn site_id(&self) -> i32;
}

/// Capability query over a role tag type.
pub trait RoleAuthorizable<R> {
    fn has_role(&self, role: R) -> bool;
}

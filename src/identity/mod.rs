//! Operator principals and their role model.
//! Keep the public surface thin and split implementation across sub-modules.

mod principal;
mod role;
mod operator;
mod record;

pub use principal::{RoleAuthorizable, SiteOwned, SitePrincipal};
pub use role::{normalize_roles, Role, RoleSet};
pub use operator::{OperatorKey, OperatorType};

use crate::domain::entities::Caller;

/// Decides whether a caller may trigger privileged commands
pub trait Authorizer: Send + Sync {
    fn is_authorized(&self, caller: &Caller) -> bool;
}

/// Single configured administrator. An id of 0 disables admin access entirely,
/// it never matches a caller whose id happens to be 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminAuthorizer {
    admin_id: i64,
}

impl AdminAuthorizer {
    pub fn new(admin_id: i64) -> Self {
        Self { admin_id }
    }

    pub fn is_admin(&self, caller_id: i64) -> bool {
        self.admin_id != 0 && caller_id == self.admin_id
    }

    pub fn is_enabled(&self) -> bool {
        self.admin_id != 0
    }
}

impl Authorizer for AdminAuthorizer {
    fn is_authorized(&self, caller: &Caller) -> bool {
        self.is_admin(caller.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_configured_admin_only() {
        let auth = AdminAuthorizer::new(42);
        assert!(auth.is_admin(42));
        assert!(!auth.is_admin(7));
        assert!(!auth.is_admin(0));
        assert!(auth.is_authorized(&Caller::new(42)));
        assert!(!auth.is_authorized(&Caller::new(-42)));
    }

    #[test]
    fn test_zero_admin_disables_everyone() {
        let auth = AdminAuthorizer::new(0);
        assert!(!auth.is_enabled());
        assert!(!auth.is_admin(0));
        assert!(!auth.is_admin(42));
        assert!(!auth.is_authorized(&Caller::new(0)));
    }
}

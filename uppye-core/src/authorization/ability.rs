use std::collections::HashSet;

use crate::authorization::permission::{Action, ResourceKind};
use crate::authorization::tenant::{InstitutionSubRole, TenantContext};
use crate::identity::Role;

/// The allow matrix of one principal for one request.
///
/// Built by [`resolve_capabilities`], consulted through [`CapabilitySet::can`]
/// and dropped when the request completes. Holding one across requests
/// would freeze membership facts that may change at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    grants: HashSet<(Action, ResourceKind)>,
}

impl CapabilitySet {
    /// An empty set that denies every query.
    pub fn deny_all() -> Self {
        Self::default()
    }

    fn grant(&mut self, action: Action, resource: ResourceKind) {
        self.grants.insert((action, resource));
    }

    /// Exact-match lookup with a single wildcard: `(manage, all)`
    /// satisfies any query. No other grant implies another.
    pub fn can(&self, action: Action, resource: ResourceKind) -> bool {
        if self.grants.contains(&(Action::Manage, ResourceKind::All)) {
            return true;
        }
        self.grants.contains(&(action, resource))
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Grants in no particular order.
    pub fn grants(&self) -> impl Iterator<Item = &(Action, ResourceKind)> {
        self.grants.iter()
    }
}

/// Compute the capability set for a role under the given tenant facts.
///
/// Pure and total: every role and sub-role combination maps to a set,
/// combinations without explicit grants resolve to deny-all.
pub fn resolve_capabilities(role: Role, ctx: &TenantContext) -> CapabilitySet {
    let mut set = CapabilitySet::deny_all();

    match role {
        Role::Admin => {
            set.grant(Action::Manage, ResourceKind::All);
        }
        Role::InstitutionMember => match ctx.institution_sub_role {
            Some(InstitutionSubRole::Admin) => {
                set.grant(Action::Manage, ResourceKind::Institution);
                set.grant(Action::Create, ResourceKind::Classroom);
                set.grant(Action::Read, ResourceKind::Classroom);
                set.grant(Action::Manage, ResourceKind::User);
            }
            Some(InstitutionSubRole::Secretary) => {
                set.grant(Action::Read, ResourceKind::Classroom);
                set.grant(Action::Read, ResourceKind::User);
            }
            Some(InstitutionSubRole::Finance) => {
                set.grant(Action::Read, ResourceKind::Institution);
            }
            // Staff without a sub-role get an explicit deny-all set.
            None => {}
        },
        Role::Teacher => {
            set.grant(Action::Read, ResourceKind::Classroom);
            set.grant(Action::Read, ResourceKind::Activity);
            set.grant(Action::Create, ResourceKind::Activity);
            if ctx.is_linked_to_institution || ctx.remaining_classroom_quota {
                set.grant(Action::Create, ResourceKind::Classroom);
            }
        }
        Role::Student => {
            set.grant(Action::Read, ResourceKind::Classroom);
            set.grant(Action::Read, ResourceKind::Activity);
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff_ctx(sub_role: Option<InstitutionSubRole>) -> TenantContext {
        TenantContext {
            institution_sub_role: sub_role,
            ..TenantContext::default()
        }
    }

    fn teacher_ctx(is_linked: bool, quota: bool) -> TenantContext {
        TenantContext {
            institution_sub_role: None,
            is_linked_to_institution: is_linked,
            remaining_classroom_quota: quota,
        }
    }

    #[test]
    fn test_admin_wildcard_allows_everything() {
        let set = resolve_capabilities(Role::Admin, &TenantContext::default());

        for action in Action::all() {
            for resource in ResourceKind::all() {
                assert!(
                    set.can(action, resource),
                    "admin denied {} on {}",
                    action.as_str(),
                    resource.as_str()
                );
            }
        }
    }

    #[test]
    fn test_student_reads_but_never_writes() {
        let set = resolve_capabilities(Role::Student, &TenantContext::default());

        assert!(set.can(Action::Read, ResourceKind::Classroom));
        assert!(set.can(Action::Read, ResourceKind::Activity));

        assert!(!set.can(Action::Create, ResourceKind::Classroom));
        for resource in ResourceKind::all() {
            assert!(!set.can(Action::Update, resource));
            assert!(!set.can(Action::Delete, resource));
        }
    }

    #[test]
    fn test_institution_admin_grants() {
        let set = resolve_capabilities(
            Role::InstitutionMember,
            &staff_ctx(Some(InstitutionSubRole::Admin)),
        );

        assert!(set.can(Action::Manage, ResourceKind::Institution));
        assert!(set.can(Action::Create, ResourceKind::Classroom));
        assert!(set.can(Action::Read, ResourceKind::Classroom));
        assert!(set.can(Action::Manage, ResourceKind::User));

        // Grants are exact matches: manage on a single resource kind is
        // not a wildcard for other actions on it.
        assert!(!set.can(Action::Read, ResourceKind::User));
        assert!(!set.can(Action::Delete, ResourceKind::Classroom));
    }

    #[test]
    fn test_secretary_and_finance_partition() {
        let secretary = resolve_capabilities(
            Role::InstitutionMember,
            &staff_ctx(Some(InstitutionSubRole::Secretary)),
        );
        assert!(secretary.can(Action::Read, ResourceKind::Classroom));
        assert!(secretary.can(Action::Read, ResourceKind::User));
        assert!(!secretary.can(Action::Manage, ResourceKind::Institution));
        assert!(!secretary.can(Action::Read, ResourceKind::Institution));

        let finance = resolve_capabilities(
            Role::InstitutionMember,
            &staff_ctx(Some(InstitutionSubRole::Finance)),
        );
        assert!(finance.can(Action::Read, ResourceKind::Institution));
        assert!(!finance.can(Action::Read, ResourceKind::Classroom));
        assert!(!finance.can(Action::Manage, ResourceKind::Classroom));
        assert!(!finance.can(Action::Read, ResourceKind::User));
        assert!(!finance.can(Action::Manage, ResourceKind::User));
    }

    #[test]
    fn test_staff_without_sub_role_is_denied_everything() {
        let set = resolve_capabilities(Role::InstitutionMember, &staff_ctx(None));

        assert!(set.is_empty());
        for action in Action::all() {
            for resource in ResourceKind::all() {
                assert!(!set.can(action, resource));
            }
        }
    }

    #[test]
    fn test_teacher_classroom_creation_gating() {
        // Denied only when both the linkage and the quota flag are off.
        let denied = resolve_capabilities(Role::Teacher, &teacher_ctx(false, false));
        assert!(!denied.can(Action::Create, ResourceKind::Classroom));

        for (is_linked, quota) in [(true, false), (false, true), (true, true)] {
            let granted = resolve_capabilities(Role::Teacher, &teacher_ctx(is_linked, quota));
            assert!(
                granted.can(Action::Create, ResourceKind::Classroom),
                "teacher with is_linked={} quota={} should create classrooms",
                is_linked,
                quota
            );
        }
    }

    #[test]
    fn test_teacher_base_grants_are_unconditional() {
        for ctx in [teacher_ctx(false, false), teacher_ctx(true, true)] {
            let set = resolve_capabilities(Role::Teacher, &ctx);
            assert!(set.can(Action::Read, ResourceKind::Classroom));
            assert!(set.can(Action::Read, ResourceKind::Activity));
            assert!(set.can(Action::Create, ResourceKind::Activity));
            assert!(!set.can(Action::Manage, ResourceKind::Classroom));
        }
    }
}

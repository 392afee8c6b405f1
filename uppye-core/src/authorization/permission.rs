use serde::{Deserialize, Serialize};

/// Actions a principal can perform on a resource kind.
///
/// Grants are checked as exact (action, resource) pairs. `Manage` is not
/// a per-resource wildcard; the only wildcard pair is `(manage, all)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Manage,
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    /// Get all actions in display order
    pub fn all() -> Vec<Action> {
        vec![
            Action::Manage,
            Action::Create,
            Action::Read,
            Action::Update,
            Action::Delete,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Manage => "manage",
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// Parse from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Action> {
        match s.to_lowercase().as_str() {
            "manage" => Some(Action::Manage),
            "create" => Some(Action::Create),
            "read" => Some(Action::Read),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            _ => None,
        }
    }
}

/// The resource kinds the platform knows about. `All` is the wildcard
/// granted to platform admins.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    All,
    Institution,
    User,
    Classroom,
    Activity,
    Invite,
}

impl ResourceKind {
    /// Get all resource kinds in display order
    pub fn all() -> Vec<ResourceKind> {
        vec![
            ResourceKind::All,
            ResourceKind::Institution,
            ResourceKind::User,
            ResourceKind::Classroom,
            ResourceKind::Activity,
            ResourceKind::Invite,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::All => "all",
            ResourceKind::Institution => "institution",
            ResourceKind::User => "user",
            ResourceKind::Classroom => "classroom",
            ResourceKind::Activity => "activity",
            ResourceKind::Invite => "invite",
        }
    }

    /// Parse from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<ResourceKind> {
        match s.to_lowercase().as_str() {
            "all" => Some(ResourceKind::All),
            "institution" => Some(ResourceKind::Institution),
            "user" => Some(ResourceKind::User),
            "classroom" => Some(ResourceKind::Classroom),
            "activity" => Some(ResourceKind::Activity),
            "invite" => Some(ResourceKind::Invite),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_round_trips_through_strings() {
        for action in Action::all() {
            assert_eq!(Action::from_str(action.as_str()), Some(action));
        }
        assert_eq!(Action::from_str("approve"), None);
    }

    #[test]
    fn test_resource_kind_round_trips_through_strings() {
        for kind in ResourceKind::all() {
            assert_eq!(ResourceKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(ResourceKind::from_str("grade"), None);
    }
}

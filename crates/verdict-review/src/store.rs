//! Queryable universes for model-reference choices
//!
//! Choices that wrap references to users, groups or repositories need to
//! enumerate the valid values a condition may store. The universe depends on
//! who is asking: validation lookups (configuration UIs) see only what the
//! acting user may choose from, while matching lookups are scoped by tenant
//! alone, since matching runs against already-existing data.

use verdict_core::Lookup;

use crate::error::StoreError;

/// Tenant scoping handle for store lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteScope {
    /// The global site
    Global,
    /// A named local site
    Site(String),
}

impl SiteScope {
    fn matches(&self, record_site: &Option<String>) -> bool {
        match self {
            SiteScope::Global => record_site.is_none(),
            SiteScope::Site(name) => record_site.as_deref() == Some(name),
        }
    }
}

/// Backing store for queryable choice universes
pub trait ReviewDataStore: Send + Sync {
    /// Usernames visible under `scope` for this lookup
    fn usernames(&self, scope: &SiteScope, lookup: &Lookup) -> Result<Vec<String>, StoreError>;

    /// Group names visible under `scope` for this lookup
    fn group_names(&self, scope: &SiteScope, lookup: &Lookup) -> Result<Vec<String>, StoreError>;

    /// Repository names visible under `scope` for this lookup
    fn repository_names(
        &self,
        scope: &SiteScope,
        lookup: &Lookup,
    ) -> Result<Vec<String>, StoreError>;
}

#[derive(Debug, Clone)]
struct UserRecord {
    username: String,
    site: Option<String>,
}

#[derive(Debug, Clone)]
struct GroupRecord {
    name: String,
    site: Option<String>,
    invite_only: bool,
    members: Vec<String>,
}

#[derive(Debug, Clone)]
struct RepositoryRecord {
    name: String,
    site: Option<String>,
}

/// In-memory review data store
///
/// Suitable for tests and small deployments. Invite-only groups are hidden
/// from validation lookups unless the acting user is a member; matching
/// lookups see every group in scope.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewStore {
    users: Vec<UserRecord>,
    groups: Vec<GroupRecord>,
    repositories: Vec<RepositoryRecord>,
}

impl InMemoryReviewStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a user
    pub fn with_user(mut self, username: impl Into<String>, site: Option<&str>) -> Self {
        self.users.push(UserRecord {
            username: username.into(),
            site: site.map(String::from),
        });
        self
    }

    /// Builder method to add a group
    pub fn with_group(
        mut self,
        name: impl Into<String>,
        site: Option<&str>,
        invite_only: bool,
        members: &[&str],
    ) -> Self {
        self.groups.push(GroupRecord {
            name: name.into(),
            site: site.map(String::from),
            invite_only,
            members: members.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    /// Builder method to add a repository
    pub fn with_repository(mut self, name: impl Into<String>, site: Option<&str>) -> Self {
        self.repositories.push(RepositoryRecord {
            name: name.into(),
            site: site.map(String::from),
        });
        self
    }
}

impl ReviewDataStore for InMemoryReviewStore {
    fn usernames(&self, scope: &SiteScope, _lookup: &Lookup) -> Result<Vec<String>, StoreError> {
        Ok(self
            .users
            .iter()
            .filter(|u| scope.matches(&u.site))
            .map(|u| u.username.clone())
            .collect())
    }

    fn group_names(&self, scope: &SiteScope, lookup: &Lookup) -> Result<Vec<String>, StoreError> {
        Ok(self
            .groups
            .iter()
            .filter(|g| scope.matches(&g.site))
            .filter(|g| match lookup {
                Lookup::Matching => true,
                Lookup::Validation { acting_user } => {
                    !g.invite_only || g.members.iter().any(|m| m == acting_user)
                }
            })
            .map(|g| g.name.clone())
            .collect())
    }

    fn repository_names(
        &self,
        scope: &SiteScope,
        _lookup: &Lookup,
    ) -> Result<Vec<String>, StoreError> {
        Ok(self
            .repositories
            .iter()
            .filter(|r| scope.matches(&r.site))
            .map(|r| r.name.clone())
            .collect())
    }
}

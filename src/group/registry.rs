//! Group registry: groups, their members and the membership index.

use std::collections::HashMap;

use serde::Serialize;

use crate::{DriveError, Result};

use super::code::CodeGenerator;

/// Default number of code candidates tried before giving up.
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 16;

/// A named group sharing a file namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Unique 6-character group code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Members in join order. The first member is the admin.
    pub members: Vec<String>,
}

impl Group {
    /// The admin (creator) of the group, if any member is left.
    pub fn admin(&self) -> Option<&str> {
        self.members.first().map(String::as_str)
    }

    /// Whether `username` is a member.
    pub fn is_member(&self, username: &str) -> bool {
        self.members.iter().any(|m| m == username)
    }
}

/// Outcome of removing a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    /// The member left (or was never there); the group still has members.
    Left,
    /// The last member left and the group was destroyed.
    GroupDestroyed,
}

/// In-memory registry of groups and of which groups each user belongs to.
///
/// The registry itself holds no locks; callers serialize access.
#[derive(Debug)]
pub struct GroupRegistry {
    groups: HashMap<String, Group>,
    memberships: HashMap<String, Vec<String>>,
    max_code_attempts: usize,
}

impl GroupRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
            memberships: HashMap::new(),
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }

    /// Set how many code candidates `create_group` tries.
    pub fn with_max_code_attempts(mut self, attempts: usize) -> Self {
        self.max_code_attempts = attempts.max(1);
        self
    }

    /// Create a group with `creator` as its first member.
    pub fn create_group(
        &mut self,
        name: &str,
        creator: &str,
        codes: &dyn CodeGenerator,
    ) -> Result<Group> {
        self.create_group_where(name, creator, codes, |_| true)
    }

    /// Create a group, also skipping codes for which `is_free` is false.
    pub fn create_group_where(
        &mut self,
        name: &str,
        creator: &str,
        codes: &dyn CodeGenerator,
        is_free: impl Fn(&str) -> bool,
    ) -> Result<Group> {
        let name = name.trim();
        let creator = creator.trim();
        if name.is_empty() {
            return Err(DriveError::Validation("groupName is required".to_string()));
        }
        if creator.is_empty() {
            return Err(DriveError::Validation("username is required".to_string()));
        }

        let code = self.unused_code(codes, &is_free)?;
        let group = Group {
            code: code.clone(),
            name: name.to_string(),
            members: vec![creator.to_string()],
        };
        self.groups.insert(code.clone(), group.clone());
        self.index_add(creator, &code);

        Ok(group)
    }

    fn unused_code(
        &self,
        codes: &dyn CodeGenerator,
        is_free: &dyn Fn(&str) -> bool,
    ) -> Result<String> {
        for _ in 0..self.max_code_attempts {
            let candidate = codes.generate();
            if !self.groups.contains_key(&candidate) && is_free(&candidate) {
                return Ok(candidate);
            }
            tracing::debug!(code = %candidate, "Group code collision, retrying");
        }
        Err(DriveError::Config(format!(
            "no unused group code after {} attempts",
            self.max_code_attempts
        )))
    }

    /// Look up a group by code.
    pub fn get(&self, code: &str) -> Option<&Group> {
        self.groups.get(code)
    }

    /// Whether a group with this code exists.
    pub fn contains(&self, code: &str) -> bool {
        self.groups.contains_key(code)
    }

    /// Number of live groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Join a group. Joining twice is a no-op.
    pub fn join_group(&mut self, code: &str, username: &str) -> Result<Group> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DriveError::Validation("username is required".to_string()));
        }

        let group = self
            .groups
            .get_mut(code)
            .ok_or_else(DriveError::group_not_found)?;
        if !group.is_member(username) {
            group.members.push(username.to_string());
        }
        let group = group.clone();
        self.index_add(username, code);

        Ok(group)
    }

    /// Leave a group. Leaving a group one is not in is a no-op.
    ///
    /// When the last member leaves, the group is destroyed and its code freed.
    pub fn leave_group(&mut self, code: &str, username: &str) -> Result<Departure> {
        let username = username.trim();
        let group = self
            .groups
            .get_mut(code)
            .ok_or_else(DriveError::group_not_found)?;
        group.members.retain(|m| m != username);
        let emptied = group.members.is_empty();
        self.index_remove(username, code);

        if emptied {
            self.groups.remove(code);
            return Ok(Departure::GroupDestroyed);
        }
        Ok(Departure::Left)
    }

    /// Remove `member` on behalf of `requester`.
    ///
    /// Only the admin may kick, and never themselves.
    pub fn kick_member(&mut self, code: &str, member: &str, requester: &str) -> Result<Departure> {
        let member = member.trim();
        let requester = requester.trim();
        let group = self.groups.get(code).ok_or_else(DriveError::group_not_found)?;

        if group.admin() != Some(requester) {
            return Err(DriveError::Permission(
                "only the group admin can kick members".to_string(),
            ));
        }
        if member == requester {
            return Err(DriveError::Permission(
                "the group admin cannot kick themselves".to_string(),
            ));
        }

        self.leave_group(code, member)
    }

    /// Groups `username` belongs to, in the order they were joined.
    pub fn groups_for_user(&self, username: &str) -> Vec<Group> {
        self.memberships
            .get(username)
            .map(|codes| {
                codes
                    .iter()
                    .filter_map(|code| self.groups.get(code).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn index_add(&mut self, username: &str, code: &str) {
        let codes = self.memberships.entry(username.to_string()).or_default();
        if !codes.iter().any(|c| c == code) {
            codes.push(code.to_string());
        }
    }

    fn index_remove(&mut self, username: &str, code: &str) {
        if let Some(codes) = self.memberships.get_mut(username) {
            codes.retain(|c| c != code);
            if codes.is_empty() {
                self.memberships.remove(username);
            }
        }
    }
}

impl Default for GroupRegistry {
    fn default() -> Self {
        Self::new()
    }
}

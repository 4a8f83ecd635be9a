use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user referenced by task assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A task assignment that may or may not carry the full user record.
///
/// Fetched records reference users either by bare id or as an embedded
/// object; the variant makes the difference explicit so render code never
/// has to branch on shape. Ids are upgraded once, against the
/// [`UserDirectory`], before layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Assignee {
    Resolved(User),
    Unresolved(Uuid),
}

impl Assignee {
    /// Display name, once resolved.
    pub fn name(&self) -> Option<&str> {
        match self {
            Assignee::Resolved(user) => Some(&user.name),
            Assignee::Unresolved(_) => None,
        }
    }

    /// Upgrade a bare id to the full user record when the directory knows it.
    pub fn resolve(&mut self, directory: &UserDirectory) {
        if let Assignee::Unresolved(id) = self {
            if let Some(user) = directory.get(*id) {
                *self = Assignee::Resolved(user.clone());
            }
        }
    }
}

/// Lookup table of known users, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<Uuid, User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&User> {
        self.users.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: None,
        }
    }

    #[test]
    fn resolve_upgrades_known_ids_only() {
        let alice = user("Alice");
        let directory = UserDirectory::new(vec![alice.clone()]);

        let mut known = Assignee::Unresolved(alice.id);
        known.resolve(&directory);
        assert_eq!(known, Assignee::Resolved(alice));

        let stranger = Uuid::new_v4();
        let mut unknown = Assignee::Unresolved(stranger);
        unknown.resolve(&directory);
        assert_eq!(unknown, Assignee::Unresolved(stranger));
    }

    #[test]
    fn assignee_deserializes_from_id_or_object() {
        let bare: Assignee = serde_json::from_str(
            "\"9f8a2d6e-1c3b-4e5f-8a7b-0c1d2e3f4a5b\"",
        )
        .unwrap();
        assert!(matches!(bare, Assignee::Unresolved(_)));

        let embedded: Assignee = serde_json::from_str(
            "{\"id\":\"9f8a2d6e-1c3b-4e5f-8a7b-0c1d2e3f4a5b\",\"name\":\"Alice\"}",
        )
        .unwrap();
        assert_eq!(embedded.name(), Some("Alice"));
    }
}

//! Menu domain models.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A single navigation entry. Root entries carry no parent id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub id: String,
    pub caption: String,
    pub route: Option<String>,
    pub icon: Option<String>,
    pub parent_id: Option<String>,
}

impl MenuEntry {
    pub fn new(id: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            caption: caption.into(),
            route: None,
            icon: None,
            parent_id: None,
        }
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Flat, ordered menu. Built once, read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MenuData {
    entries: Vec<MenuEntry>,
}

impl MenuData {
    pub fn builder() -> MenuDataBuilder {
        MenuDataBuilder::default()
    }

    /// Entries without a parent, in insertion order.
    pub fn root_items(&self) -> Vec<&MenuEntry> {
        self.entries.iter().filter(|e| e.is_root()).collect()
    }

    /// Entries whose parent is `parent`, in insertion order.
    pub fn child_items(&self, parent: &MenuEntry) -> Vec<&MenuEntry> {
        self.entries
            .iter()
            .filter(|e| e.parent_id.as_deref() == Some(parent.id.as_str()))
            .collect()
    }

    pub fn has_children(&self, parent: &MenuEntry) -> bool {
        self.entries
            .iter()
            .any(|e| e.parent_id.as_deref() == Some(parent.id.as_str()))
    }

    pub fn find(&self, id: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nested view of the menu, roots first.
    pub fn tree(&self) -> Vec<MenuNode> {
        self.root_items()
            .into_iter()
            .map(|root| self.node_for(root))
            .collect()
    }

    fn node_for(&self, entry: &MenuEntry) -> MenuNode {
        MenuNode {
            id: entry.id.clone(),
            caption: entry.caption.clone(),
            route: entry.route.clone(),
            icon: entry.icon.clone(),
            children: self
                .child_items(entry)
                .into_iter()
                .map(|child| self.node_for(child))
                .collect(),
        }
    }
}

/// Serializable nested menu node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    pub id: String,
    pub caption: String,
    pub route: Option<String>,
    pub icon: Option<String>,
    pub children: Vec<MenuNode>,
}

/// Builder that validates ids and parent references as entries are added.
#[derive(Debug, Default)]
pub struct MenuDataBuilder {
    entries: Vec<MenuEntry>,
}

impl MenuDataBuilder {
    /// Adds an entry. Parents must be added before their children.
    pub fn push(mut self, entry: MenuEntry) -> Result<Self> {
        if entry.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        if self.entries.iter().any(|e| e.id == entry.id) {
            return Err(ValidationError::DuplicateId(entry.id).into());
        }
        if let Some(parent) = &entry.parent_id {
            if !self.entries.iter().any(|e| &e.id == parent) {
                return Err(ValidationError::UnknownParent {
                    id: entry.id.clone(),
                    parent: parent.clone(),
                }
                .into());
            }
        }
        self.entries.push(entry);
        Ok(self)
    }

    pub fn entry(self, id: &str, caption: &str, route: &str) -> Result<Self> {
        self.push(MenuEntry::new(id, caption).with_route(route))
    }

    pub fn child(self, parent_id: &str, id: &str, caption: &str, route: &str) -> Result<Self> {
        self.push(
            MenuEntry::new(id, caption)
                .with_route(route)
                .with_parent(parent_id),
        )
    }

    pub fn build(self) -> MenuData {
        MenuData {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    fn sample() -> MenuData {
        MenuData::builder()
            .entry("home", "Home", "/")
            .unwrap()
            .push(MenuEntry::new("admin", "Administration"))
            .unwrap()
            .child("admin", "users", "Users", "/admin/users")
            .unwrap()
            .entry("help", "Help", "/help")
            .unwrap()
            .child("admin", "roles", "Roles", "/admin/roles")
            .unwrap()
            .child("users", "user-audit", "Audit", "/admin/users/audit")
            .unwrap()
            .build()
    }

    #[test]
    fn root_items_are_exactly_parentless_entries() {
        let menu = sample();
        let roots: Vec<&str> = menu.root_items().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(roots, vec!["home", "admin", "help"]);
    }

    #[test]
    fn child_items_filter_by_parent() {
        let menu = sample();
        let admin = menu.find("admin").unwrap();
        let children: Vec<&str> = menu
            .child_items(admin)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(children, vec!["users", "roles"]);

        let home = menu.find("home").unwrap();
        assert!(menu.child_items(home).is_empty());
        assert!(!menu.has_children(home));
        assert!(menu.has_children(admin));
    }

    #[test]
    fn tree_nests_children() {
        let tree = sample().tree();
        assert_eq!(tree.len(), 3);
        let admin = &tree[1];
        assert_eq!(admin.children.len(), 2);
        assert_eq!(admin.children[0].children[0].id, "user-audit");
    }

    #[test]
    fn rejects_unknown_parent_and_duplicates() {
        let err = MenuData::builder()
            .child("missing", "orphan", "Orphan", "/orphan")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnknownParent { .. })
        ));

        let err = MenuData::builder()
            .entry("a", "A", "/a")
            .unwrap()
            .entry("a", "A again", "/a2")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::DuplicateId(ref id)) if id == "a"
        ));
    }
}

use super::menu_model::{MenuData, MenuEntry};
use crate::errors::Result;

/// Builds the portal's navigation menu.
pub fn navigation_menu() -> Result<MenuData> {
    let menu = MenuData::builder()
        .push(
            MenuEntry::new("dashboard", "Dashboard")
                .with_route("/dashboard")
                .with_icon("dashboard"),
        )?
        .push(
            MenuEntry::new("notifications", "Notifications")
                .with_route("/notifications")
                .with_icon("bell"),
        )?
        .push(MenuEntry::new("administration", "Administration").with_icon("cog"))?
        .child("administration", "users", "Users", "/administration/users")?
        .child(
            "administration",
            "comments",
            "Comments",
            "/administration/comments",
        )?
        .build();
    Ok(menu)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_menu_has_administration_children() {
        let menu = navigation_menu().unwrap();
        assert_eq!(menu.root_items().len(), 3);
        let admin = menu.find("administration").unwrap();
        assert!(admin.route.is_none());
        assert_eq!(menu.child_items(admin).len(), 2);
    }
}

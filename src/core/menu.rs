use crate::core::MenuRegistrar;
use crate::domain::model::MenuPage;

/// 記憶體中的管理選單，依 position 再依註冊順序排列
#[derive(Debug, Clone, Default)]
pub struct AdminMenu {
    pages: Vec<MenuPage>,
}

impl AdminMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[MenuPage] {
        &self.pages
    }

    /// 取得 `page` 查詢值對應的已註冊頁面
    pub fn resolve(&self, page: &str) -> Option<&MenuPage> {
        self.pages.iter().find(|entry| entry.slug == page)
    }
}

impl MenuRegistrar for AdminMenu {
    fn add_menu_page(&mut self, page: MenuPage) {
        if self.resolve(&page.slug).is_some() {
            tracing::warn!("Menu page '{}' already registered, replacing it", page.slug);
            self.pages.retain(|entry| entry.slug != page.slug);
        }

        let index = self
            .pages
            .iter()
            .position(|entry| entry.position > page.position)
            .unwrap_or(self.pages.len());
        tracing::debug!("Registered menu page '{}' at position {}", page.slug, page.position);
        self.pages.insert(index, page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(slug: &str, position: i64) -> MenuPage {
        MenuPage {
            page_title: slug.to_string(),
            menu_title: slug.to_string(),
            capability: "manage_options".to_string(),
            slug: slug.to_string(),
            icon: "dashicons-admin-generic".to_string(),
            position,
        }
    }

    #[test]
    fn test_pages_sorted_by_position() {
        let mut menu = AdminMenu::new();
        menu.add_menu_page(page("tools", 80));
        menu.add_menu_page(page("tm-wizard", 75));
        menu.add_menu_page(page("settings", 80));

        let slugs: Vec<&str> = menu.pages().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["tm-wizard", "tools", "settings"]);
    }

    #[test]
    fn test_resolve_and_replace() {
        let mut menu = AdminMenu::new();
        menu.add_menu_page(page("tm-wizard", 75));
        menu.add_menu_page(page("tm-wizard", 10));

        assert_eq!(menu.pages().len(), 1);
        assert_eq!(menu.resolve("tm-wizard").map(|p| p.position), Some(10));
        assert!(menu.resolve("other").is_none());
    }
}

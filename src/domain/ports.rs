use crate::domain::model::MenuPage;
use crate::utils::error::Result;
use serde_json::Value;

/// 精靈啟動時的檔案存取（設定檔、範本覆寫）
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

/// 依鍵路徑唯讀查詢設定，例如 `["skins", "advanced"]`
///
/// 路徑不存在時回傳 `None`，查詢本身不會失敗。
pub trait SettingsStore {
    fn get(&self, path: &[&str]) -> Option<Value>;
}

impl<T: SettingsStore + ?Sized> SettingsStore for &T {
    fn get(&self, path: &[&str]) -> Option<Value> {
        (**self).get(path)
    }
}

pub trait MenuRegistrar {
    fn add_menu_page(&mut self, page: MenuPage);
}

use crate::core::dispatcher::Step;
use crate::core::registry::SkinRegistry;
use crate::core::SettingsStore;
use crate::domain::model::InstallType;
use std::collections::HashMap;

/// 單次管理請求的查詢參數
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardRequest {
    params: HashMap<String, String>,
}

impl WizardRequest {
    /// 解析 `page=tm-wizard&step=2`；開頭的 `?` 會略過，重複的鍵以最後一個為準
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params = url::form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { params }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn page(&self) -> Option<&str> {
        self.param("page").filter(|page| !page.is_empty())
    }

    pub fn step(&self) -> Step {
        Step::from_param(self.param("step"))
    }

    pub fn skin(&self) -> Option<&str> {
        self.param("skin").filter(|skin| !skin.is_empty())
    }

    pub fn install_type(&self) -> InstallType {
        InstallType::from_param(self.param("type"))
    }
}

/// 請求狀態：請求本身、skins 快取與目前選取的 skin，請求結束時一併釋放
pub struct RequestContext<'a, S: SettingsStore + ?Sized> {
    request: WizardRequest,
    registry: SkinRegistry<'a, S>,
}

impl<'a, S: SettingsStore + ?Sized> RequestContext<'a, S> {
    pub fn new(request: WizardRequest, settings: &'a S) -> Self {
        Self {
            request,
            registry: SkinRegistry::new(settings),
        }
    }

    pub fn request(&self) -> &WizardRequest {
        &self.request
    }

    pub fn registry(&self) -> &SkinRegistry<'a, S> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SkinRegistry<'a, S> {
        &mut self.registry
    }
}

use crate::core::templates;

/// 由 `step` 查詢參數取得的精靈步驟
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step(pub i64);

impl Step {
    pub const BEFORE_INSTALL: Step = Step(1);
    pub const INSTALL: Step = Step(2);
    pub const AFTER_INSTALL: Step = Step(3);

    /// 未提供、空字串或 "0" 視為第 1 步；其餘依整數轉型規則取開頭的正負號與數字，無效字串為 0
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None => Step::BEFORE_INSTALL,
            Some(raw) if raw.is_empty() || raw == "0" => Step::BEFORE_INSTALL,
            Some(raw) => Step(leading_integer(raw)),
        }
    }

    pub fn view(&self) -> Option<View> {
        match self.0 {
            1 => Some(View::BeforeInstall),
            2 => Some(View::Install),
            3 => Some(View::AfterInstall),
            _ => None,
        }
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::BEFORE_INSTALL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    BeforeInstall,
    Install,
    AfterInstall,
}

impl View {
    pub fn template_name(&self) -> &'static str {
        match self {
            View::BeforeInstall => templates::BEFORE_INSTALL,
            View::Install => templates::INSTALL,
            View::AfterInstall => templates::AFTER_INSTALL,
        }
    }
}

/// 依步驟選擇畫面；`None` 表示不輸出任何內容
pub fn dispatch(step: Step) -> Option<View> {
    let view = step.view();
    if view.is_none() {
        tracing::warn!("Wizard step {} has no view, rendering nothing", step.0);
    }
    view
}

fn leading_integer(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    if negative {
        -value
    } else {
        value
    }
}

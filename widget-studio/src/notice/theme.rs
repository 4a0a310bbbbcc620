use serde::{Deserialize, Serialize};

use super::NoticeType;

/// Presentation of one notice kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeStyle {
    pub icon: String,
    pub border: String,
    pub background: String,
}

impl TypeStyle {
    fn new(icon: &str, border: &str, background: &str) -> Self {
        Self {
            icon: icon.to_string(),
            border: border.to_string(),
            background: background.to_string(),
        }
    }
}

/// Notice kind -> icon, border color, background color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypeStyleTable {
    pub note: TypeStyle,
    pub warning: TypeStyle,
    pub hint: TypeStyle,
    pub question: TypeStyle,
}

impl TypeStyleTable {
    pub fn defaults() -> Self {
        Self {
            note: TypeStyle::new("📝", "#0969da", "#dbeafe"),
            warning: TypeStyle::new("⚠️", "#fb8500", "#fff3cd"),
            hint: TypeStyle::new("💡", "#1a7f37", "#d1e7dd"),
            question: TypeStyle::new("❓", "#8250df", "#e9d5ff"),
        }
    }

    pub fn get(&self, kind: NoticeType) -> &TypeStyle {
        match kind {
            NoticeType::Note => &self.note,
            NoticeType::Warning => &self.warning,
            NoticeType::Hint => &self.hint,
            NoticeType::Question => &self.question,
        }
    }

    pub fn get_mut(&mut self, kind: NoticeType) -> &mut TypeStyle {
        match kind {
            NoticeType::Note => &mut self.note,
            NoticeType::Warning => &mut self.warning,
            NoticeType::Hint => &mut self.hint,
            NoticeType::Question => &mut self.question,
        }
    }
}

impl Default for TypeStyleTable {
    fn default() -> Self {
        Self::defaults()
    }
}

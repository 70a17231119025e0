use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserSummary;

// 班级分组，仅允许 A-D
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub enum Section {
    A,
    B,
    C,
    D,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::A => "A",
            Section::B => "B",
            Section::C => "C",
            Section::D => "D",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    /// 去除首尾空白并转为大写后匹配
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Section::A),
            "B" => Ok(Section::B),
            "C" => Ok(Section::C),
            "D" => Ok(Section::D),
            _ => Err(format!("Invalid section: {s}")),
        }
    }
}

// 班级实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct Class {
    pub id: i64,
    pub name: String,
    pub section: Section,
    pub incharge_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Class {
    pub fn summary(&self) -> ClassSummary {
        ClassSummary {
            id: self.id,
            name: self.name.clone(),
            section: self.section,
        }
    }
}

// 关联查询时展示的班级摘要
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassSummary {
    pub id: i64,
    pub name: String,
    pub section: Section,
}

// 带班主任信息的班级
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassDetail {
    pub id: i64,
    pub name: String,
    pub section: Section,
    pub incharge: Option<UserSummary>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_parse_normalizes() {
        assert_eq!(" b ".parse::<Section>().unwrap(), Section::B);
        assert_eq!("D".parse::<Section>().unwrap(), Section::D);
        assert!("E".parse::<Section>().is_err());
        assert!("".parse::<Section>().is_err());
    }
}

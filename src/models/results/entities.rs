use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{
    class_subjects::entities::ClassSubject, classes::entities::ClassSummary, exams::entities::Exam,
    subjects::entities::Subject,
};

// 等级，序列化为成绩单上显示的字面值
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
            Grade::NotApplicable => "N/A",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A+" => Ok(Grade::APlus),
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            "N/A" => Ok(Grade::NotApplicable),
            _ => Err(format!("Invalid grade: {s}")),
        }
    }
}

// 成绩记录：一名学生在一次考试中某门开课的得分
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultEntry {
    pub id: i64,
    pub student_id: i64,
    pub class_subject_id: i64,
    pub exam_id: i64,
    pub marks_obtained: f64,
    /// 库中值无法识别时为空
    pub grade: Option<Grade>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 关联考试、开课、科目与班级后的成绩记录，任一关联都可能缺失
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultRow {
    #[serde(flatten)]
    pub entry: ResultEntry,
    pub exam: Option<Exam>,
    pub class_subject: Option<ClassSubject>,
    pub subject: Option<Subject>,
    pub class: Option<ClassSummary>,
}

// 成绩单中的单科
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct SheetSubject {
    pub result_id: i64,
    pub subject: String,
    pub marks_obtained: f64,
    pub max_marks: f64,
    pub grade: String,
}

// 成绩单合计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct SheetTotals {
    pub obtained_marks: f64,
    pub max_marks: f64,
    pub percentage: f64,
}

// 单次考试的成绩单
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ExamSheet {
    pub exam: Exam,
    pub subjects: Vec<SheetSubject>,
    pub totals: SheetTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_literals() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
        assert_eq!(
            serde_json::to_string(&Grade::NotApplicable).unwrap(),
            "\"N/A\""
        );
        let parsed: Grade = serde_json::from_str("\"A+\"").unwrap();
        assert_eq!(parsed, Grade::APlus);
        assert_eq!("F".parse::<Grade>().unwrap(), Grade::F);
        assert!("E".parse::<Grade>().is_err());
    }
}

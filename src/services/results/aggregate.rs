//! 成绩单汇总
//!
//! 把学生已关联好的成绩行按考试分组，生成每次考试的单科列表与合计。
//! 纯计算，不访问存储。

use crate::models::results::entities::{ExamSheet, ResultRow, SheetSubject, SheetTotals};

const MISSING: &str = "-";

/// 汇总结果，附带因考试缺失而跳过的行数
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub sheets: Vec<ExamSheet>,
    pub unresolved_exam_rows: usize,
}

pub fn aggregate(rows: &[ResultRow]) -> Vec<ExamSheet> {
    aggregate_with_stats(rows).sheets
}

/// 按考试首次出现的顺序分组
pub fn aggregate_with_stats(rows: &[ResultRow]) -> Aggregation {
    let mut sheets: Vec<ExamSheet> = Vec::new();
    let mut unresolved_exam_rows = 0;

    for row in rows {
        let Some(exam) = row.exam.as_ref() else {
            unresolved_exam_rows += 1;
            continue;
        };

        let subject = SheetSubject {
            result_id: row.entry.id,
            subject: row
                .subject
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_else(|| MISSING.to_string()),
            marks_obtained: row.entry.marks_obtained,
            max_marks: row.class_subject.as_ref().map_or(0.0, |o| o.max_marks),
            grade: row
                .entry
                .grade
                .map(|g| g.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
        };

        match sheets.iter_mut().find(|sheet| sheet.exam.id == exam.id) {
            Some(sheet) => sheet.subjects.push(subject),
            None => sheets.push(ExamSheet {
                exam: exam.clone(),
                subjects: vec![subject],
                totals: SheetTotals {
                    obtained_marks: 0.0,
                    max_marks: 0.0,
                    percentage: 0.0,
                },
            }),
        }
    }

    for sheet in &mut sheets {
        sheet.totals = totals(&sheet.subjects);
    }

    Aggregation {
        sheets,
        unresolved_exam_rows,
    }
}

fn totals(subjects: &[SheetSubject]) -> SheetTotals {
    let obtained_marks: f64 = subjects.iter().map(|s| s.marks_obtained).sum();
    let max_marks: f64 = subjects.iter().map(|s| s.max_marks).sum();
    let percentage = if max_marks > 0.0 {
        round2(obtained_marks / max_marks * 100.0)
    } else {
        0.0
    };

    SheetTotals {
        obtained_marks,
        max_marks,
        percentage,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        class_subjects::entities::ClassSubject,
        exams::entities::Exam,
        results::entities::{Grade, ResultEntry},
        subjects::entities::Subject,
    };
    use crate::services::results::grading::grade;
    use chrono::{TimeZone, Utc};

    fn exam(id: i64, name: &str) -> Exam {
        Exam {
            id,
            name: name.to_string(),
            class_id: 1,
            academic_year: "2024-25".to_string(),
            date: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn row(
        id: i64,
        exam: Option<Exam>,
        subject: Option<&str>,
        marks: f64,
        max: Option<f64>,
    ) -> ResultRow {
        let class_subject = max.map(|max_marks| ClassSubject {
            id: id * 10,
            subject_id: id * 100,
            class_id: 1,
            teacher_id: 2,
            max_marks,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        });
        let grade = max.map(|m| grade(marks, m));
        ResultRow {
            entry: ResultEntry {
                id,
                student_id: 1,
                class_subject_id: id * 10,
                exam_id: exam.as_ref().map_or(999, |e| e.id),
                marks_obtained: marks,
                grade,
                created_at: Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap(),
            },
            exam,
            class_subject,
            subject: subject.map(|name| Subject {
                id: id * 100,
                name: name.to_string(),
                created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            }),
            class: None,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_totals_and_percentage() {
        let midterm = exam(1, "Midterm");
        let rows = vec![
            row(1, Some(midterm.clone()), Some("Math"), 76.0, Some(80.0)),
            row(2, Some(midterm), Some("Science"), 40.0, Some(50.0)),
        ];

        let sheets = aggregate(&rows);
        assert_eq!(sheets.len(), 1);
        let sheet = &sheets[0];
        assert_eq!(sheet.subjects.len(), 2);
        assert_eq!(sheet.subjects[0].subject, "Math");
        assert_eq!(sheet.subjects[0].grade, "A+");
        assert_eq!(sheet.subjects[1].grade, "A");
        assert_eq!(
            sheet.totals,
            SheetTotals {
                obtained_marks: 116.0,
                max_marks: 130.0,
                percentage: 89.23,
            }
        );
    }

    #[test]
    fn test_groups_by_exam_in_first_seen_order() {
        let finals = exam(7, "Final");
        let midterm = exam(3, "Midterm");
        let rows = vec![
            row(1, Some(finals.clone()), Some("Math"), 50.0, Some(100.0)),
            row(2, Some(midterm.clone()), Some("Math"), 60.0, Some(100.0)),
            row(3, Some(finals), Some("Science"), 70.0, Some(100.0)),
            row(4, Some(midterm), Some("Science"), 80.0, Some(100.0)),
        ];

        let sheets = aggregate(&rows);
        let order: Vec<i64> = sheets.iter().map(|s| s.exam.id).collect();
        assert_eq!(order, vec![7, 3]);
        let first_ids: Vec<i64> = sheets[0].subjects.iter().map(|s| s.result_id).collect();
        assert_eq!(first_ids, vec![1, 3]);
        assert_eq!(sheets[1].totals.percentage, 70.0);
    }

    #[test]
    fn test_missing_joins_and_unresolved_exam() {
        let midterm = exam(1, "Midterm");
        let rows = vec![
            row(1, Some(midterm.clone()), None, 12.0, None),
            row(2, None, Some("Art"), 30.0, Some(50.0)),
            row(3, Some(midterm), Some("Music"), 20.0, Some(40.0)),
        ];

        let aggregation = aggregate_with_stats(&rows);
        assert_eq!(aggregation.unresolved_exam_rows, 1);
        let listed: usize = aggregation.sheets.iter().map(|s| s.subjects.len()).sum();
        assert_eq!(listed, rows.len() - aggregation.unresolved_exam_rows);

        let orphan = &aggregation.sheets[0].subjects[0];
        assert_eq!(orphan.subject, "-");
        assert_eq!(orphan.max_marks, 0.0);
        assert_eq!(orphan.grade, "-");
        assert_eq!(aggregation.sheets[0].totals.max_marks, 40.0);
    }

    #[test]
    fn test_zero_max_gives_zero_percentage() {
        let rows = vec![row(1, Some(exam(1, "Quiz")), Some("Math"), 5.0, Some(0.0))];
        let sheets = aggregate(&rows);
        assert_eq!(sheets[0].totals.percentage, 0.0);
        assert_eq!(sheets[0].subjects[0].grade, Grade::NotApplicable.to_string());
    }

    #[test]
    fn test_is_deterministic() {
        let midterm = exam(1, "Midterm");
        let rows = vec![
            row(1, Some(midterm.clone()), Some("Math"), 33.5, Some(50.0)),
            row(2, Some(midterm), Some("Science"), 41.0, Some(60.0)),
        ];
        let first = serde_json::to_string(&aggregate(&rows)).unwrap();
        let second = serde_json::to_string(&aggregate(&rows)).unwrap();
        assert_eq!(first, second);
    }
}

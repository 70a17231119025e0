//! 跨实体一致性校验
//!
//! 写入成绩前依次确认：开课、学生、考试都存在；当前教师负责该开课；
//! 学生与考试都属于开课所在班级；分数在满分范围内。第一个不满足的条件即返回。
//! 这些预检只用于快速失败，最终以数据库的唯一索引与外键为准。

use actix_web::{HttpResponse, http::StatusCode};

use crate::models::{
    ApiResponse, ErrorCode, class_subjects::entities::ClassSubject, exams::entities::Exam,
    students::entities::Student, users::entities::User,
};

/// 成绩录入被拒绝的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultEntryRejection {
    OfferingNotFound,
    StudentNotFound,
    ExamNotFound,
    NotAssignedToOffering,
    StudentNotInClass,
    ExamNotInClass,
    MarksOutOfRange,
}

impl ResultEntryRejection {
    pub fn status(self) -> StatusCode {
        match self {
            Self::OfferingNotFound | Self::StudentNotFound | Self::ExamNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::NotAssignedToOffering => StatusCode::FORBIDDEN,
            Self::StudentNotInClass | Self::ExamNotInClass | Self::MarksOutOfRange => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    pub fn code(self) -> ErrorCode {
        match self {
            Self::OfferingNotFound => ErrorCode::ClassSubjectNotFound,
            Self::StudentNotFound => ErrorCode::StudentNotFound,
            Self::ExamNotFound => ErrorCode::ExamNotFound,
            Self::NotAssignedToOffering => ErrorCode::NotAssignedToSubject,
            Self::StudentNotInClass => ErrorCode::StudentNotInClass,
            Self::ExamNotInClass => ErrorCode::ExamNotInClass,
            Self::MarksOutOfRange => ErrorCode::MarksOutOfRange,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::OfferingNotFound => "Class subject not found",
            Self::StudentNotFound => "Student not found",
            Self::ExamNotFound => "Exam not found",
            Self::NotAssignedToOffering => "You are not assigned to this subject",
            Self::StudentNotInClass => "Student does not belong to this class",
            Self::ExamNotInClass => "Exam does not belong to this class",
            Self::MarksOutOfRange => "marksObtained exceeds max marks",
        }
    }

    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(self.status())
            .json(ApiResponse::error_empty(self.code(), self.message()))
    }
}

/// 成绩录入前的校验，返回通过校验的开课
pub fn check_result_entry<'a>(
    acting_teacher_id: i64,
    offering: Option<&'a ClassSubject>,
    student: Option<&Student>,
    exam: Option<&Exam>,
    marks_obtained: f64,
) -> Result<&'a ClassSubject, ResultEntryRejection> {
    let offering = offering.ok_or(ResultEntryRejection::OfferingNotFound)?;
    let student = student.ok_or(ResultEntryRejection::StudentNotFound)?;
    let exam = exam.ok_or(ResultEntryRejection::ExamNotFound)?;

    if offering.teacher_id != acting_teacher_id {
        return Err(ResultEntryRejection::NotAssignedToOffering);
    }
    if student.class_id != offering.class_id {
        return Err(ResultEntryRejection::StudentNotInClass);
    }
    if exam.class_id != offering.class_id {
        return Err(ResultEntryRejection::ExamNotInClass);
    }
    if !marks_obtained.is_finite() || marks_obtained < 0.0 || marks_obtained > offering.max_marks
    {
        return Err(ResultEntryRejection::MarksOutOfRange);
    }

    Ok(offering)
}

/// 开课教师与班主任必须是教师角色
pub fn is_instructor(user: Option<&User>) -> bool {
    user.is_some_and(User::is_instructor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use chrono::Utc;

    fn offering() -> ClassSubject {
        ClassSubject {
            id: 10,
            subject_id: 3,
            class_id: 1,
            teacher_id: 5,
            max_marks: 80.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn student(class_id: i64) -> Student {
        Student {
            id: 20,
            user_id: 21,
            enrollment_number: "ENR-001".to_string(),
            class_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn exam(class_id: i64) -> Exam {
        Exam {
            id: 30,
            name: "Midterm".to_string(),
            class_id,
            academic_year: "2024-25".to_string(),
            date: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_accepts_consistent_entry() {
        let o = offering();
        let accepted =
            check_result_entry(5, Some(&o), Some(&student(1)), Some(&exam(1)), 76.0).unwrap();
        assert_eq!(accepted.id, 10);
        assert!(check_result_entry(5, Some(&o), Some(&student(1)), Some(&exam(1)), 80.0).is_ok());
        assert!(check_result_entry(5, Some(&o), Some(&student(1)), Some(&exam(1)), 0.0).is_ok());
    }

    #[test]
    fn test_missing_references_in_order() {
        let o = offering();
        let s = student(1);
        let e = exam(1);
        assert_eq!(
            check_result_entry(5, None, None, None, 1.0).unwrap_err(),
            ResultEntryRejection::OfferingNotFound
        );
        assert_eq!(
            check_result_entry(5, Some(&o), None, Some(&e), 1.0).unwrap_err(),
            ResultEntryRejection::StudentNotFound
        );
        assert_eq!(
            check_result_entry(5, Some(&o), Some(&s), None, 1.0).unwrap_err(),
            ResultEntryRejection::ExamNotFound
        );
    }

    #[test]
    fn test_rejections() {
        let o = offering();
        assert_eq!(
            check_result_entry(6, Some(&o), Some(&student(1)), Some(&exam(1)), 1.0).unwrap_err(),
            ResultEntryRejection::NotAssignedToOffering
        );
        assert_eq!(
            check_result_entry(5, Some(&o), Some(&student(2)), Some(&exam(1)), 1.0).unwrap_err(),
            ResultEntryRejection::StudentNotInClass
        );
        assert_eq!(
            check_result_entry(5, Some(&o), Some(&student(1)), Some(&exam(2)), 1.0).unwrap_err(),
            ResultEntryRejection::ExamNotInClass
        );
        assert_eq!(
            check_result_entry(5, Some(&o), Some(&student(1)), Some(&exam(1)), 81.0).unwrap_err(),
            ResultEntryRejection::MarksOutOfRange
        );
        assert_eq!(
            check_result_entry(5, Some(&o), Some(&student(1)), Some(&exam(1)), -1.0).unwrap_err(),
            ResultEntryRejection::MarksOutOfRange
        );
    }

    #[test]
    fn test_ownership_checked_before_class_membership() {
        let o = offering();
        assert_eq!(
            check_result_entry(9, Some(&o), Some(&student(2)), Some(&exam(2)), 500.0).unwrap_err(),
            ResultEntryRejection::NotAssignedToOffering
        );
    }

    #[test]
    fn test_rejection_status() {
        assert_eq!(
            ResultEntryRejection::NotAssignedToOffering.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ResultEntryRejection::ExamNotFound.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ResultEntryRejection::MarksOutOfRange.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_is_instructor() {
        let now = Utc::now();
        let mut user = User {
            id: 1,
            username: "t".to_string(),
            email: "t@school.edu".to_string(),
            password_hash: String::new(),
            role: UserRole::Instructor,
            created_at: now,
            updated_at: now,
        };
        assert!(is_instructor(Some(&user)));
        user.role = UserRole::Admin;
        assert!(!is_instructor(Some(&user)));
        assert!(!is_instructor(None));
    }
}

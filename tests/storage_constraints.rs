//! 存储层约束测试：唯一索引、事务删除与关联查询

use school_results::config::DatabaseConfig;
use school_results::errors::SchoolError;
use school_results::models::class_subjects::requests::{
    ClassSubjectQuery, ClassSubjectUpdate, NewClassSubject,
};
use school_results::models::classes::{entities::Section, requests::NewClass};
use school_results::models::exams::requests::{NewExam, parse_exam_date};
use school_results::models::results::{entities::Grade, requests::NewResult};
use school_results::models::students::requests::{NewStudent, StudentUpdate};
use school_results::models::users::{entities::UserRole, requests::NewUser};
use school_results::storage::{SeaOrmStorage, Storage};

async fn memory_storage() -> SeaOrmStorage {
    SeaOrmStorage::connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 30,
    })
    .await
    .expect("in-memory storage")
}

struct Fixture {
    teacher_id: i64,
    class_id: i64,
    student_id: i64,
    student_user_id: i64,
    class_subject_id: i64,
    exam_id: i64,
}

async fn seed(storage: &SeaOrmStorage) -> Fixture {
    let teacher = storage
        .create_user(NewUser {
            username: "Ms Rao".to_string(),
            email: "rao@school.test".to_string(),
            password_hash: "x".to_string(),
            role: UserRole::Instructor,
        })
        .await
        .unwrap();
    let class = storage
        .create_class(NewClass {
            name: "10".to_string(),
            section: Section::A,
            incharge_id: Some(teacher.id),
        })
        .await
        .unwrap();
    let (student_user, student) = storage
        .create_student(NewStudent {
            username: "Asha".to_string(),
            email: "asha@school.test".to_string(),
            password_hash: "x".to_string(),
            enrollment_number: "ENR-001".to_string(),
            class_id: class.id,
        })
        .await
        .unwrap();
    let subject = storage.create_subject("Mathematics").await.unwrap();
    let offering = storage
        .create_class_subject(NewClassSubject {
            subject_id: subject.id,
            class_id: class.id,
            teacher_id: teacher.id,
            max_marks: 100.0,
        })
        .await
        .unwrap();
    let exam = storage
        .create_exam(NewExam {
            name: "Midterm".to_string(),
            class_id: class.id,
            academic_year: "2024-2025".to_string(),
            date: parse_exam_date("2024-10-01").unwrap(),
        })
        .await
        .unwrap();

    Fixture {
        teacher_id: teacher.id,
        class_id: class.id,
        student_id: student.id,
        student_user_id: student_user.id,
        class_subject_id: offering.id,
        exam_id: exam.id,
    }
}

fn result_for(fixture: &Fixture, marks: f64) -> NewResult {
    NewResult {
        student_id: fixture.student_id,
        class_subject_id: fixture.class_subject_id,
        exam_id: fixture.exam_id,
        marks_obtained: marks,
        grade: Grade::A,
    }
}

#[actix_web::test]
async fn duplicate_result_is_a_conflict() {
    let storage = memory_storage().await;
    let fixture = seed(&storage).await;

    storage.create_result(result_for(&fixture, 85.0)).await.unwrap();
    let err = storage
        .create_result(result_for(&fixture, 90.0))
        .await
        .unwrap_err();

    assert!(matches!(err, SchoolError::Conflict(_)), "got {err:?}");
    assert_eq!(
        storage
            .list_results_for_student(fixture.student_id)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[actix_web::test]
async fn duplicate_email_is_a_conflict() {
    let storage = memory_storage().await;
    seed(&storage).await;

    let err = storage
        .create_user(NewUser {
            username: "Other".to_string(),
            email: "rao@school.test".to_string(),
            password_hash: "x".to_string(),
            role: UserRole::Instructor,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SchoolError::Conflict(_)));
}

#[actix_web::test]
async fn duplicate_enrollment_rolls_back_account() {
    let storage = memory_storage().await;
    let fixture = seed(&storage).await;

    let err = storage
        .create_student(NewStudent {
            username: "Ravi".to_string(),
            email: "ravi@school.test".to_string(),
            password_hash: "x".to_string(),
            enrollment_number: "ENR-001".to_string(),
            class_id: fixture.class_id,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SchoolError::Conflict(_)));
    assert!(
        storage
            .get_user_by_email("ravi@school.test")
            .await
            .unwrap()
            .is_none()
    );
}

#[actix_web::test]
async fn delete_student_removes_results_and_account() {
    let storage = memory_storage().await;
    let fixture = seed(&storage).await;
    storage.create_result(result_for(&fixture, 70.0)).await.unwrap();

    assert!(storage.delete_student(fixture.student_id).await.unwrap());

    assert!(
        storage
            .get_student_by_id(fixture.student_id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        storage
            .get_user_by_id(fixture.student_user_id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        storage
            .list_results_for_student(fixture.student_id)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(!storage.delete_student(fixture.student_id).await.unwrap());
}

#[actix_web::test]
async fn update_student_touches_account_and_enrollment() {
    let storage = memory_storage().await;
    let fixture = seed(&storage).await;

    let updated = storage
        .update_student(
            fixture.student_id,
            StudentUpdate {
                username: Some("Asha K".to_string()),
                enrollment_number: Some("ENR-100".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("student exists");

    assert_eq!(updated.enrollment_number, "ENR-100");
    let account = storage
        .get_user_by_id(fixture.student_user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(account.username, "Asha K");

    let missing = storage
        .update_student(fixture.student_id + 100, StudentUpdate::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[actix_web::test]
async fn result_rows_are_joined() {
    let storage = memory_storage().await;
    let fixture = seed(&storage).await;
    storage.create_result(result_for(&fixture, 85.0)).await.unwrap();

    let rows = storage
        .list_results_for_student(fixture.student_id)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.entry.marks_obtained, 85.0);
    assert_eq!(row.entry.grade, Some(Grade::A));
    assert_eq!(row.exam.as_ref().map(|e| e.name.as_str()), Some("Midterm"));
    assert_eq!(
        row.subject.as_ref().map(|s| s.name.as_str()),
        Some("Mathematics")
    );
    assert_eq!(row.class.as_ref().map(|c| c.id), Some(fixture.class_id));
}

#[actix_web::test]
async fn teacher_assignment_lookup() {
    let storage = memory_storage().await;
    let fixture = seed(&storage).await;

    assert!(
        storage
            .teacher_teaches_class(fixture.teacher_id, fixture.class_id)
            .await
            .unwrap()
    );
    assert!(
        !storage
            .teacher_teaches_class(fixture.teacher_id, fixture.class_id + 1)
            .await
            .unwrap()
    );

    let mine = storage
        .list_class_subjects(ClassSubjectQuery {
            class_id: None,
            teacher_id: Some(fixture.teacher_id),
        })
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(
        mine[0].teacher.as_ref().map(|t| t.id),
        Some(fixture.teacher_id)
    );
}

#[actix_web::test]
async fn max_marks_change_respects_recorded_results() {
    let storage = memory_storage().await;
    let fixture = seed(&storage).await;

    let mut entry = result_for(&fixture, 76.0);
    entry.grade = Grade::B;
    storage.create_result(entry).await.unwrap();

    let err = storage
        .update_class_subject(
            fixture.class_subject_id,
            ClassSubjectUpdate {
                teacher_id: None,
                max_marks: Some(40.0),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::Validation(_)), "got {err:?}");

    let offering = storage
        .get_class_subject_by_id(fixture.class_subject_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(offering.max_marks, 100.0);

    // 76 / 80 = 95%
    storage
        .update_class_subject(
            fixture.class_subject_id,
            ClassSubjectUpdate {
                teacher_id: None,
                max_marks: Some(80.0),
            },
        )
        .await
        .unwrap()
        .unwrap();

    let rows = storage
        .list_results_for_student(fixture.student_id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].entry.grade, Some(Grade::APlus));
    assert_eq!(rows[0].class_subject.as_ref().unwrap().max_marks, 80.0);
}

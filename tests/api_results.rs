//! HTTP 端到端测试：管理员建档、教师录入成绩、学生查看成绩单

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use school_results::config::DatabaseConfig;
use school_results::models::users::{entities::UserRole, requests::NewUser};
use school_results::routes;
use school_results::storage::{SeaOrmStorage, Storage};
use school_results::utils::jwt::JwtUtils;
use school_results::utils::password::hash_password;
use school_results::utils::{json_error_handler, query_error_handler};

const ADMIN_EMAIL: &str = "admin@school.test";
const ADMIN_PASSWORD: &str = "admin-pass-123";

async fn memory_storage() -> Arc<dyn Storage> {
    let storage = SeaOrmStorage::connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 30,
    })
    .await
    .expect("in-memory storage");
    Arc::new(storage)
}

async fn seed_admin(storage: &Arc<dyn Storage>) -> i64 {
    storage
        .create_user(NewUser {
            username: "Admin".to_string(),
            email: ADMIN_EMAIL.to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
            role: UserRole::Admin,
        })
        .await
        .unwrap()
        .id
}

fn bearer(user_id: i64, role: UserRole) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(user_id, role.as_str()).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

macro_rules! init_app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage.clone()))
                .configure(routes::configure_system_routes)
                .configure(routes::configure_auth_routes)
                .configure(routes::configure_admin_routes)
                .configure(routes::configure_teacher_routes)
                .configure(routes::configure_student_routes),
        )
        .await
    };
}

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

struct School {
    teacher_id: i64,
    other_teacher_id: i64,
    class_id: i64,
    class_subject_id: i64,
    exam_id: i64,
    student_id: i64,
    student_user_id: i64,
}

#[actix_web::test]
async fn health_is_public() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (status, body) = send!(app, test::TestRequest::get().uri("/health"));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert!(body["unresolvedExamRows"].is_u64());
}

#[actix_web::test]
async fn login_rejects_bad_credentials_uniformly() {
    let storage = memory_storage().await;
    seed_admin(&storage).await;
    let app = init_app!(storage);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("X-Forwarded-For", "10.1.0.1"))
            .set_json(json!({ "email": ADMIN_EMAIL, "password": "wrong" }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("X-Forwarded-For", "10.1.0.1"))
            .set_json(json!({ "email": "nobody@school.test", "password": "wrong" }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    // 邮箱大小写与空白不影响登录
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("X-Forwarded-For", "10.1.0.1"))
            .set_json(json!({ "email": "  Admin@School.TEST ", "password": ADMIN_PASSWORD }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "admin");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[actix_web::test]
async fn login_is_rate_limited_per_ip() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    for _ in 0..5 {
        let (status, _) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .insert_header(("X-Forwarded-For", "10.2.0.1"))
                .set_json(json!({ "email": "x@school.test", "password": "x" }))
        );
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("X-Forwarded-For", "10.2.0.1"))
            .set_json(json!({ "email": "x@school.test", "password": "x" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[actix_web::test]
async fn protected_routes_require_token_and_role() {
    let storage = memory_storage().await;
    seed_admin(&storage).await;
    let student = storage
        .create_user(NewUser {
            username: "Loose".to_string(),
            email: "loose@school.test".to_string(),
            password_hash: "x".to_string(),
            role: UserRole::Student,
        })
        .await
        .unwrap();
    let app = init_app!(storage);

    let (status, _) = send!(app, test::TestRequest::get().uri("/api/v1/admin/classes"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/admin/classes")
            .insert_header(("Authorization", "Bearer not-a-token"))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/admin/classes")
            .insert_header(bearer(student.id, UserRole::Student))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    // 有学生角色但没有学籍
    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/student/results")
            .insert_header(bearer(student.id, UserRole::Student))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student profile not found");
}

macro_rules! build_school {
    ($app:expr, $admin_id:expr) => {{
        let admin = bearer($admin_id, UserRole::Admin);

        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri("/api/v1/admin/create-teachers")
                .insert_header(admin.clone())
                .set_json(json!({
                    "username": "Ms Rao",
                    "email": "Rao@School.test",
                    "password": "teacher-pass"
                }))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let teacher_id = body["userId"].as_i64().unwrap();

        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri("/api/v1/admin/create-teachers")
                .insert_header(admin.clone())
                .set_json(json!({
                    "username": "Mr Iyer",
                    "email": "iyer@school.test",
                    "password": "teacher-pass"
                }))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let other_teacher_id = body["userId"].as_i64().unwrap();

        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri("/api/v1/admin/classes")
                .insert_header(admin.clone())
                .set_json(json!({ "name": "10", "section": "A", "classInchargeId": teacher_id }))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let class_id = body["classId"].as_i64().unwrap();

        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri("/api/v1/admin/subjects")
                .insert_header(admin.clone())
                .set_json(json!({ "name": "Mathematics" }))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let subject_id = body["subjectId"].as_i64().unwrap();

        // id 以字符串形式提交同样被接受
        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri("/api/v1/admin/class-subjects")
                .insert_header(admin.clone())
                .set_json(json!({
                    "subjectId": subject_id.to_string(),
                    "classId": class_id,
                    "teacherId": teacher_id,
                    "maxMarks": 100
                }))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let class_subject_id = body["classSubjectId"].as_i64().unwrap();

        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri("/api/v1/admin/exams")
                .insert_header(admin.clone())
                .set_json(json!({
                    "name": "Midterm",
                    "classId": class_id,
                    "academicYear": "2024-2025",
                    "date": "2024-10-01"
                }))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let exam_id = body["examId"].as_i64().unwrap();

        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri("/api/v1/admin/create-students")
                .insert_header(admin.clone())
                .set_json(json!({
                    "username": "Asha",
                    "email": "asha@school.test",
                    "password": "student-pass",
                    "enrollmentNumber": "ENR-001",
                    "classId": class_id
                }))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");

        School {
            teacher_id,
            other_teacher_id,
            class_id,
            class_subject_id,
            exam_id,
            student_id: body["studentId"].as_i64().unwrap(),
            student_user_id: body["userId"].as_i64().unwrap(),
        }
    }};
}

#[actix_web::test]
async fn catalog_duplicates_are_conflicts() {
    let storage = memory_storage().await;
    let admin_id = seed_admin(&storage).await;
    let app = init_app!(storage);
    let school = build_school!(app, admin_id);
    let admin = bearer(admin_id, UserRole::Admin);

    // 重名科目返回已有 id
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/admin/subjects")
            .insert_header(admin.clone())
            .set_json(json!({ "name": "  Mathematics " }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["subjectId"].is_i64());

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/admin/classes")
            .insert_header(admin.clone())
            .set_json(json!({ "name": "10", "section": "A" }))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/admin/classes")
            .insert_header(admin.clone())
            .set_json(json!({ "name": "10", "section": "E" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/admin/exams")
            .insert_header(admin.clone())
            .set_json(json!({
                "name": "Midterm",
                "classId": school.class_id,
                "academicYear": "2024-2025",
                "date": "2024-11-01"
            }))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/admin/create-students")
            .insert_header(admin.clone())
            .set_json(json!({
                "username": "Ravi",
                "email": "ravi@school.test",
                "password": "student-pass",
                "enrollmentNumber": "ENR-001",
                "classId": school.class_id
            }))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/admin/class-subjects/{}", school.class_subject_id))
            .insert_header(admin.clone())
            .set_json(json!({ "teacherId": school.student_user_id }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/v1/admin/students/abc")
            .insert_header(admin.clone())
            .set_json(json!({ "username": "X" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn result_entry_flow_and_report() {
    let storage = memory_storage().await;
    let admin_id = seed_admin(&storage).await;
    let app = init_app!(storage);
    let school = build_school!(app, admin_id);
    let teacher = bearer(school.teacher_id, UserRole::Instructor);

    let entry = json!({
        "studentId": school.student_id,
        "classSubjectId": school.class_subject_id,
        "examId": school.exam_id,
        "marksObtained": 85
    });

    // 非任课教师被拒绝
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/teacher/results")
            .insert_header(bearer(school.other_teacher_id, UserRole::Instructor))
            .set_json(entry.clone())
    );
    assert_eq!(status, StatusCode::FORBIDDEN, "{body}");

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/teacher/results")
            .insert_header(teacher.clone())
            .set_json(json!({
                "studentId": school.student_id,
                "classSubjectId": school.class_subject_id,
                "examId": school.exam_id,
                "marksObtained": 150
            }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/teacher/results")
            .insert_header(teacher.clone())
            .set_json(entry.clone())
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let result_id = body["resultId"].as_i64().unwrap();

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/teacher/results")
            .insert_header(teacher.clone())
            .set_json(entry)
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/student/results")
            .insert_header(bearer(school.student_user_id, UserRole::Student))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["student"]["enrollmentNumber"], "ENR-001");
    let sheets = body["resultSheets"].as_array().unwrap();
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0]["exam"]["name"], "Midterm");
    assert_eq!(sheets[0]["subjects"][0]["resultId"], result_id);
    assert_eq!(sheets[0]["subjects"][0]["subject"], "Mathematics");
    assert_eq!(sheets[0]["subjects"][0]["grade"], "A");
    assert_eq!(sheets[0]["totals"]["percentage"], 85.0);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn result_entry_rejects_rows_from_other_classes() {
    let storage = memory_storage().await;
    let admin_id = seed_admin(&storage).await;
    let app = init_app!(storage);
    let school = build_school!(app, admin_id);
    let admin = bearer(admin_id, UserRole::Admin);
    let teacher = bearer(school.teacher_id, UserRole::Instructor);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/admin/classes")
            .insert_header(admin.clone())
            .set_json(json!({ "name": "9", "section": "B" }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let other_class_id = body["classId"].as_i64().unwrap();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/admin/create-students")
            .insert_header(admin.clone())
            .set_json(json!({
                "username": "Ravi",
                "email": "ravi@school.test",
                "password": "student-pass",
                "enrollmentNumber": "ENR-002",
                "classId": other_class_id
            }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let other_student_id = body["studentId"].as_i64().unwrap();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/admin/exams")
            .insert_header(admin.clone())
            .set_json(json!({
                "name": "Midterm",
                "classId": other_class_id,
                "academicYear": "2024-2025",
                "date": "2024-10-02"
            }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let other_exam_id = body["examId"].as_i64().unwrap();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/teacher/results")
            .insert_header(teacher.clone())
            .set_json(json!({
                "studentId": other_student_id,
                "classSubjectId": school.class_subject_id,
                "examId": school.exam_id,
                "marksObtained": 70
            }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Student does not belong to this class");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/teacher/results")
            .insert_header(teacher.clone())
            .set_json(json!({
                "studentId": school.student_id,
                "classSubjectId": school.class_subject_id,
                "examId": other_exam_id,
                "marksObtained": 70
            }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Exam does not belong to this class");

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/student/results")
            .insert_header(bearer(school.student_user_id, UserRole::Student))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["results"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn max_marks_change_keeps_results_consistent() {
    let storage = memory_storage().await;
    let admin_id = seed_admin(&storage).await;
    let app = init_app!(storage);
    let school = build_school!(app, admin_id);
    let admin = bearer(admin_id, UserRole::Admin);
    let offering_uri = format!("/api/v1/admin/class-subjects/{}", school.class_subject_id);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/teacher/results")
            .insert_header(bearer(school.teacher_id, UserRole::Instructor))
            .set_json(json!({
                "studentId": school.student_id,
                "classSubjectId": school.class_subject_id,
                "examId": school.exam_id,
                "marksObtained": 76
            }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");

    // 低于已录入的 76 分
    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&offering_uri)
            .insert_header(admin.clone())
            .set_json(json!({ "maxMarks": 40 }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(body["message"], "maxMarks cannot be below marks already recorded");

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&offering_uri)
            .insert_header(admin.clone())
            .set_json(json!({ "maxMarks": 80 }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/student/results")
            .insert_header(bearer(school.student_user_id, UserRole::Student))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    let subject = &body["resultSheets"][0]["subjects"][0];
    assert_eq!(subject["grade"], "A+");
    assert_eq!(subject["maxMarks"], 80.0);
    assert_eq!(body["resultSheets"][0]["totals"]["percentage"], 95.0);
}

#[actix_web::test]
async fn teacher_views_are_scoped_to_assigned_classes() {
    let storage = memory_storage().await;
    let admin_id = seed_admin(&storage).await;
    let app = init_app!(storage);
    let school = build_school!(app, admin_id);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/teacher/students?classId={}", school.class_id))
            .insert_header(bearer(school.teacher_id, UserRole::Instructor))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["students"].as_array().unwrap().len(), 1);

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/teacher/exams?classId={}", school.class_id))
            .insert_header(bearer(school.other_teacher_id, UserRole::Instructor))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/teacher/exams")
            .insert_header(bearer(school.teacher_id, UserRole::Instructor))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/teacher/class-subjects")
            .insert_header(bearer(school.other_teacher_id, UserRole::Instructor))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(body["classSubjects"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn deleting_student_removes_login() {
    let storage = memory_storage().await;
    let admin_id = seed_admin(&storage).await;
    let app = init_app!(storage);
    let school = build_school!(app, admin_id);

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/students/{}", school.student_id))
            .insert_header(bearer(admin_id, UserRole::Admin))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("X-Forwarded-For", "10.3.0.1"))
            .set_json(json!({ "email": "asha@school.test", "password": "student-pass" }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // 删除后旧 token 对应的用户已不存在
    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(bearer(school.student_user_id, UserRole::Student))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

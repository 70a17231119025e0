use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::exams::requests::ExamQuery;
use crate::models::results::requests::AddResultRequest;
use crate::models::students::requests::ClassStudentsQuery;
use crate::models::users::entities::UserRole;
use crate::services::{ClassSubjectService, ExamService, ResultService, StudentService};

static CLASS_SUBJECT_SERVICE: Lazy<ClassSubjectService> =
    Lazy::new(ClassSubjectService::new_lazy);
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);
static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);
static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

pub async fn list_my_class_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SUBJECT_SERVICE.list_my_class_subjects(&req).await
}

pub async fn list_class_students(
    req: HttpRequest,
    query: web::Query<ClassStudentsQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_class_students(&req, query.into_inner())
        .await
}

pub async fn list_class_exams(
    req: HttpRequest,
    query: web::Query<ExamQuery>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_class_exams(&req, query.into_inner()).await
}

pub async fn add_result(
    req: HttpRequest,
    result_data: web::Json<AddResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .add_result(&req, result_data.into_inner())
        .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teacher")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles()))
                    .route("/class-subjects", web::get().to(list_my_class_subjects))
                    .route("/students", web::get().to(list_class_students))
                    .route("/exams", web::get().to(list_class_exams))
                    .route("/results", web::post().to(add_result)),
            ),
    );
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::class_subjects::requests::{
    ClassSubjectQuery, CreateClassSubjectRequest, UpdateClassSubjectRequest,
};
use crate::models::classes::requests::{CreateClassRequest, UpdateInchargeRequest};
use crate::models::exams::requests::{CreateExamRequest, ExamQuery};
use crate::models::students::requests::{
    CreateStudentRequest, ShiftClassRequest, UpdateStudentRequest,
};
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::services::{
    ClassService, ClassSubjectService, ExamService, StudentService, SubjectService, UserService,
};
use crate::utils::{SafeClassIdI64, SafeClassSubjectIdI64, SafeStudentIdI64};

// 懒加载的全局服务实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);
static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);
static CLASS_SUBJECT_SERVICE: Lazy<ClassSubjectService> =
    Lazy::new(ClassSubjectService::new_lazy);
static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

// 教师
pub async fn create_teacher(
    req: HttpRequest,
    user_data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .create_teacher(&req, user_data.into_inner())
        .await
}

pub async fn list_teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_teachers(&req).await
}

// 学生
pub async fn create_student(
    req: HttpRequest,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(&req, student_data.into_inner())
        .await
}

pub async fn list_students(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(&req).await
}

pub async fn update_student(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    update_data: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(&req, student_id.0, update_data.into_inner())
        .await
}

pub async fn delete_student(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(&req, student_id.0).await
}

pub async fn shift_class(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    shift_data: web::Json<ShiftClassRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .shift_class(&req, student_id.0, shift_data.into_inner())
        .await
}

// 班级
pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn list_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req).await
}

pub async fn update_incharge(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    incharge_data: web::Json<UpdateInchargeRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_incharge(&req, class_id.0, incharge_data.into_inner())
        .await
}

// 科目
pub async fn create_subject(
    req: HttpRequest,
    subject_data: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .create_subject(&req, subject_data.into_inner())
        .await
}

pub async fn list_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(&req).await
}

// 开课
pub async fn create_class_subject(
    req: HttpRequest,
    data: web::Json<CreateClassSubjectRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SUBJECT_SERVICE
        .create_class_subject(&req, data.into_inner())
        .await
}

pub async fn update_class_subject(
    req: HttpRequest,
    class_subject_id: SafeClassSubjectIdI64,
    data: web::Json<UpdateClassSubjectRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SUBJECT_SERVICE
        .update_class_subject(&req, class_subject_id.0, data.into_inner())
        .await
}

pub async fn list_class_subjects(
    req: HttpRequest,
    query: web::Query<ClassSubjectQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SUBJECT_SERVICE
        .list_class_subjects(&req, query.into_inner())
        .await
}

// 考试
pub async fn create_exam(
    req: HttpRequest,
    exam_data: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.create_exam(&req, exam_data.into_inner()).await
}

pub async fn list_exams(
    req: HttpRequest,
    query: web::Query<ExamQuery>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(&req, query.into_inner()).await
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("/create-teachers", web::post().to(create_teacher))
                    .route("/teachers", web::get().to(list_teachers))
                    .route("/create-students", web::post().to(create_student))
                    .route("/students", web::get().to(list_students))
                    .service(
                        web::resource("/students/{student_id}")
                            .route(web::put().to(update_student))
                            .route(web::delete().to(delete_student)),
                    )
                    .route(
                        "/students/{student_id}/shift-class",
                        web::put().to(shift_class),
                    )
                    .service(
                        web::resource("/classes")
                            .route(web::get().to(list_classes))
                            .route(web::post().to(create_class)),
                    )
                    .route(
                        "/classes/{class_id}/incharge",
                        web::put().to(update_incharge),
                    )
                    .service(
                        web::resource("/subjects")
                            .route(web::get().to(list_subjects))
                            .route(web::post().to(create_subject)),
                    )
                    .service(
                        web::resource("/class-subjects")
                            .route(web::get().to(list_class_subjects))
                            .route(web::post().to(create_class_subject)),
                    )
                    .route(
                        "/class-subjects/{class_subject_id}",
                        web::put().to(update_class_subject),
                    )
                    .service(
                        web::resource("/exams")
                            .route(web::get().to(list_exams))
                            .route(web::post().to(create_exam)),
                    ),
            ),
    );
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::StudentService;
use crate::errors::SchoolError;
use crate::models::students::requests::{StudentUpdate, UpdateStudentRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{normalize_email, required_text, validate_email};

// 只修改提供的字段；所有校验在写入前完成
pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    update_data: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(student) = storage.get_student_by_id(student_id).await? else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        )));
    };

    let mut update = StudentUpdate {
        username: required_text(update_data.username.as_deref()),
        ..Default::default()
    };

    if let Some(email) = required_text(update_data.email.as_deref()) {
        let email = normalize_email(&email);
        if let Err(msg) = validate_email(&email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
        if let Some(existing) = storage.get_user_by_email(&email).await?
            && existing.id != student.user_id
        {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "User with this email already exists",
            )));
        }
        update.email = Some(email);
    }

    if let Some(enrollment_number) = required_text(update_data.enrollment_number.as_deref()) {
        if let Some(existing) = storage
            .get_student_by_enrollment_number(&enrollment_number)
            .await?
            && existing.id != student.id
        {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentNumberExists,
                "Enrollment number already exists",
            )));
        }
        update.enrollment_number = Some(enrollment_number);
    }

    if let Some(class_id) = update_data.class_id {
        if storage.get_class_by_id(class_id).await?.is_none() {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        update.class_id = Some(class_id);
    }

    if let Some(password) = update_data.password.filter(|p| !p.is_empty()) {
        update.password_hash = Some(hash_password(&password)?);
    }

    match storage.update_student(student_id, update).await {
        Ok(Some(_)) => {
            info!("Student {} updated", student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(SchoolError::Conflict(detail)) => {
            warn!("Student update lost a uniqueness race: {}", detail);
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::Conflict,
                "Student already exists",
            )))
        }
        Err(e) => Err(e.into()),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::StudentService;
use crate::errors::SchoolError;
use crate::models::students::{
    requests::{CreateStudentRequest, NewStudent},
    responses::StudentCreatedResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{normalize_email, required_text, validate_email};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let (Some(username), Some(email), Some(password), Some(enrollment_number), Some(class_id)) = (
        required_text(student_data.username.as_deref()),
        required_text(student_data.email.as_deref()),
        student_data.password.filter(|p| !p.is_empty()),
        required_text(student_data.enrollment_number.as_deref()),
        student_data.class_id,
    ) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "username, email, password, enrollmentNumber and classId are required",
        )));
    };

    let email = normalize_email(&email);
    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    if storage.get_user_by_email(&email).await?.is_some() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserAlreadyExists,
            "User with this email already exists",
        )));
    }

    if storage
        .get_student_by_enrollment_number(&enrollment_number)
        .await?
        .is_some()
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentNumberExists,
            "Enrollment number already exists",
        )));
    }

    if storage.get_class_by_id(class_id).await?.is_none() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        )));
    }

    let password_hash = hash_password(&password)?;

    let new_student = NewStudent {
        username,
        email,
        password_hash,
        enrollment_number,
        class_id,
    };

    match storage.create_student(new_student).await {
        Ok((user, student)) => {
            info!(
                "Student {} ({}) created in class {}",
                student.id, student.enrollment_number, student.class_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                StudentCreatedResponse {
                    user_id: user.id,
                    student_id: student.id,
                },
                "Student created successfully",
            )))
        }
        Err(SchoolError::Conflict(detail)) => {
            warn!("Student creation lost a uniqueness race: {}", detail);
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::Conflict,
                "Student already exists",
            )))
        }
        Err(e) => Err(e.into()),
    }
}

pub mod create;
pub mod delete;
pub mod list;
pub mod list_for_teacher;
pub mod shift_class;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{
    ClassStudentsQuery, CreateStudentRequest, ShiftClassRequest, UpdateStudentRequest,
};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建学生（账号 + 学籍）
    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student_data: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, student_data).await
    }

    // 学生列表（管理员）
    pub async fn list_students(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_students(self, request).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        update_data: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, student_id, update_data).await
    }

    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id).await
    }

    // 调班
    pub async fn shift_class(
        &self,
        request: &HttpRequest,
        student_id: i64,
        shift_data: ShiftClassRequest,
    ) -> ActixResult<HttpResponse> {
        shift_class::shift_class(self, request, student_id, shift_data).await
    }

    // 教师查看自己任课班级的学生
    pub async fn list_class_students(
        &self,
        request: &HttpRequest,
        query: ClassStudentsQuery,
    ) -> ActixResult<HttpResponse> {
        list_for_teacher::list_class_students(self, request, query).await
    }
}

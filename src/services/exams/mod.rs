pub mod create;
pub mod list;
pub mod list_for_teacher;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exams::requests::{CreateExamRequest, ExamQuery};
use crate::storage::Storage;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
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

    pub async fn create_exam(
        &self,
        request: &HttpRequest,
        exam_data: CreateExamRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam(self, request, exam_data).await
    }

    pub async fn list_exams(
        &self,
        request: &HttpRequest,
        query: ExamQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_exams(self, request, query).await
    }

    // 教师只能查看自己任课班级的考试
    pub async fn list_class_exams(
        &self,
        request: &HttpRequest,
        query: ExamQuery,
    ) -> ActixResult<HttpResponse> {
        list_for_teacher::list_class_exams(self, request, query).await
    }
}

pub mod create;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::class_subjects::requests::{
    ClassSubjectQuery, CreateClassSubjectRequest, UpdateClassSubjectRequest,
};
use crate::storage::Storage;

pub struct ClassSubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassSubjectService {
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

    // 创建开课
    pub async fn create_class_subject(
        &self,
        request: &HttpRequest,
        data: CreateClassSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class_subject(self, request, data).await
    }

    // 更换任课教师或满分
    pub async fn update_class_subject(
        &self,
        request: &HttpRequest,
        class_subject_id: i64,
        data: UpdateClassSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class_subject(self, request, class_subject_id, data).await
    }

    // 管理员按班级/教师筛选开课
    pub async fn list_class_subjects(
        &self,
        request: &HttpRequest,
        query: ClassSubjectQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_class_subjects(self, request, query).await
    }

    // 教师查看自己的开课
    pub async fn list_my_class_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_class_subjects(self, request).await
    }
}

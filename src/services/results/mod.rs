pub mod add;
pub mod aggregate;
pub mod grading;
pub mod my_results;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::results::requests::AddResultRequest;
use crate::storage::Storage;

// 聚合成绩单时跳过的、考试已不存在的成绩行（进程级累计）
static UNRESOLVED_EXAM_ROWS: AtomicU64 = AtomicU64::new(0);

pub fn unresolved_exam_rows() -> u64 {
    UNRESOLVED_EXAM_ROWS.load(Ordering::Relaxed)
}

pub(crate) fn record_unresolved_exam_rows(count: usize) {
    UNRESOLVED_EXAM_ROWS.fetch_add(count as u64, Ordering::Relaxed);
}

pub struct ResultService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultService {
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

    // 教师录入成绩
    pub async fn add_result(
        &self,
        request: &HttpRequest,
        result_data: AddResultRequest,
    ) -> ActixResult<HttpResponse> {
        add::add_result(self, request, result_data).await
    }

    // 学生查看自己的成绩单
    pub async fn my_results(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        my_results::my_results(self, request).await
    }
}

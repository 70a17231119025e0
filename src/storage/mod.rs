use std::sync::Arc;

use crate::models::{
    class_subjects::{
        entities::{ClassSubject, ClassSubjectDetail},
        requests::{ClassSubjectQuery, ClassSubjectUpdate, NewClassSubject},
    },
    classes::{
        entities::{Class, ClassDetail, Section},
        requests::NewClass,
    },
    exams::{
        entities::{Exam, ExamDetail},
        requests::NewExam,
    },
    results::{
        entities::{ResultEntry, ResultRow},
        requests::NewResult,
    },
    students::{
        entities::{Student, StudentDetail},
        requests::{NewStudent, StudentUpdate},
    },
    subjects::entities::Subject,
    users::{
        entities::{User, UserRole},
        requests::NewUser,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

pub use sea_orm_storage::SeaOrmStorage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息（邮箱需已规范化）
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 按角色列出用户，按用户名排序
    async fn list_users_by_role(&self, role: UserRole) -> Result<Vec<User>>;
    // 统计某角色的用户数
    async fn count_users_by_role(&self, role: UserRole) -> Result<u64>;

    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: NewClass) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 通过名称与分组获取班级
    async fn get_class_by_name_and_section(
        &self,
        name: &str,
        section: Section,
    ) -> Result<Option<Class>>;
    // 获取带班主任信息的班级
    async fn get_class_detail(&self, class_id: i64) -> Result<Option<ClassDetail>>;
    // 列出班级，按名称、分组排序
    async fn list_classes(&self) -> Result<Vec<ClassDetail>>;
    // 指派班主任
    async fn update_class_incharge(&self, class_id: i64, incharge_id: i64)
    -> Result<Option<Class>>;

    /// 科目管理方法
    async fn create_subject(&self, name: &str) -> Result<Subject>;
    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>>;
    async fn get_subject_by_name(&self, name: &str) -> Result<Option<Subject>>;
    async fn list_subjects(&self) -> Result<Vec<Subject>>;

    /// 开课管理方法
    async fn create_class_subject(&self, class_subject: NewClassSubject) -> Result<ClassSubject>;
    async fn get_class_subject_by_id(&self, id: i64) -> Result<Option<ClassSubject>>;
    async fn get_class_subject_by_subject_and_class(
        &self,
        subject_id: i64,
        class_id: i64,
    ) -> Result<Option<ClassSubject>>;
    async fn update_class_subject(
        &self,
        id: i64,
        update: ClassSubjectUpdate,
    ) -> Result<Option<ClassSubject>>;
    async fn list_class_subjects(&self, query: ClassSubjectQuery)
    -> Result<Vec<ClassSubjectDetail>>;
    // 教师是否在该班级有开课
    async fn teacher_teaches_class(&self, teacher_id: i64, class_id: i64) -> Result<bool>;

    /// 考试管理方法
    async fn create_exam(&self, exam: NewExam) -> Result<Exam>;
    async fn get_exam_by_id(&self, exam_id: i64) -> Result<Option<Exam>>;
    async fn get_exam_by_name_class_year(
        &self,
        name: &str,
        class_id: i64,
        academic_year: &str,
    ) -> Result<Option<Exam>>;
    async fn list_exams(&self, class_id: Option<i64>) -> Result<Vec<ExamDetail>>;

    /// 学生管理方法
    // 在同一事务中创建账号与学籍
    async fn create_student(&self, student: NewStudent) -> Result<(User, Student)>;
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    async fn get_student_by_enrollment_number(
        &self,
        enrollment_number: &str,
    ) -> Result<Option<Student>>;
    // 列出学生，按学号排序，可按班级筛选
    async fn list_students(&self, class_id: Option<i64>) -> Result<Vec<StudentDetail>>;
    // 在同一事务中更新账号与学籍
    async fn update_student(
        &self,
        student_id: i64,
        update: StudentUpdate,
    ) -> Result<Option<Student>>;
    // 删除学籍及其账号，成绩随之级联删除
    async fn delete_student(&self, student_id: i64) -> Result<bool>;

    /// 成绩管理方法
    async fn create_result(&self, result: NewResult) -> Result<ResultEntry>;
    // 学生的全部成绩，关联考试、开课、科目与班级
    async fn list_results_for_student(&self, student_id: i64) -> Result<Vec<ResultRow>>;

    /// 生命周期
    // 关闭连接池
    async fn close(&self) -> Result<()>;
}

/// 按全局配置创建存储后端（运行迁移）
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

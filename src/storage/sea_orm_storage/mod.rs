//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod class_subjects;
mod classes;
mod exams;
mod lookup;
mod results;
mod students;
mod subjects;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{Result, SchoolError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 建立连接池并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        // 内存库每个连接都是独立的数据库，只能使用单连接且不能被回收
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(if in_memory {
                SqliteJournalMode::Memory
            } else {
                SqliteJournalMode::Wal
            })
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let mut pool_options = SqlitePoolOptions::new()
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout));

        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options
                .max_connections(config.pool_size)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 关闭连接池
    pub async fn close_impl(&self) -> Result<()> {
        self.db
            .clone()
            .close()
            .await
            .map_err(|e| SchoolError::database_connection(format!("关闭数据库连接失败: {e}")))
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_by_role(&self, role: UserRole) -> Result<Vec<User>> {
        self.list_users_by_role_impl(role).await
    }

    async fn count_users_by_role(&self, role: UserRole) -> Result<u64> {
        self.count_users_by_role_impl(role).await
    }

    // 班级模块
    async fn create_class(&self, class: NewClass) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_class_by_name_and_section(
        &self,
        name: &str,
        section: Section,
    ) -> Result<Option<Class>> {
        self.get_class_by_name_and_section_impl(name, section).await
    }

    async fn get_class_detail(&self, class_id: i64) -> Result<Option<ClassDetail>> {
        self.get_class_detail_impl(class_id).await
    }

    async fn list_classes(&self) -> Result<Vec<ClassDetail>> {
        self.list_classes_impl().await
    }

    async fn update_class_incharge(
        &self,
        class_id: i64,
        incharge_id: i64,
    ) -> Result<Option<Class>> {
        self.update_class_incharge_impl(class_id, incharge_id).await
    }

    // 科目模块
    async fn create_subject(&self, name: &str) -> Result<Subject> {
        self.create_subject_impl(name).await
    }

    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(subject_id).await
    }

    async fn get_subject_by_name(&self, name: &str) -> Result<Option<Subject>> {
        self.get_subject_by_name_impl(name).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    // 开课模块
    async fn create_class_subject(&self, class_subject: NewClassSubject) -> Result<ClassSubject> {
        self.create_class_subject_impl(class_subject).await
    }

    async fn get_class_subject_by_id(&self, id: i64) -> Result<Option<ClassSubject>> {
        self.get_class_subject_by_id_impl(id).await
    }

    async fn get_class_subject_by_subject_and_class(
        &self,
        subject_id: i64,
        class_id: i64,
    ) -> Result<Option<ClassSubject>> {
        self.get_class_subject_by_subject_and_class_impl(subject_id, class_id)
            .await
    }

    async fn update_class_subject(
        &self,
        id: i64,
        update: ClassSubjectUpdate,
    ) -> Result<Option<ClassSubject>> {
        self.update_class_subject_impl(id, update).await
    }

    async fn list_class_subjects(
        &self,
        query: ClassSubjectQuery,
    ) -> Result<Vec<ClassSubjectDetail>> {
        self.list_class_subjects_impl(query).await
    }

    async fn teacher_teaches_class(&self, teacher_id: i64, class_id: i64) -> Result<bool> {
        self.teacher_teaches_class_impl(teacher_id, class_id).await
    }

    // 考试模块
    async fn create_exam(&self, exam: NewExam) -> Result<Exam> {
        self.create_exam_impl(exam).await
    }

    async fn get_exam_by_id(&self, exam_id: i64) -> Result<Option<Exam>> {
        self.get_exam_by_id_impl(exam_id).await
    }

    async fn get_exam_by_name_class_year(
        &self,
        name: &str,
        class_id: i64,
        academic_year: &str,
    ) -> Result<Option<Exam>> {
        self.get_exam_by_name_class_year_impl(name, class_id, academic_year)
            .await
    }

    async fn list_exams(&self, class_id: Option<i64>) -> Result<Vec<ExamDetail>> {
        self.list_exams_impl(class_id).await
    }

    // 学生模块
    async fn create_student(&self, student: NewStudent) -> Result<(User, Student)> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(student_id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn get_student_by_enrollment_number(
        &self,
        enrollment_number: &str,
    ) -> Result<Option<Student>> {
        self.get_student_by_enrollment_number_impl(enrollment_number)
            .await
    }

    async fn list_students(&self, class_id: Option<i64>) -> Result<Vec<StudentDetail>> {
        self.list_students_impl(class_id).await
    }

    async fn update_student(
        &self,
        student_id: i64,
        update: StudentUpdate,
    ) -> Result<Option<Student>> {
        self.update_student_impl(student_id, update).await
    }

    async fn delete_student(&self, student_id: i64) -> Result<bool> {
        self.delete_student_impl(student_id).await
    }

    // 成绩模块
    async fn create_result(&self, result: NewResult) -> Result<ResultEntry> {
        self.create_result_impl(result).await
    }

    async fn list_results_for_student(&self, student_id: i64) -> Result<Vec<ResultRow>> {
        self.list_results_for_student_impl(student_id).await
    }

    async fn close(&self) -> Result<()> {
        self.close_impl().await
    }
}

use std::sync::Arc;

use crate::models::{
    classes::{
        entities::SchoolClass,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    enrollments::{
        entities::Enrollment, requests::EnrollmentListQuery, responses::EnrollmentListResponse,
    },
    schedules::{
        entities::{ScheduleEntry, Weekday},
        requests::ScheduleSlot,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery},
        responses::StudentListResponse,
    },
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
};

use crate::errors::Result;
use crate::validators::ValidationLookup;

pub mod sea_orm_storage;

/// 数据访问接口
///
/// 写入方法假定调用方已完成形状校验与业务校验；多行写入在单个事务内完成。
/// 唯一索引冲突统一映射为 `DuplicateKey`。
#[async_trait::async_trait]
pub trait Storage: ValidationLookup + Send + Sync {
    /// 班级管理方法
    // 创建班级（同时写入任课教师与初始学生名单）
    async fn create_class(&self, class: CreateClassRequest) -> Result<SchoolClass>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<SchoolClass>>;
    // 列出班级
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 更新班级信息，名单字段为 Some 时整体替换
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<SchoolClass>>;
    // 删除班级
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    /// 注册管理方法
    // 将学生注册到班级，同学年其他班级的有效注册会被置为无效
    async fn enroll_student(&self, class_id: i64, student_id: i64) -> Result<Enrollment>;
    // 学生在该班级的有效注册
    async fn get_active_enrollment(
        &self,
        class_id: i64,
        student_id: i64,
    ) -> Result<Option<Enrollment>>;
    // 撤销注册（置为无效并解除学生的班级归属）
    async fn withdraw_enrollment(
        &self,
        class_id: i64,
        enrollment_id: i64,
    ) -> Result<Option<Enrollment>>;
    // 列出班级注册记录
    async fn list_class_enrollments_with_pagination(
        &self,
        class_id: i64,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse>;

    /// 学生管理方法
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn delete_student(&self, student_id: i64) -> Result<bool>;

    /// 教师管理方法
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, teacher_id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse>;
    async fn update_teacher(
        &self,
        teacher_id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, teacher_id: i64) -> Result<bool>;

    /// 学科管理方法
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse>;
    async fn update_subject(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, subject_id: i64) -> Result<bool>;

    /// 课表管理方法
    async fn create_schedule(&self, teacher_id: i64, slot: ScheduleSlot) -> Result<ScheduleEntry>;
    // 获取属于该教师的课表条目
    async fn get_schedule_by_id(
        &self,
        teacher_id: i64,
        schedule_id: i64,
    ) -> Result<Option<ScheduleEntry>>;
    // 按星期、开始时间排序
    async fn list_teacher_schedules(
        &self,
        teacher_id: i64,
        weekday: Option<Weekday>,
    ) -> Result<Vec<ScheduleEntry>>;
    async fn update_schedule(
        &self,
        schedule_id: i64,
        slot: ScheduleSlot,
    ) -> Result<Option<ScheduleEntry>>;
    async fn delete_schedule(&self, teacher_id: i64, schedule_id: i64) -> Result<bool>;

    /// 系统方法
    // 数据库连通性检查
    async fn ping(&self) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

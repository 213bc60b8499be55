//! 学籍注册存储操作

use super::{SeaOrmStorage, map_write_err};
use crate::entity::classes::Entity as Classes;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments, Model};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SISError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    enrollments::{
        entities::{Enrollment, EnrollmentStatus},
        requests::EnrollmentListQuery,
        responses::EnrollmentListResponse,
    },
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 将学生注册到班级
///
/// 学生在同一学年其他班级的有效注册被置为无效（转班），并更新学生的当前班级。
pub(super) async fn activate_enrollment<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
    academic_year: i32,
    student_id: i64,
    now: i64,
) -> Result<Model> {
    Enrollments::update_many()
        .col_expr(Column::Status, Expr::value(EnrollmentStatus::INACTIVE))
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::StudentId.eq(student_id))
        .filter(Column::AcademicYear.eq(academic_year))
        .filter(Column::Status.eq(EnrollmentStatus::ACTIVE))
        .exec(conn)
        .await
        .map_err(|e| SISError::database_operation(format!("停用旧注册失败: {e}")))?;

    let model = ActiveModel {
        student_id: Set(student_id),
        class_id: Set(class_id),
        academic_year: Set(academic_year),
        status: Set(EnrollmentStatus::ACTIVE.to_string()),
        enrolled_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let enrollment = model
        .insert(conn)
        .await
        .map_err(|e| map_write_err("创建注册失败", e))?;

    Students::update_many()
        .col_expr(StudentColumn::ClassId, Expr::value(class_id))
        .col_expr(StudentColumn::UpdatedAt, Expr::value(now))
        .filter(StudentColumn::Id.eq(student_id))
        .exec(conn)
        .await
        .map_err(|e| SISError::database_operation(format!("更新学生班级失败: {e}")))?;

    Ok(enrollment)
}

/// 停用这些学生在本班的有效注册，并解除其班级归属
pub(super) async fn deactivate_enrollments<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
    student_ids: &[i64],
    now: i64,
) -> Result<()> {
    if student_ids.is_empty() {
        return Ok(());
    }

    Enrollments::update_many()
        .col_expr(Column::Status, Expr::value(EnrollmentStatus::INACTIVE))
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::ClassId.eq(class_id))
        .filter(Column::StudentId.is_in(student_ids.to_vec()))
        .filter(Column::Status.eq(EnrollmentStatus::ACTIVE))
        .exec(conn)
        .await
        .map_err(|e| SISError::database_operation(format!("停用注册失败: {e}")))?;

    Students::update_many()
        .col_expr(StudentColumn::ClassId, Expr::value(Option::<i64>::None))
        .col_expr(StudentColumn::UpdatedAt, Expr::value(now))
        .filter(StudentColumn::Id.is_in(student_ids.to_vec()))
        .filter(StudentColumn::ClassId.eq(class_id))
        .exec(conn)
        .await
        .map_err(|e| SISError::database_operation(format!("解除学生班级失败: {e}")))?;

    Ok(())
}

impl SeaOrmStorage {
    /// 注册学生到班级
    pub async fn enroll_student_impl(&self, class_id: i64, student_id: i64) -> Result<Enrollment> {
        let class = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SISError::database_operation(format!("查询班级失败: {e}")))?
            .ok_or_else(|| SISError::not_found(format!("Class {class_id} not found")))?;

        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SISError::database_operation(format!("开启事务失败: {e}")))?;

        let enrollment =
            activate_enrollment(&txn, class_id, class.academic_year, student_id, now).await?;

        txn.commit()
            .await
            .map_err(|e| SISError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(enrollment.into_enrollment())
    }

    /// 学生在班级中的有效注册
    pub async fn get_active_enrollment_impl(
        &self,
        class_id: i64,
        student_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.eq(EnrollmentStatus::ACTIVE))
            .one(&self.db)
            .await
            .map_err(|e| SISError::database_operation(format!("查询注册失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 撤销注册
    pub async fn withdraw_enrollment_impl(
        &self,
        class_id: i64,
        enrollment_id: i64,
    ) -> Result<Option<Enrollment>> {
        let Some(existing) = Enrollments::find_by_id(enrollment_id)
            .filter(Column::ClassId.eq(class_id))
            .one(&self.db)
            .await
            .map_err(|e| SISError::database_operation(format!("查询注册失败: {e}")))?
        else {
            return Ok(None);
        };

        if existing.status != EnrollmentStatus::ACTIVE {
            // 已经无效，幂等返回
            return Ok(Some(existing.into_enrollment()));
        }

        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SISError::database_operation(format!("开启事务失败: {e}")))?;

        deactivate_enrollments(&txn, class_id, &[existing.student_id], now).await?;

        txn.commit()
            .await
            .map_err(|e| SISError::database_operation(format!("提交事务失败: {e}")))?;

        let updated = Enrollments::find_by_id(enrollment_id)
            .one(&self.db)
            .await
            .map_err(|e| SISError::database_operation(format!("查询注册失败: {e}")))?;

        Ok(updated.map(|m| m.into_enrollment()))
    }

    /// 分页列出班级注册记录
    pub async fn list_class_enrollments_with_pagination_impl(
        &self,
        class_id: i64,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Enrollments::find().filter(Column::ClassId.eq(class_id));

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select
            .order_by_desc(Column::EnrolledAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SISError::database_operation(format!("查询注册总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SISError::database_operation(format!("查询注册页数失败: {e}")))?;

        let enrollments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SISError::database_operation(format!("查询注册列表失败: {e}")))?;

        Ok(EnrollmentListResponse {
            items: enrollments
                .into_iter()
                .map(|m| m.into_enrollment())
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}

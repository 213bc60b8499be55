//! 班级存储操作

use std::collections::HashMap;

use super::enrollments::{activate_enrollment, deactivate_enrollments};
use super::{SeaOrmStorage, map_write_err};
use crate::entity::class_teachers::{
    ActiveModel as ClassTeacherActiveModel, Column as ClassTeacherColumn,
    Entity as ClassTeachers,
};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SISError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    classes::{
        entities::SchoolClass,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    enrollments::entities::EnrollmentStatus,
};
use crate::utils::escape_like_pattern;
use crate::utils::validate::dedup_ids;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 班级的任课教师 ID
async fn load_teacher_ids<C: ConnectionTrait>(conn: &C, class_id: i64) -> Result<Vec<i64>> {
    ClassTeachers::find()
        .select_only()
        .column(ClassTeacherColumn::TeacherId)
        .filter(ClassTeacherColumn::ClassId.eq(class_id))
        .order_by_asc(ClassTeacherColumn::TeacherId)
        .into_tuple::<i64>()
        .all(conn)
        .await
        .map_err(|e| SISError::database_operation(format!("查询班级教师失败: {e}")))
}

/// 班级当前有效注册人数
pub(super) async fn count_active_enrollments<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
) -> Result<i64> {
    let count = Enrollments::find()
        .filter(EnrollmentColumn::ClassId.eq(class_id))
        .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::ACTIVE))
        .count(conn)
        .await
        .map_err(|e| SISError::database_operation(format!("统计班级注册人数失败: {e}")))?;
    Ok(count as i64)
}

/// 整体替换班级任课教师
async fn replace_teacher_links<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
    teacher_ids: &[i64],
) -> Result<()> {
    ClassTeachers::delete_many()
        .filter(ClassTeacherColumn::ClassId.eq(class_id))
        .exec(conn)
        .await
        .map_err(|e| SISError::database_operation(format!("清除班级教师失败: {e}")))?;

    let links: Vec<ClassTeacherActiveModel> = dedup_ids(teacher_ids)
        .into_iter()
        .map(|teacher_id| ClassTeacherActiveModel {
            class_id: Set(class_id),
            teacher_id: Set(teacher_id),
            ..Default::default()
        })
        .collect();

    if !links.is_empty() {
        ClassTeachers::insert_many(links)
            .exec(conn)
            .await
            .map_err(|e| map_write_err("写入班级教师失败", e))?;
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<SchoolClass> {
        let now = chrono::Utc::now().timestamp();
        let academic_year = req.academic_year;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SISError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            name: Set(req.name),
            academic_year: Set(academic_year),
            shift: Set(req.shift.to_string()),
            capacity: Set(req.capacity),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let class = model
            .insert(&txn)
            .await
            .map_err(|e| map_write_err("创建班级失败", e))?;

        replace_teacher_links(&txn, class.id, &req.teacher_ids).await?;

        for student_id in dedup_ids(&req.student_ids) {
            activate_enrollment(&txn, class.id, academic_year, student_id, now).await?;
        }

        txn.commit()
            .await
            .map_err(|e| SISError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_class_by_id_impl(class.id)
            .await?
            .ok_or_else(|| SISError::database_operation("班级创建后无法读取"))
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<SchoolClass>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SISError::database_operation(format!("查询班级失败: {e}")))?;

        let Some(model) = result else {
            return Ok(None);
        };

        let teacher_ids = load_teacher_ids(&self.db, class_id).await?;
        let active = count_active_enrollments(&self.db, class_id).await?;

        Ok(Some(model.into_class(teacher_ids, active)))
    }

    /// 分页列出班级
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Classes::find();

        if let Some(academic_year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year));
        }

        if let Some(shift) = query.shift {
            select = select.filter(Column::Shift.eq(shift.to_string()));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        // 排序：最新学年在前，同学年按名称
        select = select
            .order_by_desc(Column::AcademicYear)
            .order_by_asc(Column::Name);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SISError::database_operation(format!("查询班级总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SISError::database_operation(format!("查询班级页数失败: {e}")))?;

        let classes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SISError::database_operation(format!("查询班级列表失败: {e}")))?;

        // 批量补充任课教师与注册人数，避免逐个查询
        let ids: Vec<i64> = classes.iter().map(|c| c.id).collect();
        let mut teachers: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut active: HashMap<i64, i64> = HashMap::new();

        if !ids.is_empty() {
            let links = ClassTeachers::find()
                .filter(ClassTeacherColumn::ClassId.is_in(ids.clone()))
                .order_by_asc(ClassTeacherColumn::TeacherId)
                .all(&self.db)
                .await
                .map_err(|e| SISError::database_operation(format!("查询班级教师失败: {e}")))?;
            for link in links {
                teachers.entry(link.class_id).or_default().push(link.teacher_id);
            }

            let enrolled: Vec<i64> = Enrollments::find()
                .select_only()
                .column(EnrollmentColumn::ClassId)
                .filter(EnrollmentColumn::ClassId.is_in(ids))
                .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::ACTIVE))
                .into_tuple::<i64>()
                .all(&self.db)
                .await
                .map_err(|e| {
                    SISError::database_operation(format!("统计班级注册人数失败: {e}"))
                })?;
            for class_id in enrolled {
                *active.entry(class_id).or_default() += 1;
            }
        }

        Ok(ClassListResponse {
            items: classes
                .into_iter()
                .map(|m| {
                    let teacher_ids = teachers.remove(&m.id).unwrap_or_default();
                    let count = active.get(&m.id).copied().unwrap_or(0);
                    m.into_class(teacher_ids, count)
                })
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新班级信息
    ///
    /// `student_ids` 为 Some 时替换学生名单：名单外的有效注册被置为无效，
    /// 名单内尚未注册的学生被注册到本班。
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<SchoolClass>> {
        // 先检查班级是否存在
        let Some(existing) = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SISError::database_operation(format!("查询班级失败: {e}")))?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();
        let academic_year = update.academic_year.unwrap_or(existing.academic_year);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SISError::database_operation(format!("开启事务失败: {e}")))?;

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(year) = update.academic_year {
            model.academic_year = Set(year);
        }

        if let Some(shift) = update.shift {
            model.shift = Set(shift.to_string());
        }

        if let Some(capacity) = update.capacity {
            model.capacity = Set(capacity);
        }

        model
            .update(&txn)
            .await
            .map_err(|e| map_write_err("更新班级失败", e))?;

        // 学年变化时，有效注册随班级迁移到新学年；
        // 这些学生在新学年其他班级的有效注册被置为无效
        if academic_year != existing.academic_year {
            let moved: Vec<i64> = Enrollments::find()
                .select_only()
                .column(EnrollmentColumn::StudentId)
                .filter(EnrollmentColumn::ClassId.eq(class_id))
                .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::ACTIVE))
                .into_tuple::<i64>()
                .all(&txn)
                .await
                .map_err(|e| SISError::database_operation(format!("查询班级名单失败: {e}")))?;

            if !moved.is_empty() {
                Enrollments::update_many()
                    .col_expr(
                        EnrollmentColumn::Status,
                        Expr::value(EnrollmentStatus::INACTIVE),
                    )
                    .col_expr(EnrollmentColumn::UpdatedAt, Expr::value(now))
                    .filter(EnrollmentColumn::StudentId.is_in(moved.clone()))
                    .filter(EnrollmentColumn::AcademicYear.eq(academic_year))
                    .filter(EnrollmentColumn::ClassId.ne(class_id))
                    .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::ACTIVE))
                    .exec(&txn)
                    .await
                    .map_err(|e| {
                        SISError::database_operation(format!("停用新学年其他注册失败: {e}"))
                    })?;

                Students::update_many()
                    .col_expr(StudentColumn::ClassId, Expr::value(class_id))
                    .col_expr(StudentColumn::UpdatedAt, Expr::value(now))
                    .filter(StudentColumn::Id.is_in(moved))
                    .exec(&txn)
                    .await
                    .map_err(|e| SISError::database_operation(format!("更新学生班级失败: {e}")))?;
            }

            Enrollments::update_many()
                .col_expr(EnrollmentColumn::AcademicYear, Expr::value(academic_year))
                .col_expr(EnrollmentColumn::UpdatedAt, Expr::value(now))
                .filter(EnrollmentColumn::ClassId.eq(class_id))
                .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::ACTIVE))
                .exec(&txn)
                .await
                .map_err(|e| SISError::database_operation(format!("更新注册学年失败: {e}")))?;
        }

        if let Some(teacher_ids) = update.teacher_ids {
            replace_teacher_links(&txn, class_id, &teacher_ids).await?;
        }

        if let Some(student_ids) = update.student_ids {
            let wanted = dedup_ids(&student_ids);

            let current: Vec<i64> = Enrollments::find()
                .select_only()
                .column(EnrollmentColumn::StudentId)
                .filter(EnrollmentColumn::ClassId.eq(class_id))
                .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::ACTIVE))
                .into_tuple::<i64>()
                .all(&txn)
                .await
                .map_err(|e| SISError::database_operation(format!("查询班级名单失败: {e}")))?;

            let removed: Vec<i64> = current
                .iter()
                .copied()
                .filter(|id| !wanted.contains(id))
                .collect();
            deactivate_enrollments(&txn, class_id, &removed, now).await?;

            for student_id in wanted.into_iter().filter(|id| !current.contains(id)) {
                activate_enrollment(&txn, class_id, academic_year, student_id, now).await?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| SISError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_class_by_id_impl(class_id).await
    }

    /// 删除班级
    ///
    /// 学生保留但解除班级归属；注册记录与任课关系一并删除。
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SISError::database_operation(format!("开启事务失败: {e}")))?;

        Students::update_many()
            .col_expr(StudentColumn::ClassId, Expr::value(Option::<i64>::None))
            .filter(StudentColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| SISError::database_operation(format!("解除学生班级失败: {e}")))?;

        Enrollments::delete_many()
            .filter(EnrollmentColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| SISError::database_operation(format!("删除班级注册失败: {e}")))?;

        ClassTeachers::delete_many()
            .filter(ClassTeacherColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| SISError::database_operation(format!("删除班级教师失败: {e}")))?;

        let result = Classes::delete_by_id(class_id)
            .exec(&txn)
            .await
            .map_err(|e| SISError::database_operation(format!("删除班级失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SISError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

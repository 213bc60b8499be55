//! 教师存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, map_write_err};
use crate::entity::class_teachers::{Column as ClassTeacherColumn, Entity as ClassTeachers};
use crate::entity::schedules::{Column as ScheduleColumn, Entity as Schedules};
use crate::entity::teacher_subjects::{
    ActiveModel as TeacherSubjectActiveModel, Column as TeacherSubjectColumn,
    Entity as TeacherSubjects,
};
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{Result, SISError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
};
use crate::utils::escape_like_pattern;
use crate::utils::validate::dedup_ids;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 教师任教的学科 ID
async fn load_subject_ids<C: ConnectionTrait>(conn: &C, teacher_id: i64) -> Result<Vec<i64>> {
    TeacherSubjects::find()
        .select_only()
        .column(TeacherSubjectColumn::SubjectId)
        .filter(TeacherSubjectColumn::TeacherId.eq(teacher_id))
        .order_by_asc(TeacherSubjectColumn::SubjectId)
        .into_tuple::<i64>()
        .all(conn)
        .await
        .map_err(|e| SISError::database_operation(format!("查询教师学科失败: {e}")))
}

/// 整体替换教师-学科关联
///
/// 学科侧的替换同样调用此函数，`owner` 决定按哪一列清除。
pub(super) async fn replace_teacher_subject_links<C: ConnectionTrait>(
    conn: &C,
    owner: LinkOwner,
    pairs: Vec<(i64, i64)>,
) -> Result<()> {
    let clear = match owner {
        LinkOwner::Teacher(teacher_id) => TeacherSubjectColumn::TeacherId.eq(teacher_id),
        LinkOwner::Subject(subject_id) => TeacherSubjectColumn::SubjectId.eq(subject_id),
    };

    TeacherSubjects::delete_many()
        .filter(clear)
        .exec(conn)
        .await
        .map_err(|e| SISError::database_operation(format!("清除教师学科关联失败: {e}")))?;

    let links: Vec<TeacherSubjectActiveModel> = pairs
        .into_iter()
        .map(|(teacher_id, subject_id)| TeacherSubjectActiveModel {
            teacher_id: Set(teacher_id),
            subject_id: Set(subject_id),
            ..Default::default()
        })
        .collect();

    if !links.is_empty() {
        TeacherSubjects::insert_many(links)
            .exec(conn)
            .await
            .map_err(|e| map_write_err("写入教师学科关联失败", e))?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub(super) enum LinkOwner {
    Teacher(i64),
    Subject(i64),
}

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SISError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            user_id: Set(req.user_id),
            full_name: Set(req.full_name),
            email: Set(req.email),
            phone: Set(req.phone),
            specialization: Set(req.specialization),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let teacher = model
            .insert(&txn)
            .await
            .map_err(|e| map_write_err("创建教师失败", e))?;

        let pairs = dedup_ids(&req.subject_ids)
            .into_iter()
            .map(|subject_id| (teacher.id, subject_id))
            .collect();
        replace_teacher_subject_links(&txn, LinkOwner::Teacher(teacher.id), pairs).await?;

        txn.commit()
            .await
            .map_err(|e| SISError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_teacher_by_id_impl(teacher.id)
            .await?
            .ok_or_else(|| SISError::database_operation("教师创建后无法读取"))
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, teacher_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(teacher_id)
            .one(&self.db)
            .await
            .map_err(|e| SISError::database_operation(format!("查询教师失败: {e}")))?;

        match result {
            Some(model) => {
                let subject_ids = load_subject_ids(&self.db, teacher_id).await?;
                Ok(Some(model.into_teacher(subject_ids)))
            }
            None => Ok(None),
        }
    }

    /// 分页列出教师
    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Teachers::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::FullName.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        select = select.order_by_asc(Column::FullName).order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SISError::database_operation(format!("查询教师总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SISError::database_operation(format!("查询教师页数失败: {e}")))?;

        let teachers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SISError::database_operation(format!("查询教师列表失败: {e}")))?;

        let ids: Vec<i64> = teachers.iter().map(|t| t.id).collect();
        let mut subjects: HashMap<i64, Vec<i64>> = HashMap::new();
        if !ids.is_empty() {
            let links = TeacherSubjects::find()
                .filter(TeacherSubjectColumn::TeacherId.is_in(ids))
                .order_by_asc(TeacherSubjectColumn::SubjectId)
                .all(&self.db)
                .await
                .map_err(|e| SISError::database_operation(format!("查询教师学科失败: {e}")))?;
            for link in links {
                subjects
                    .entry(link.teacher_id)
                    .or_default()
                    .push(link.subject_id);
            }
        }

        Ok(TeacherListResponse {
            items: teachers
                .into_iter()
                .map(|m| {
                    let subject_ids = subjects.remove(&m.id).unwrap_or_default();
                    m.into_teacher(subject_ids)
                })
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新教师信息
    pub async fn update_teacher_impl(
        &self,
        teacher_id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        // 先检查教师是否存在
        let existing = Teachers::find_by_id(teacher_id)
            .one(&self.db)
            .await
            .map_err(|e| SISError::database_operation(format!("查询教师失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SISError::database_operation(format!("开启事务失败: {e}")))?;

        let mut model = ActiveModel {
            id: Set(teacher_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(user_id) = update.user_id {
            model.user_id = Set(Some(user_id));
        }

        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        // 空串表示清空
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone).filter(|v| !v.is_empty()));
        }

        if let Some(specialization) = update.specialization {
            model.specialization = Set(Some(specialization).filter(|v| !v.is_empty()));
        }

        model
            .update(&txn)
            .await
            .map_err(|e| map_write_err("更新教师失败", e))?;

        if let Some(subject_ids) = update.subject_ids {
            let pairs = dedup_ids(&subject_ids)
                .into_iter()
                .map(|subject_id| (teacher_id, subject_id))
                .collect();
            replace_teacher_subject_links(&txn, LinkOwner::Teacher(teacher_id), pairs).await?;
        }

        txn.commit()
            .await
            .map_err(|e| SISError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_teacher_by_id_impl(teacher_id).await
    }

    /// 删除教师及其课表、任教关系
    pub async fn delete_teacher_impl(&self, teacher_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SISError::database_operation(format!("开启事务失败: {e}")))?;

        Schedules::delete_many()
            .filter(ScheduleColumn::TeacherId.eq(teacher_id))
            .exec(&txn)
            .await
            .map_err(|e| SISError::database_operation(format!("删除教师课表失败: {e}")))?;

        TeacherSubjects::delete_many()
            .filter(TeacherSubjectColumn::TeacherId.eq(teacher_id))
            .exec(&txn)
            .await
            .map_err(|e| SISError::database_operation(format!("删除教师学科关联失败: {e}")))?;

        ClassTeachers::delete_many()
            .filter(ClassTeacherColumn::TeacherId.eq(teacher_id))
            .exec(&txn)
            .await
            .map_err(|e| SISError::database_operation(format!("删除教师班级关联失败: {e}")))?;

        let result = Teachers::delete_by_id(teacher_id)
            .exec(&txn)
            .await
            .map_err(|e| SISError::database_operation(format!("删除教师失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SISError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

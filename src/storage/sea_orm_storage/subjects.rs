//! 学科存储操作

use std::collections::HashMap;

use super::teachers::{LinkOwner, replace_teacher_subject_links};
use super::{SeaOrmStorage, map_write_err};
use crate::entity::schedules::{Column as ScheduleColumn, Entity as Schedules};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::entity::teacher_subjects::{Column as TeacherSubjectColumn, Entity as TeacherSubjects};
use crate::errors::{Result, SISError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
};
use crate::utils::escape_like_pattern;
use crate::utils::validate::dedup_ids;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

async fn load_teacher_ids<C: ConnectionTrait>(conn: &C, subject_id: i64) -> Result<Vec<i64>> {
    TeacherSubjects::find()
        .select_only()
        .column(TeacherSubjectColumn::TeacherId)
        .filter(TeacherSubjectColumn::SubjectId.eq(subject_id))
        .order_by_asc(TeacherSubjectColumn::TeacherId)
        .into_tuple::<i64>()
        .all(conn)
        .await
        .map_err(|e| SISError::database_operation(format!("查询学科教师失败: {e}")))
}

impl SeaOrmStorage {
    /// 创建学科
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SISError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            category: Set(req.category),
            workload_hours: Set(req.workload_hours),
            credits: Set(req.credits),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let subject = model
            .insert(&txn)
            .await
            .map_err(|e| map_write_err("创建学科失败", e))?;

        let pairs = dedup_ids(&req.teacher_ids)
            .into_iter()
            .map(|teacher_id| (teacher_id, subject.id))
            .collect();
        replace_teacher_subject_links(&txn, LinkOwner::Subject(subject.id), pairs).await?;

        txn.commit()
            .await
            .map_err(|e| SISError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_subject_by_id_impl(subject.id)
            .await?
            .ok_or_else(|| SISError::database_operation("学科创建后无法读取"))
    }

    /// 通过 ID 获取学科
    pub async fn get_subject_by_id_impl(&self, subject_id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(subject_id)
            .one(&self.db)
            .await
            .map_err(|e| SISError::database_operation(format!("查询学科失败: {e}")))?;

        match result {
            Some(model) => {
                let teacher_ids = load_teacher_ids(&self.db, subject_id).await?;
                Ok(Some(model.into_subject(teacher_ids)))
            }
            None => Ok(None),
        }
    }

    /// 分页列出学科
    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Subjects::find();

        if let Some(ref category) = query.category
            && !category.trim().is_empty()
        {
            select = select.filter(Column::Category.eq(category.trim()));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Code.contains(escaped.to_uppercase())),
            );
        }

        select = select.order_by_asc(Column::Code);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SISError::database_operation(format!("查询学科总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SISError::database_operation(format!("查询学科页数失败: {e}")))?;

        let subjects = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SISError::database_operation(format!("查询学科列表失败: {e}")))?;

        let ids: Vec<i64> = subjects.iter().map(|s| s.id).collect();
        let mut teachers: HashMap<i64, Vec<i64>> = HashMap::new();
        if !ids.is_empty() {
            let links = TeacherSubjects::find()
                .filter(TeacherSubjectColumn::SubjectId.is_in(ids))
                .order_by_asc(TeacherSubjectColumn::TeacherId)
                .all(&self.db)
                .await
                .map_err(|e| SISError::database_operation(format!("查询学科教师失败: {e}")))?;
            for link in links {
                teachers
                    .entry(link.subject_id)
                    .or_default()
                    .push(link.teacher_id);
            }
        }

        Ok(SubjectListResponse {
            items: subjects
                .into_iter()
                .map(|m| {
                    let teacher_ids = teachers.remove(&m.id).unwrap_or_default();
                    m.into_subject(teacher_ids)
                })
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新学科信息
    pub async fn update_subject_impl(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        let existing = Subjects::find_by_id(subject_id)
            .one(&self.db)
            .await
            .map_err(|e| SISError::database_operation(format!("查询学科失败: {e}")))?;
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
            id: Set(subject_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(code) = update.code {
            model.code = Set(code);
        }

        if let Some(category) = update.category {
            model.category = Set(category);
        }

        if let Some(workload_hours) = update.workload_hours {
            model.workload_hours = Set(workload_hours);
        }

        if let Some(credits) = update.credits {
            model.credits = Set(Some(credits));
        }

        model
            .update(&txn)
            .await
            .map_err(|e| map_write_err("更新学科失败", e))?;

        if let Some(teacher_ids) = update.teacher_ids {
            let pairs = dedup_ids(&teacher_ids)
                .into_iter()
                .map(|teacher_id| (teacher_id, subject_id))
                .collect();
            replace_teacher_subject_links(&txn, LinkOwner::Subject(subject_id), pairs).await?;
        }

        txn.commit()
            .await
            .map_err(|e| SISError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_subject_by_id_impl(subject_id).await
    }

    /// 删除学科及其课表条目、任教关系
    pub async fn delete_subject_impl(&self, subject_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SISError::database_operation(format!("开启事务失败: {e}")))?;

        Schedules::delete_many()
            .filter(ScheduleColumn::SubjectId.eq(subject_id))
            .exec(&txn)
            .await
            .map_err(|e| SISError::database_operation(format!("删除学科课表失败: {e}")))?;

        TeacherSubjects::delete_many()
            .filter(TeacherSubjectColumn::SubjectId.eq(subject_id))
            .exec(&txn)
            .await
            .map_err(|e| SISError::database_operation(format!("删除学科教师关联失败: {e}")))?;

        let result = Subjects::delete_by_id(subject_id)
            .exec(&txn)
            .await
            .map_err(|e| SISError::database_operation(format!("删除学科失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SISError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

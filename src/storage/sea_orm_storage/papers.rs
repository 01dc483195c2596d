//! 试卷存储操作
//!
//! 状态变更一律使用条件更新（带当前状态过滤），并发请求下
//! 状态不符的更新影响 0 行，调用方据此返回冲突错误而不是覆盖写。
//! 选定级联的三步在单个事务内执行（见 select_paper_impl）。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::papers::{ActiveModel, Column, Entity as Papers};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::{QPSystemError, Result};
use crate::models::{
    PaginationInfo,
    papers::{
        entities::{CASCADE_REJECT_FEEDBACK, Paper, PaperStatus},
        requests::{CreatePaperData, MyPapersQuery, ReviewListQuery},
        responses::{LockedPaperItem, LockedPaperListResponse, PaperListResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建试卷（自动计算版本号）
    pub async fn create_paper_impl(&self, data: CreatePaperData) -> Result<Paper> {
        let now = chrono::Utc::now().timestamp();
        let exam_type = data.exam_type.to_string();

        // 查询同 (科目, 考试类型, 上传者) 的当前最大版本号
        let max_version = Papers::find()
            .filter(Column::SubjectId.eq(data.subject_id))
            .filter(Column::ExamType.eq(&exam_type))
            .filter(Column::UploadedBy.eq(data.uploaded_by))
            .select_only()
            .column_as(Column::Version.max(), "max_version")
            .into_tuple::<Option<i32>>()
            .one(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询最大版本号失败: {e}")))?
            .flatten()
            .unwrap_or(0);

        let model = ActiveModel {
            subject_id: Set(data.subject_id),
            exam_type: Set(exam_type),
            set_label: Set(data.set_label),
            status: Set(PaperStatus::PendingReview.to_string()),
            deadline: Set(data.deadline.map(|dt| dt.timestamp())),
            uploaded_by: Set(data.uploaded_by),
            uploaded_at: Set(now),
            version: Set(max_version + 1),
            is_selected: Set(false),
            file_path: Set(Some(data.file_path)),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("创建试卷失败: {e}")))?;

        Ok(result.into_paper())
    }

    /// 通过 ID 获取试卷
    pub async fn get_paper_by_id_impl(&self, id: i64) -> Result<Option<Paper>> {
        let result = Papers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询试卷失败: {e}")))?;

        Ok(result.map(|m| m.into_paper()))
    }

    /// 教师自己的投稿列表（分页）
    ///
    /// 默认排除 rejected：被驳回的试卷应以新版本重新上传，
    /// 这里是显式过滤，数据本身不删除。
    pub async fn list_my_papers_impl(
        &self,
        uploader_id: i64,
        query: MyPapersQuery,
    ) -> Result<PaperListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Papers::find().filter(Column::UploadedBy.eq(uploader_id));

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(ref exam_type) = query.exam_type {
            select = select.filter(Column::ExamType.eq(exam_type.to_string()));
        }
        if !query.include_rejected {
            select = select.filter(Column::Status.ne(PaperStatus::Rejected.to_string()));
        }

        select = select.order_by_desc(Column::UploadedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询试卷总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询试卷页数失败: {e}")))?;

        let papers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询试卷列表失败: {e}")))?;

        Ok(PaperListResponse {
            items: papers.into_iter().map(|m| m.into_paper()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 系主任所辖院系的试卷（评审读路径的原始数据）
    ///
    /// 按上传时间倒序返回；匿名化分组在服务层以纯函数投影完成。
    pub async fn list_department_papers_impl(
        &self,
        department_id: i64,
        query: ReviewListQuery,
    ) -> Result<Vec<Paper>> {
        // 先取院系的科目 ID 集合
        let subjects = Subjects::find()
            .filter(SubjectColumn::DepartmentId.eq(department_id))
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询院系科目失败: {e}")))?;

        let subject_ids: Vec<i64> = subjects.into_iter().map(|s| s.id).collect();
        if subject_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut select = Papers::find().filter(Column::SubjectId.is_in(subject_ids));

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(ref exam_type) = query.exam_type {
            select = select.filter(Column::ExamType.eq(exam_type.to_string()));
        }
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let papers = select
            .order_by_desc(Column::UploadedAt)
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询评审试卷失败: {e}")))?;

        Ok(papers.into_iter().map(|m| m.into_paper()).collect())
    }

    /// 同 (科目, 考试类型) 分组内全部试卷
    pub async fn list_papers_in_group_impl(
        &self,
        subject_id: i64,
        exam_type: &str,
    ) -> Result<Vec<Paper>> {
        let papers = Papers::find()
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::ExamType.eq(exam_type))
            .order_by_desc(Column::UploadedAt)
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询分组试卷失败: {e}")))?;

        Ok(papers.into_iter().map(|m| m.into_paper()).collect())
    }

    /// 审批：pending_review → approved
    ///
    /// 条件更新：状态已不是 pending_review 时影响 0 行并返回 None，
    /// 并发审批只有一个会生效。
    pub async fn approve_paper_impl(
        &self,
        paper_id: i64,
        approver_id: i64,
    ) -> Result<Option<Paper>> {
        let now = chrono::Utc::now().timestamp();

        let result = Papers::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(PaperStatus::Approved.to_string()),
            )
            .col_expr(Column::ApprovedBy, sea_orm::sea_query::Expr::value(approver_id))
            .col_expr(Column::ApprovedAt, sea_orm::sea_query::Expr::value(now))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(paper_id))
            .filter(Column::Status.eq(PaperStatus::PendingReview.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("审批试卷失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_paper_by_id_impl(paper_id).await
    }

    /// 驳回：pending_review → rejected，附驳回意见
    pub async fn reject_paper_impl(&self, paper_id: i64, feedback: &str) -> Result<Option<Paper>> {
        let now = chrono::Utc::now().timestamp();

        let result = Papers::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(PaperStatus::Rejected.to_string()),
            )
            .col_expr(
                Column::Feedback,
                sea_orm::sea_query::Expr::value(feedback.to_string()),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(paper_id))
            .filter(Column::Status.eq(PaperStatus::PendingReview.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("驳回试卷失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_paper_by_id_impl(paper_id).await
    }

    /// 选定试卷：三步级联，单事务执行
    ///
    /// 1. 清除同组其他试卷的 is_selected
    /// 2. 目标试卷置为 is_selected = true, status = locked
    /// 3. 同组其余 approved 试卷强制驳回（固定意见文案）；
    ///    pending_review / rejected 的兄弟试卷不受影响
    ///
    /// 目标状态在事务内重新校验，并发 select 只有一个能成功；
    /// 三步顺序本身可幂等重放，重试会收敛到同一终态。
    pub async fn select_paper_impl(
        &self,
        paper_id: i64,
        subject_id: i64,
        exam_type: &str,
    ) -> Result<(Paper, u64)> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| QPSystemError::database_operation(format!("开启事务失败: {e}")))?;

        // 事务内重新读取目标，校验分组与当前状态
        let target = Papers::find_by_id(paper_id)
            .one(&txn)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询试卷失败: {e}")))?
            .ok_or_else(|| QPSystemError::not_found(format!("试卷不存在: {paper_id}")))?;

        if target.subject_id != subject_id || target.exam_type != exam_type {
            return Err(QPSystemError::validation(
                "试卷不属于指定的科目与考试类型分组",
            ));
        }

        if target.status != PaperStatus::Approved.to_string() {
            return Err(QPSystemError::invalid_transition(format!(
                "只有 approved 状态的试卷可以被选定，当前状态: {}",
                target.status
            )));
        }

        // 第一步：清除同组其他试卷的选定标记
        Papers::update_many()
            .col_expr(Column::IsSelected, sea_orm::sea_query::Expr::value(false))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::ExamType.eq(exam_type))
            .filter(Column::Id.ne(paper_id))
            .filter(Column::IsSelected.eq(true))
            .exec(&txn)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("清除选定标记失败: {e}")))?;

        // 第二步：锁定目标试卷
        let lock_result = Papers::update_many()
            .col_expr(Column::IsSelected, sea_orm::sea_query::Expr::value(true))
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(PaperStatus::Locked.to_string()),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(paper_id))
            .filter(Column::Status.eq(PaperStatus::Approved.to_string()))
            .exec(&txn)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("锁定试卷失败: {e}")))?;

        if lock_result.rows_affected == 0 {
            // 事务内刚校验过状态，走到这里说明并发修改，放弃整个事务
            return Err(QPSystemError::invalid_transition(
                "试卷状态已被并发修改，请重试",
            ));
        }

        // 第三步：同组其余 approved 试卷强制驳回
        let cascade_result = Papers::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(PaperStatus::Rejected.to_string()),
            )
            .col_expr(
                Column::Feedback,
                sea_orm::sea_query::Expr::value(CASCADE_REJECT_FEEDBACK.to_string()),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::ExamType.eq(exam_type))
            .filter(Column::Id.ne(paper_id))
            .filter(Column::Status.eq(PaperStatus::Approved.to_string()))
            .exec(&txn)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("级联驳回失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| QPSystemError::database_operation(format!("提交事务失败: {e}")))?;

        let locked = self
            .get_paper_by_id_impl(paper_id)
            .await?
            .ok_or_else(|| QPSystemError::not_found(format!("试卷不存在: {paper_id}")))?;

        Ok((locked, cascade_result.rows_affected))
    }

    /// 考务中心视角：全部已锁定且被选定的试卷
    pub async fn list_locked_papers_impl(&self) -> Result<LockedPaperListResponse> {
        let papers = Papers::find()
            .filter(Column::Status.eq(PaperStatus::Locked.to_string()))
            .filter(Column::IsSelected.eq(true))
            .order_by_desc(Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询锁定试卷失败: {e}")))?;

        // 批量查询科目信息
        let subject_ids: Vec<i64> = papers
            .iter()
            .map(|p| p.subject_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let subjects = Subjects::find()
            .filter(SubjectColumn::Id.is_in(subject_ids))
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询科目信息失败: {e}")))?;

        let subject_map: HashMap<i64, _> = subjects.into_iter().map(|s| (s.id, s)).collect();

        let items = papers
            .into_iter()
            .map(|p| {
                let subject = subject_map.get(&p.subject_id);
                LockedPaperItem {
                    subject_name: subject.map(|s| s.name.clone()).unwrap_or_default(),
                    subject_code: subject.map(|s| s.code.clone()).unwrap_or_default(),
                    department_id: subject.map(|s| s.department_id).unwrap_or_default(),
                    paper: p.into_paper(),
                }
            })
            .collect();

        Ok(LockedPaperListResponse { items })
    }
}

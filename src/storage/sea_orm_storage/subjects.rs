//! 科目与教师科目分配存储操作

use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::entity::teacher_subjects::{
    ActiveModel as AssignmentActiveModel, Column as AssignmentColumn, Entity as TeacherSubjects,
};
use crate::entity::user_roles::{Column as UserRoleColumn, Entity as UserRoles};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{QPSystemError, Result};
use crate::models::subjects::{
    entities::{Subject, TeacherSubject},
    requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
    responses::AssignedTeacher,
};
use crate::models::users::entities::AppRole;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建科目
    pub async fn create_subject_impl(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        let model = ActiveModel {
            department_id: Set(subject.department_id),
            name: Set(subject.name),
            code: Set(subject.code),
            semester: Set(subject.semester),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("创建科目失败: {e}")))?;

        Ok(result.into_subject())
    }

    /// 通过 ID 获取科目
    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 列出科目
    pub async fn list_subjects_impl(&self, query: SubjectListQuery) -> Result<Vec<Subject>> {
        let mut select = Subjects::find();

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }
        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester));
        }

        let results = select
            .order_by_asc(Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 更新科目
    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        let existing = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询科目失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(semester) = update.semester {
            model.semester = Set(semester);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("更新科目失败: {e}")))?;

        Ok(Some(updated.into_subject()))
    }

    /// 删除科目
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 分配教师到科目
    pub async fn assign_teacher_to_subject_impl(
        &self,
        teacher_id: i64,
        subject_id: i64,
    ) -> Result<TeacherSubject> {
        let model = AssignmentActiveModel {
            teacher_id: Set(teacher_id),
            subject_id: Set(subject_id),
            assigned_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("创建科目分配失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 取消教师科目分配
    pub async fn remove_teacher_from_subject_impl(
        &self,
        teacher_id: i64,
        subject_id: i64,
    ) -> Result<bool> {
        let result = TeacherSubjects::delete_many()
            .filter(AssignmentColumn::TeacherId.eq(teacher_id))
            .filter(AssignmentColumn::SubjectId.eq(subject_id))
            .exec(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("删除科目分配失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除教师的全部科目分配
    pub async fn remove_all_subject_assignments_impl(&self, teacher_id: i64) -> Result<u64> {
        let result = TeacherSubjects::delete_many()
            .filter(AssignmentColumn::TeacherId.eq(teacher_id))
            .exec(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("删除科目分配失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 科目是否分配给该教师
    pub async fn is_subject_assigned_to_teacher_impl(
        &self,
        teacher_id: i64,
        subject_id: i64,
    ) -> Result<bool> {
        let count = TeacherSubjects::find()
            .filter(AssignmentColumn::TeacherId.eq(teacher_id))
            .filter(AssignmentColumn::SubjectId.eq(subject_id))
            .count(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询科目分配失败: {e}")))?;

        Ok(count > 0)
    }

    /// 教师的科目列表
    pub async fn list_subjects_for_teacher_impl(&self, teacher_id: i64) -> Result<Vec<Subject>> {
        let assignments = TeacherSubjects::find()
            .filter(AssignmentColumn::TeacherId.eq(teacher_id))
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询科目分配失败: {e}")))?;

        let subject_ids: Vec<i64> = assignments.into_iter().map(|a| a.subject_id).collect();
        if subject_ids.is_empty() {
            return Ok(vec![]);
        }

        let results = Subjects::find()
            .filter(Column::Id.is_in(subject_ids))
            .order_by_asc(Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 科目的已分配教师列表
    pub async fn list_assigned_teachers_impl(
        &self,
        subject_id: i64,
    ) -> Result<Vec<AssignedTeacher>> {
        let assignments = TeacherSubjects::find()
            .filter(AssignmentColumn::SubjectId.eq(subject_id))
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询科目分配失败: {e}")))?;

        let teacher_ids: Vec<i64> = assignments.into_iter().map(|a| a.teacher_id).collect();
        if teacher_ids.is_empty() {
            return Ok(vec![]);
        }

        let users = Users::find()
            .filter(UserColumn::Id.is_in(teacher_ids))
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询教师信息失败: {e}")))?;

        Ok(users
            .into_iter()
            .map(|u| AssignedTeacher {
                teacher_id: u.id,
                full_name: u.full_name,
                email: u.email,
            })
            .collect())
    }

    /// 按科目集合解析任课教师（并集去重）
    pub async fn list_teacher_ids_for_subjects_impl(
        &self,
        subject_ids: &[i64],
    ) -> Result<Vec<i64>> {
        if subject_ids.is_empty() {
            return Ok(vec![]);
        }

        let assignments = TeacherSubjects::find()
            .filter(AssignmentColumn::SubjectId.is_in(subject_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询科目分配失败: {e}")))?;

        // 一个教师可能任多个选中科目，只收一次通知
        let unique: HashSet<i64> = assignments.into_iter().map(|a| a.teacher_id).collect();
        Ok(unique.into_iter().collect())
    }

    /// 院系内全部教师角色用户
    pub async fn list_teacher_ids_in_department_impl(
        &self,
        department_id: i64,
    ) -> Result<Vec<i64>> {
        let users = Users::find()
            .filter(UserColumn::DepartmentId.eq(department_id))
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询院系用户失败: {e}")))?;

        let user_ids: Vec<i64> = users.into_iter().map(|u| u.id).collect();
        if user_ids.is_empty() {
            return Ok(vec![]);
        }

        // 只保留角色为 teacher 的用户
        let role_rows = UserRoles::find()
            .filter(UserRoleColumn::UserId.is_in(user_ids))
            .filter(UserRoleColumn::Role.eq(AppRole::TEACHER))
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询角色失败: {e}")))?;

        Ok(role_rows.into_iter().map(|r| r.user_id).collect())
    }
}

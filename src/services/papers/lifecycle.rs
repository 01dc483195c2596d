//! 试卷生命周期引擎
//!
//! 状态转移表、授权矩阵、选定级联计划、匿名化投影，全部是
//! 不碰存储的纯函数。请求上下文（操作者 + 角色 + 院系）显式传入，
//! 不存在任何全局会话状态，守卫逻辑可以脱离 HTTP 与数据库单测。
//!
//! 生产路径上的转移：
//!
//! ```text
//! (upload) ──> pending_review ──approve──> approved ──select──> locked
//!                     │                        │
//!                   reject                （级联驳回）
//!                     ↓                        ↓
//!                  rejected <──────────────────┘
//! ```
//!
//! locked 没有任何出边；解锁/回退在当前设计中不存在。

use std::collections::HashMap;

use crate::models::papers::entities::{CASCADE_REJECT_FEEDBACK, Paper, PaperStatus};
use crate::models::papers::responses::{AnonymousSubmission, ReviewGroup};
use crate::models::subjects::entities::Subject;
use crate::models::users::entities::AppRole;

/// 请求上下文：执行试卷动作的操作者
#[derive(Debug, Clone)]
pub struct ActorContext {
    pub user_id: i64,
    pub role: AppRole,
    pub department_id: Option<i64>,
}

/// 试卷评审动作
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaperAction {
    Approve,
    Reject,
    Select,
}

/// 守卫拒绝原因
#[derive(Debug, Clone, PartialEq)]
pub enum DenyReason {
    /// 角色无权执行该动作（admin 对试卷状态零权限）
    RoleNotAllowed,
    /// 试卷科目不属于操作者的院系
    WrongDepartment,
    /// 当前状态没有对应的出边
    InvalidTransition { from: PaperStatus },
}

impl DenyReason {
    pub fn message(&self) -> String {
        match self {
            DenyReason::RoleNotAllowed => "当前角色无权执行该试卷操作".to_string(),
            DenyReason::WrongDepartment => "只能操作本院系科目的试卷".to_string(),
            DenyReason::InvalidTransition { from } => {
                format!("试卷当前状态 {from} 不允许该操作")
            }
        }
    }
}

/// 授权矩阵
///
/// approve / reject / select 仅限系主任，且试卷所属科目必须在其
/// 本院系内（单院系辖域，不跨系）。admin 管账号不管试卷，
/// exam_cell 只读已锁定试卷，二者在这里一律拒绝。
pub fn authorize(
    _action: PaperAction,
    actor: &ActorContext,
    paper_department_id: i64,
) -> Result<(), DenyReason> {
    if actor.role != AppRole::Hod {
        return Err(DenyReason::RoleNotAllowed);
    }

    match actor.department_id {
        Some(dept) if dept == paper_department_id => Ok(()),
        _ => Err(DenyReason::WrongDepartment),
    }
}

/// 状态转移表
///
/// 返回动作执行后的目标状态；没有出边的组合一律拒绝。
/// locked 对所有角色都是终态。
pub fn check_transition(
    current: &PaperStatus,
    action: PaperAction,
) -> Result<PaperStatus, DenyReason> {
    match (current, action) {
        (PaperStatus::PendingReview, PaperAction::Approve) => Ok(PaperStatus::Approved),
        (PaperStatus::PendingReview, PaperAction::Reject) => Ok(PaperStatus::Rejected),
        (PaperStatus::Approved, PaperAction::Select) => Ok(PaperStatus::Locked),
        (from, _) => Err(DenyReason::InvalidTransition { from: from.clone() }),
    }
}

/// 驳回意见必填校验：空白意见在任何存储调用之前拒绝
pub fn validate_feedback(feedback: &str) -> Result<&str, &'static str> {
    let trimmed = feedback.trim();
    if trimmed.is_empty() {
        return Err("驳回意见不能为空");
    }
    Ok(trimmed)
}

/// 选定级联计划
///
/// 三步作为数据先算出来，由存储层在一个事务内执行。
/// 重放整个计划会收敛到同一终态（清标记与条件驳回都幂等）。
#[derive(Debug, Clone, PartialEq)]
pub struct CascadePlan {
    /// 第一步：需要清除 is_selected 的兄弟试卷
    pub clear_selected: Vec<i64>,
    /// 第二步：锁定的目标试卷
    pub lock_target: i64,
    /// 第三步：强制驳回的 approved 兄弟试卷
    pub force_reject: Vec<i64>,
    /// 级联驳回写入的固定意见
    pub feedback: &'static str,
}

/// 基于分组现状计算级联计划
///
/// 仅 approved 的兄弟会被强制驳回；pending_review 的兄弟可能
/// 还会被正常评审，rejected 的已经出局，二者都不动。
pub fn plan_selection(group: &[Paper], target_id: i64) -> Result<CascadePlan, DenyReason> {
    let target = group
        .iter()
        .find(|p| p.id == target_id)
        .ok_or(DenyReason::InvalidTransition {
            from: PaperStatus::Draft,
        })?;

    // 目标必须处于 approved（select 的唯一入边）
    check_transition(&target.status, PaperAction::Select)?;

    let clear_selected = group
        .iter()
        .filter(|p| p.id != target_id && p.is_selected)
        .map(|p| p.id)
        .collect();

    let force_reject = group
        .iter()
        .filter(|p| p.id != target_id && p.status == PaperStatus::Approved)
        .map(|p| p.id)
        .collect();

    Ok(CascadePlan {
        clear_selected,
        lock_target: target_id,
        force_reject,
        feedback: CASCADE_REJECT_FEEDBACK,
    })
}

/// 教师默认投稿视图的可见性谓词：rejected 不展示（数据不删除）
pub fn visible_to_uploader(paper: &Paper) -> bool {
    paper.status != PaperStatus::Rejected
}

/// 匿名化投影：按 (科目, 考试类型) 分组并赋顺序标签
///
/// 标签按传入顺序（默认上传时间倒序）编号为 "Submission 1..N"，
/// 每次查询重新计算，不落库。组内有新上传时编号会变，标签只在
/// 一次评审会话内有意义，不是持久标识。产出的响应类型不携带
/// uploaded_by，系主任读路径拿不到上传者身份。
pub fn build_review_groups(
    papers: Vec<Paper>,
    subjects: &HashMap<i64, Subject>,
) -> Vec<ReviewGroup> {
    // 保序分组：首次出现的分组键决定分组顺序
    let mut order: Vec<(i64, String)> = Vec::new();
    let mut grouped: HashMap<(i64, String), Vec<Paper>> = HashMap::new();

    for paper in papers {
        let key = (paper.subject_id, paper.exam_type.to_string());
        if !grouped.contains_key(&key) {
            order.push(key.clone());
        }
        grouped.entry(key).or_default().push(paper);
    }

    order
        .into_iter()
        .filter_map(|key| {
            let members = grouped.remove(&key)?;
            let subject = subjects.get(&key.0);
            let exam_type = members[0].exam_type.clone();

            let submissions = members
                .into_iter()
                .enumerate()
                .map(|(idx, p)| AnonymousSubmission {
                    paper_id: p.id,
                    anonymous_label: format!("Submission {}", idx + 1),
                    set_label: p.set_label,
                    status: p.status,
                    version: p.version,
                    is_selected: p.is_selected,
                    has_file: p.file_path.is_some(),
                    feedback: p.feedback,
                    deadline: p.deadline,
                    uploaded_at: p.uploaded_at,
                })
                .collect();

            Some(ReviewGroup {
                subject_id: key.0,
                subject_name: subject.map(|s| s.name.clone()).unwrap_or_default(),
                subject_code: subject.map(|s| s.code.clone()).unwrap_or_default(),
                exam_type,
                submissions,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::papers::entities::ExamType;

    fn paper(id: i64, status: PaperStatus, is_selected: bool) -> Paper {
        Paper {
            id,
            subject_id: 10,
            exam_type: ExamType::MidTerm,
            set_label: "A".to_string(),
            status,
            deadline: None,
            uploaded_by: 100 + id,
            uploaded_at: chrono::Utc::now(),
            version: 1,
            is_selected,
            file_path: Some(format!("paper-{id}.bin")),
            feedback: None,
            approved_by: None,
            approved_at: None,
            updated_at: chrono::Utc::now(),
        }
    }

    fn hod(department_id: i64) -> ActorContext {
        ActorContext {
            user_id: 1,
            role: AppRole::Hod,
            department_id: Some(department_id),
        }
    }

    fn subject_map() -> HashMap<i64, Subject> {
        let mut map = HashMap::new();
        map.insert(
            10,
            Subject {
                id: 10,
                department_id: 5,
                name: "数据结构".to_string(),
                code: "CS201".to_string(),
                semester: 3,
                created_at: chrono::Utc::now(),
            },
        );
        map
    }

    #[test]
    fn test_production_path_transitions() {
        assert_eq!(
            check_transition(&PaperStatus::PendingReview, PaperAction::Approve).unwrap(),
            PaperStatus::Approved
        );
        assert_eq!(
            check_transition(&PaperStatus::PendingReview, PaperAction::Reject).unwrap(),
            PaperStatus::Rejected
        );
        assert_eq!(
            check_transition(&PaperStatus::Approved, PaperAction::Select).unwrap(),
            PaperStatus::Locked
        );
    }

    #[test]
    fn test_locked_is_terminal() {
        for action in [PaperAction::Approve, PaperAction::Reject, PaperAction::Select] {
            assert!(check_transition(&PaperStatus::Locked, action).is_err());
        }
    }

    #[test]
    fn test_rejected_has_no_outgoing_edges() {
        // 被驳回后只能以新版本重新上传，没有转移出边
        for action in [PaperAction::Approve, PaperAction::Reject, PaperAction::Select] {
            assert!(check_transition(&PaperStatus::Rejected, action).is_err());
        }
    }

    #[test]
    fn test_only_hod_of_department_may_review() {
        assert!(authorize(PaperAction::Approve, &hod(5), 5).is_ok());

        // 跨院系拒绝
        assert_eq!(
            authorize(PaperAction::Approve, &hod(6), 5),
            Err(DenyReason::WrongDepartment)
        );

        // admin 对试卷状态零权限（职责分离）
        let admin = ActorContext {
            user_id: 2,
            role: AppRole::Admin,
            department_id: Some(5),
        };
        assert_eq!(
            authorize(PaperAction::Select, &admin, 5),
            Err(DenyReason::RoleNotAllowed)
        );

        // 教师与考务中心同样无权
        for role in [AppRole::Teacher, AppRole::ExamCell] {
            let actor = ActorContext {
                user_id: 3,
                role,
                department_id: Some(5),
            };
            assert_eq!(
                authorize(PaperAction::Reject, &actor, 5),
                Err(DenyReason::RoleNotAllowed)
            );
        }
    }

    #[test]
    fn test_hod_without_department_denied() {
        let actor = ActorContext {
            user_id: 1,
            role: AppRole::Hod,
            department_id: None,
        };
        assert_eq!(
            authorize(PaperAction::Approve, &actor, 5),
            Err(DenyReason::WrongDepartment)
        );
    }

    #[test]
    fn test_feedback_required() {
        assert!(validate_feedback("").is_err());
        assert!(validate_feedback("   \t\n").is_err());
        assert_eq!(validate_feedback("  需要修改第三题  ").unwrap(), "需要修改第三题");
    }

    #[test]
    fn test_plan_selection_cascade() {
        // 分组：目标 approved，一个 approved 兄弟，一个 pending，一个 rejected，
        // 还有一个历史遗留的 is_selected 兄弟
        let group = vec![
            paper(1, PaperStatus::Approved, false), // 目标
            paper(2, PaperStatus::Approved, true),  // approved + 遗留选定标记
            paper(3, PaperStatus::PendingReview, false),
            paper(4, PaperStatus::Rejected, false),
        ];

        let plan = plan_selection(&group, 1).unwrap();

        assert_eq!(plan.lock_target, 1);
        assert_eq!(plan.clear_selected, vec![2]);
        // 仅 approved 兄弟被强制驳回；pending / rejected 不动
        assert_eq!(plan.force_reject, vec![2]);
        assert_eq!(plan.feedback, CASCADE_REJECT_FEEDBACK);
    }

    #[test]
    fn test_plan_selection_requires_approved_target() {
        let group = vec![
            paper(1, PaperStatus::PendingReview, false),
            paper(2, PaperStatus::Approved, false),
        ];

        // pending_review 的试卷不能被选定
        assert!(plan_selection(&group, 1).is_err());
        // 不在分组里的 ID 同样拒绝
        assert!(plan_selection(&group, 99).is_err());
    }

    #[test]
    fn test_select_not_replayable_after_lock() {
        // 级联执行后的终态：目标 locked，落选者 rejected，pending 不动。
        // 重复的 select 请求被拒绝而不是重复生效。
        let group = vec![
            paper(1, PaperStatus::Locked, true),
            paper(2, PaperStatus::Rejected, false),
            paper(3, PaperStatus::PendingReview, false),
        ];

        assert!(plan_selection(&group, 1).is_err());
    }

    #[test]
    fn test_at_most_one_selected_after_plan() {
        // 执行计划后的分组应满足不变量：最多一份 is_selected
        let group = vec![
            paper(1, PaperStatus::Approved, false),
            paper(2, PaperStatus::Approved, true),
            paper(3, PaperStatus::Approved, true), // 脏数据：两个遗留标记
        ];

        let plan = plan_selection(&group, 1).unwrap();
        // 所有非目标的选定标记都会被清除
        let mut cleared = plan.clear_selected.clone();
        cleared.sort();
        assert_eq!(cleared, vec![2, 3]);
    }

    #[test]
    fn test_rejected_papers_hidden_from_uploader() {
        assert!(visible_to_uploader(&paper(1, PaperStatus::PendingReview, false)));
        assert!(visible_to_uploader(&paper(2, PaperStatus::Approved, false)));
        assert!(visible_to_uploader(&paper(3, PaperStatus::Locked, true)));
        assert!(!visible_to_uploader(&paper(4, PaperStatus::Rejected, false)));
    }

    #[test]
    fn test_anonymization_labels_follow_input_order() {
        let papers = vec![
            paper(7, PaperStatus::PendingReview, false),
            paper(5, PaperStatus::PendingReview, false),
            paper(3, PaperStatus::Approved, false),
        ];

        let groups = build_review_groups(papers, &subject_map());
        assert_eq!(groups.len(), 1);

        let labels: Vec<&str> = groups[0]
            .submissions
            .iter()
            .map(|s| s.anonymous_label.as_str())
            .collect();
        assert_eq!(labels, vec!["Submission 1", "Submission 2", "Submission 3"]);

        // 同一分组两次投影产出相同标签（输入不变时标签稳定）
        let papers_again = vec![
            paper(7, PaperStatus::PendingReview, false),
            paper(5, PaperStatus::PendingReview, false),
            paper(3, PaperStatus::Approved, false),
        ];
        let groups_again = build_review_groups(papers_again, &subject_map());
        let labels_again: Vec<&str> = groups_again[0]
            .submissions
            .iter()
            .map(|s| s.anonymous_label.as_str())
            .collect();
        assert_eq!(labels, labels_again);
    }

    #[test]
    fn test_anonymization_groups_by_subject_and_exam_type() {
        let mut mid = paper(1, PaperStatus::PendingReview, false);
        mid.exam_type = ExamType::MidTerm;
        let mut end = paper(2, PaperStatus::PendingReview, false);
        end.exam_type = ExamType::EndTerm;

        let groups = build_review_groups(vec![mid, end], &subject_map());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].exam_type, ExamType::MidTerm);
        assert_eq!(groups[1].exam_type, ExamType::EndTerm);
        // 每组独立从 Submission 1 开始编号
        assert_eq!(groups[0].submissions[0].anonymous_label, "Submission 1");
        assert_eq!(groups[1].submissions[0].anonymous_label, "Submission 1");
    }

    #[test]
    fn test_anonymous_submission_carries_no_uploader() {
        // 类型层面的保证：序列化后的评审视图不含 uploaded_by 字段
        let groups = build_review_groups(
            vec![paper(1, PaperStatus::PendingReview, false)],
            &subject_map(),
        );
        let json = serde_json::to_value(&groups).unwrap();
        assert!(json.to_string().find("uploaded_by").is_none());
    }
}

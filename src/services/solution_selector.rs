//! AC 代码选取 - 业务能力层
//!
//! 只负责"为一道题挑选参考代码"，不做校验、不调用 LLM

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use regex::Regex;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use crate::entity::submission::{RESULT_ACCEPTED, STATUS_DONE};
use crate::entity::{language, problem, profile, submission, submission_source, user};
use crate::models::{Author, LanguageInfo, SelectedSolution};

/// C 家族语言：C, C11, C++, C++17, C++20 ...（不含 C#）
const C_FAMILY_PATTERN: &str = r"^C(\+\+)?[0-9]*$";

/// 候选提交（已通过语言过滤）
#[derive(Debug, Clone)]
struct Candidate {
    submission: submission::Model,
    language: language::Model,
}

/// AC 代码选取服务
///
/// 职责：
/// - 查询某题已判完、AC、C 家族语言的提交（新的在前）
/// - 优先保证 (作者, 语言) 不重复
/// - 不足时按时间顺序补齐
pub struct SolutionSelector {
    limit: usize,
}

impl SolutionSelector {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// 为题目选取至多 `limit` 份 AC 代码
    pub async fn select<C: ConnectionTrait>(
        &self,
        db: &C,
        problem: &problem::Model,
    ) -> Result<Vec<SelectedSolution>> {
        let language_re = Regex::new(C_FAMILY_PATTERN)?;

        let rows = submission::Entity::find()
            .filter(submission::Column::ProblemId.eq(problem.id))
            .filter(submission::Column::Result.eq(RESULT_ACCEPTED))
            .filter(submission::Column::Status.eq(STATUS_DONE))
            .find_also_related(language::Entity)
            .filter(language::Column::Name.starts_with("C"))
            .order_by_desc(submission::Column::Id)
            .all(db)
            .await
            .with_context(|| format!("查询 {} 的 AC 提交失败", problem.code))?;

        let candidates: Vec<Candidate> = rows
            .into_iter()
            .filter_map(|(submission, language)| {
                language
                    .filter(|l| language_re.is_match(&l.name))
                    .map(|language| Candidate {
                        submission,
                        language,
                    })
            })
            .collect();

        debug!(
            "{}: 共 {} 份 C/C++ AC 提交",
            problem.code,
            candidates.len()
        );

        let picked = pick_diverse(candidates, self.limit);
        self.hydrate(db, picked).await
    }

    /// 补全作者名与源代码
    async fn hydrate<C: ConnectionTrait>(
        &self,
        db: &C,
        picked: Vec<Candidate>,
    ) -> Result<Vec<SelectedSolution>> {
        if picked.is_empty() {
            return Ok(Vec::new());
        }

        let profile_ids: Vec<i32> = picked.iter().map(|c| c.submission.user_id).collect();
        let submission_ids: Vec<i32> = picked.iter().map(|c| c.submission.id).collect();

        let usernames: HashMap<i32, String> = profile::Entity::find()
            .filter(profile::Column::Id.is_in(profile_ids))
            .find_also_related(user::Entity)
            .all(db)
            .await
            .context("查询提交作者失败")?
            .into_iter()
            .filter_map(|(p, u)| u.map(|u| (p.id, u.username)))
            .collect();

        let mut sources: HashMap<i32, String> = submission_source::Entity::find()
            .filter(submission_source::Column::SubmissionId.is_in(submission_ids))
            .all(db)
            .await
            .context("查询提交源代码失败")?
            .into_iter()
            .map(|s| (s.submission_id, s.source))
            .collect();

        Ok(picked
            .into_iter()
            .map(|c| SelectedSolution {
                submission_id: c.submission.id,
                author: Author {
                    profile_id: c.submission.user_id,
                    username: usernames.get(&c.submission.user_id).cloned(),
                },
                language: Some(LanguageInfo {
                    id: c.language.id,
                    name: c.language.name,
                    common_name: c.language.common_name,
                }),
                source: sources.remove(&c.submission.id),
            })
            .collect())
    }
}

/// 从按时间倒序的候选中挑选
///
/// 先按 (作者, 语言) 去重取最新的一份；不够 `limit` 时再按原顺序补齐
fn pick_diverse(candidates: Vec<Candidate>, limit: usize) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut picked_ids = HashSet::new();
    let mut picked = Vec::new();

    for c in &candidates {
        if picked.len() >= limit {
            break;
        }
        if seen.insert((c.submission.user_id, c.submission.language_id)) {
            picked_ids.insert(c.submission.id);
            picked.push(c.clone());
        }
    }

    if picked.len() < limit {
        for c in candidates {
            if picked.len() >= limit {
                break;
            }
            if picked_ids.insert(c.submission.id) {
                picked.push(c);
            }
        }
    }

    picked
}

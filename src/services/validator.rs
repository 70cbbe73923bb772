//! 生成前校验 - 业务能力层
//!
//! 在调用 LLM 之前检查所有前置条件，收集全部失败原因而不是遇错即停

use crate::entity::problem;
use crate::models::SelectedSolution;

/// 源代码去除首尾空白后的最小长度
pub const MIN_SOURCE_CHARS: usize = 10;

/// 校验能否为该题生成题解
///
/// # 参数
/// - `problem`: 题目（None 表示题目不存在）
/// - `editorial_exists`: 该题当前是否已有题解
/// - `solutions`: 选中的 AC 代码
///
/// # 返回
/// 人类可读的错误列表，空列表表示可以继续
pub fn validate_generation(
    problem: Option<&problem::Model>,
    editorial_exists: bool,
    solutions: &[SelectedSolution],
) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(problem) = problem else {
        errors.push("题目不存在".to_string());
        return errors;
    };

    if !problem.is_public {
        errors.push(format!("题目 {} 未公开", problem.code));
    }

    if editorial_exists {
        errors.push(format!("题目 {} 已有题解", problem.code));
    }

    if solutions.is_empty() {
        errors.push(format!(
            "题目 {} 的 C/C++ AC 代码不足: 0 (至少需要 1 份)",
            problem.code
        ));
    }

    for sol in solutions {
        match sol.source.as_deref() {
            None => errors.push(format!("提交 {} 没有源代码", sol.submission_id)),
            Some(source) if source.trim().chars().count() < MIN_SOURCE_CHARS => {
                errors.push(format!("提交 {} 的源代码过短", sol.submission_id))
            }
            Some(_) => {}
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;

    fn problem(is_public: bool) -> problem::Model {
        problem::Model {
            id: 1,
            code: "ABC001".to_string(),
            name: "A + B".to_string(),
            description: "Sum two integers.".to_string(),
            is_public,
        }
    }

    fn solution(id: i32, source: Option<&str>) -> SelectedSolution {
        SelectedSolution {
            submission_id: id,
            author: Author {
                profile_id: id,
                username: Some(format!("user{id}")),
            },
            language: None,
            source: source.map(str::to_string),
        }
    }

    const GOOD_SOURCE: &str = "int main() { return 0; }";

    #[test]
    fn test_valid_input_has_no_errors() {
        let p = problem(true);
        let sols = vec![solution(1, Some(GOOD_SOURCE)), solution(2, Some(GOOD_SOURCE))];
        assert!(validate_generation(Some(&p), false, &sols).is_empty());
    }

    #[test]
    fn test_missing_problem_short_circuits() {
        let errors = validate_generation(None, true, &[]);
        assert_eq!(errors, vec!["题目不存在".to_string()]);
    }

    #[test]
    fn test_zero_solutions_is_an_error() {
        let p = problem(true);
        let errors = validate_generation(Some(&p), false, &[]);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("ABC001"));
    }

    #[test]
    fn test_existing_editorial_is_an_error() {
        let p = problem(true);
        let errors = validate_generation(Some(&p), true, &[solution(1, Some(GOOD_SOURCE))]);
        assert_eq!(errors, vec!["题目 ABC001 已有题解".to_string()]);
    }

    #[test]
    fn test_accumulates_every_failure() {
        let p = problem(false);
        let sols = vec![
            solution(1, None),
            solution(2, Some("   int x;   ")),
            solution(3, Some(GOOD_SOURCE)),
        ];
        let errors = validate_generation(Some(&p), true, &sols);
        assert_eq!(
            errors,
            vec![
                "题目 ABC001 未公开".to_string(),
                "题目 ABC001 已有题解".to_string(),
                "提交 1 没有源代码".to_string(),
                "提交 2 的源代码过短".to_string(),
            ]
        );
    }
}

//! Prompt 构建 - 业务能力层
//!
//! 纯函数：相同的题目和代码总是得到相同的 prompt。
//! prompt 正文与其中的 JSON 结构说明是和 provider 约定好的，不要改动措辞。

use crate::entity::problem;
use crate::models::SelectedSolution;
use crate::utils::{code_fence_language, truncate_source};

/// 系统消息
pub const SYSTEM_MESSAGE: &str =
    "You are a competitive programming education expert. Always return valid JSON.";

/// 把选中的代码格式化为 prompt 中的代码段
///
/// # 参数
/// - `solutions`: 选中的 AC 代码
/// - `max_source_chars`: 单份代码最多保留的字符数
pub fn format_solutions(solutions: &[SelectedSolution], max_source_chars: usize) -> String {
    solutions
        .iter()
        .enumerate()
        .map(|(i, sol)| {
            let language = sol.language_label();
            let source = sol.source.as_deref().unwrap_or("No source");
            format!(
                "--- Solution {} ---\n\
                 Language: {}\n\
                 User: {}\n\
                 Submission ID: {}\n\
                 Code:\n```{}\n{}\n```\n",
                i + 1,
                language,
                sol.author_label(),
                sol.submission_id,
                code_fence_language(language),
                truncate_source(source, max_source_chars),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 构建用户消息
pub fn build_prompt(problem: &problem::Model, formatted_solutions: &str) -> String {
    let description = if problem.description.is_empty() {
        "No description available"
    } else {
        problem.description.as_str()
    };

    format!(
        r#"You are an expert in competitive programming education. Analyze the problem and solutions, then generate a detailed editorial in Vietnamese.

## Problem Information
**Code**: {code}
**Name**: {name}
**Description**: {description}

## Accepted Solutions
{formatted_solutions}

## Instructions
Analyze the solutions above and create structured editorial data:
1. Explain the problem clearly in Vietnamese
2. Identify 2-3 different approaches from the solutions
3. Order from simplest to most optimal
4. Provide code, complexity, and explanation for each approach
5. List key insights and common pitfalls

## Output Requirements
You MUST return valid JSON following this schema:
{{
  "problem_understanding": "string - clear explanation in Vietnamese",
  "approaches": [
    {{
      "name": "string - approach name (e.g., 'Brute Force', 'Hash Map')",
      "language": "string - programming language (lowercase, use 'cpp' for C++, 'csharp' for C#)",
      "code": "string - code snippet",
      "time_complexity": "string - e.g., O(n), O(n log n), can use ~10^9~ if needed",
      "space_complexity": "string - e.g., O(1), O(n), can use ~10^9~ if needed",
      "explanation": "string - detailed explanation in Vietnamese"
    }}
  ],
  "key_insights": ["string - insight 1", "string - insight 2"],
  "common_pitfalls": ["string - pitfall 1", "string - pitfall 2"]
}}

DO NOT include any text outside the JSON object.
"#,
        code = problem.code,
        name = problem.name,
        description = description,
        formatted_solutions = formatted_solutions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, LanguageInfo};

    fn problem(description: &str) -> problem::Model {
        problem::Model {
            id: 1,
            code: "ABC001".to_string(),
            name: "A + B".to_string(),
            description: description.to_string(),
            is_public: true,
        }
    }

    fn cpp_solution(id: i32, source: &str) -> SelectedSolution {
        SelectedSolution {
            submission_id: id,
            author: Author {
                profile_id: 7,
                username: Some("alice".to_string()),
            },
            language: Some(LanguageInfo {
                id: 1,
                name: "C++17".to_string(),
                common_name: "C++".to_string(),
            }),
            source: Some(source.to_string()),
        }
    }

    #[test]
    fn test_format_solution_block() {
        let text = format_solutions(&[cpp_solution(42, "int main() {}")], 1000);
        assert_eq!(
            text,
            "--- Solution 1 ---\nLanguage: C++\nUser: alice\nSubmission ID: 42\nCode:\n```cpp\nint main() {}\n```\n"
        );
    }

    #[test]
    fn test_format_joins_blocks_and_truncates() {
        let long = "a".repeat(1200);
        let text = format_solutions(&[cpp_solution(1, "int x = 1;"), cpp_solution(2, &long)], 1000);
        assert!(text.contains("```\n\n--- Solution 2 ---"));
        assert!(text.contains("\n// ... (truncated)\n```\n"));
        assert!(!text.contains(&"a".repeat(1001)));
    }

    #[test]
    fn test_unknown_labels() {
        let sol = SelectedSolution {
            submission_id: 3,
            author: Author {
                profile_id: 1,
                username: None,
            },
            language: None,
            source: None,
        };
        let text = format_solutions(&[sol], 1000);
        assert!(text.contains("Language: Unknown\nUser: Unknown\n"));
        assert!(text.contains("```unknown\nNo source\n```"));
    }

    #[test]
    fn test_build_prompt_embeds_problem_and_schema() {
        let prompt = build_prompt(&problem("Sum two integers."), "SOLUTIONS");
        assert!(prompt.starts_with("You are an expert in competitive programming education."));
        assert!(prompt.contains("**Code**: ABC001\n**Name**: A + B\n**Description**: Sum two integers.\n"));
        assert!(prompt.contains("## Accepted Solutions\nSOLUTIONS\n\n## Instructions"));
        assert!(prompt.contains("{\n  \"problem_understanding\""));
        assert!(prompt.ends_with("DO NOT include any text outside the JSON object.\n"));
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let p = problem("");
        let a = build_prompt(&p, "x");
        let b = build_prompt(&p, "x");
        assert_eq!(a, b);
        assert!(a.contains("**Description**: No description available\n"));
    }
}

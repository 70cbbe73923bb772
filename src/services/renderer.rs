//! Markdown 渲染 - 业务能力层
//!
//! 把结构化内容转成固定章节顺序的 Markdown。网页端按这个版式展示题解，
//! 所以章节标题和表格格式必须保持不变。模型输出原样写入，不做转义。

use crate::entity::problem;
use crate::models::EditorialContent;
use crate::utils::code_fence_language;

/// 渲染题解 Markdown
pub fn render_markdown(editorial: &EditorialContent, _problem: &problem::Model) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(String::new());
    lines.push("## Hiểu bài toán".to_string());
    lines.push(editorial.problem_understanding.clone());
    lines.push(String::new());
    lines.push("## Các cách tiếp cận".to_string());

    for approach in &editorial.approaches {
        lines.push(format!("### Cách {}", approach.name));
        lines.push(String::new());
        lines.push(format!("```{}", code_fence_language(&approach.language)));
        lines.push(approach.code.clone());
        lines.push("```".to_string());
        lines.push(String::new());
        lines.push(format!("* **Time Complexity**: {}", approach.time_complexity));
        lines.push(format!("* **Space Complexity**: {}", approach.space_complexity));
        lines.push(String::new());
        lines.push(approach.explanation.clone());
        lines.push(String::new());
    }

    lines.push("## Phân tích độ phức tạp".to_string());
    lines.push("| Cách tiếp cận | Time | Space | Tên |".to_string());
    lines.push("|--------------|------|-------|-----|".to_string());
    for (i, approach) in editorial.approaches.iter().enumerate() {
        lines.push(format!(
            "| {} | {} | {} | {} |",
            i + 1,
            approach.time_complexity,
            approach.space_complexity,
            approach.name
        ));
    }
    lines.push(String::new());

    lines.push("## Bài học kinh nghiệm".to_string());
    for insight in &editorial.key_insights {
        lines.push(format!("- {}", insight));
    }
    lines.push(String::new());

    lines.push("## Lỗi thường gặp".to_string());
    for pitfall in &editorial.common_pitfalls {
        lines.push(format!("- {}", pitfall));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Approach;

    fn problem() -> problem::Model {
        problem::Model {
            id: 1,
            code: "ABC001".to_string(),
            name: "A + B".to_string(),
            description: "Sum two integers.".to_string(),
            is_public: true,
        }
    }

    fn approach(name: &str, language: &str, time: &str) -> Approach {
        Approach {
            name: name.to_string(),
            language: language.to_string(),
            code: "int main() {}".to_string(),
            time_complexity: time.to_string(),
            space_complexity: "O(1)".to_string(),
            explanation: "Giải thích **đậm**.".to_string(),
        }
    }

    fn content() -> EditorialContent {
        EditorialContent {
            problem_understanding: "Cộng hai số.".to_string(),
            approaches: vec![approach("Vét cạn", "C++", "O(n)"), approach("Tối ưu", "C#", "O(1)")],
            key_insights: vec!["Ý 1".to_string(), "Ý 2".to_string()],
            common_pitfalls: vec!["Tràn số".to_string()],
        }
    }

    #[test]
    fn test_full_layout() {
        let editorial = EditorialContent {
            approaches: vec![approach("Vét cạn", "C++", "O(n)")],
            key_insights: vec!["Ý 1".to_string()],
            ..content()
        };
        let expected = "\n\
## Hiểu bài toán\n\
Cộng hai số.\n\
\n\
## Các cách tiếp cận\n\
### Cách Vét cạn\n\
\n\
```cpp\n\
int main() {}\n\
```\n\
\n\
* **Time Complexity**: O(n)\n\
* **Space Complexity**: O(1)\n\
\n\
Giải thích **đậm**.\n\
\n\
## Phân tích độ phức tạp\n\
| Cách tiếp cận | Time | Space | Tên |\n\
|--------------|------|-------|-----|\n\
| 1 | O(n) | O(1) | Vét cạn |\n\
\n\
## Bài học kinh nghiệm\n\
- Ý 1\n\
\n\
## Lỗi thường gặp\n\
- Tràn số";
        assert_eq!(render_markdown(&editorial, &problem()), expected);
    }

    #[test]
    fn test_one_subsection_and_row_per_approach() {
        let text = render_markdown(&content(), &problem());
        assert_eq!(text.matches("### Cách ").count(), 2);
        assert!(text.contains("| 1 | O(n) | O(1) | Vét cạn |\n| 2 | O(1) | O(1) | Tối ưu |\n"));
        assert!(text.contains("```csharp\n"));
    }

    #[test]
    fn test_render_is_pure() {
        let a = render_markdown(&content(), &problem());
        let b = render_markdown(&content(), &problem());
        assert_eq!(a, b);
    }
}

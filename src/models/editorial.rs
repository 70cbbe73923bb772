//! LLM 结构化输出
//!
//! `EditorialContent` 只存在于"调用 LLM"和"渲染 Markdown"之间，不落库。

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use crate::error::LlmError;

/// 结构化输出的 schema 名称（provider 侧约束解码使用）
pub const SCHEMA_NAME: &str = "EditorialContent";

/// 一种解题思路
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approach {
    pub name: String,
    pub language: String,
    pub code: String,
    pub time_complexity: String,
    pub space_complexity: String,
    pub explanation: String,
}

/// 题解的结构化内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorialContent {
    pub problem_understanding: String,
    /// 从最简单到最优
    pub approaches: Vec<Approach>,
    pub key_insights: Vec<String>,
    pub common_pitfalls: Vec<String>,
}

impl EditorialContent {
    /// 解析 LLM 返回的 JSON 文本并校验
    pub fn from_json(text: &str) -> Result<Self, LlmError> {
        let content: Self = serde_json::from_str(text.trim())?;
        content.validate()?;
        Ok(content)
    }

    /// 校验数量约束（与 schema 中的 minItems 一致）
    pub fn validate(&self) -> Result<(), LlmError> {
        let violation = if self.approaches.is_empty() {
            Some("approaches 至少需要 1 项")
        } else if self.key_insights.is_empty() {
            Some("key_insights 至少需要 1 项")
        } else if self.common_pitfalls.is_empty() {
            Some("common_pitfalls 至少需要 1 项")
        } else {
            None
        };

        match violation {
            Some(reason) => Err(LlmError::SchemaViolation {
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// 传给 provider 的 JSON Schema
    pub fn json_schema() -> JsonValue {
        json!({
            "title": SCHEMA_NAME,
            "description": "Structured editorial content.",
            "type": "object",
            "properties": {
                "problem_understanding": {
                    "type": "string",
                    "description": "Clear explanation of what the problem asks and the key concepts"
                },
                "approaches": {
                    "type": "array",
                    "description": "List of solution approaches, from simplest to most optimal",
                    "minItems": 1,
                    "items": approach_schema()
                },
                "key_insights": {
                    "type": "array",
                    "description": "Key insights and patterns to recognize similar problems",
                    "minItems": 1,
                    "items": { "type": "string" }
                },
                "common_pitfalls": {
                    "type": "array",
                    "description": "Common mistakes and edge cases to watch out for",
                    "minItems": 1,
                    "items": { "type": "string" }
                }
            },
            "required": ["problem_understanding", "approaches", "key_insights", "common_pitfalls"],
            "additionalProperties": false
        })
    }
}

fn approach_schema() -> JsonValue {
    json!({
        "title": "Approach",
        "description": "Represents a solution approach.",
        "type": "object",
        "properties": {
            "name": {
                "type": "string",
                "description": "Name of the approach (e.g., 'Brute Force', 'Hash Map', 'Two Pointers')"
            },
            "language": {
                "type": "string",
                "description": "Programming language used"
            },
            "code": {
                "type": "string",
                "description": "Code snippet for this approach"
            },
            "time_complexity": {
                "type": "string",
                "description": "Time complexity in Big-O notation (e.g., 'O(n)', 'O(n log n)')"
            },
            "space_complexity": {
                "type": "string",
                "description": "Space complexity in Big-O notation (e.g., 'O(1)', 'O(n)')"
            },
            "explanation": {
                "type": "string",
                "description": "Detailed explanation of how this approach works"
            }
        },
        "required": ["name", "language", "code", "time_complexity", "space_complexity", "explanation"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> String {
        json!({
            "problem_understanding": "Cộng hai số nguyên.",
            "approaches": [{
                "name": "Trực tiếp",
                "language": "cpp",
                "code": "int main(){}",
                "time_complexity": "O(1)",
                "space_complexity": "O(1)",
                "explanation": "Đọc và in tổng."
            }],
            "key_insights": ["Dùng long long"],
            "common_pitfalls": ["Tràn số"]
        })
        .to_string()
    }

    #[test]
    fn test_from_json_accepts_valid_content() {
        let content = EditorialContent::from_json(&sample_json()).unwrap();
        assert_eq!(content.approaches.len(), 1);
        assert_eq!(content.approaches[0].time_complexity, "O(1)");
    }

    #[test]
    fn test_from_json_rejects_empty_insights() {
        let mut value: JsonValue = serde_json::from_str(&sample_json()).unwrap();
        value["key_insights"] = json!([]);
        let err = EditorialContent::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, LlmError::SchemaViolation { .. }));
    }

    #[test]
    fn test_from_json_rejects_missing_field() {
        let mut value: JsonValue = serde_json::from_str(&sample_json()).unwrap();
        value.as_object_mut().unwrap().remove("common_pitfalls");
        let err = EditorialContent::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, LlmError::JsonParseFailed(_)));
    }

    #[test]
    fn test_schema_requires_every_field() {
        let schema = EditorialContent::json_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert_eq!(schema["properties"]["approaches"]["minItems"], 1);
        assert_eq!(
            schema["properties"]["approaches"]["items"]["required"]
                .as_array()
                .unwrap()
                .len(),
            6
        );
    }
}

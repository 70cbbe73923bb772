//! 文本处理工具

/// 按字符截断源代码，被截断时追加标记
pub fn truncate_source(source: &str, max_chars: usize) -> String {
    if source.chars().count() > max_chars {
        source.chars().take(max_chars).collect::<String>() + "\n// ... (truncated)"
    } else {
        source.to_string()
    }
}

/// 代码块语言标记：转小写，c++ → cpp，c# → csharp
pub fn code_fence_language(language: &str) -> String {
    language
        .to_lowercase()
        .replace("c++", "cpp")
        .replace("c#", "csharp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_fence_language() {
        assert_eq!(code_fence_language("C++"), "cpp");
        assert_eq!(code_fence_language("C++17"), "cpp17");
        assert_eq!(code_fence_language("C#"), "csharp");
        assert_eq!(code_fence_language("Python"), "python");
        assert_eq!(code_fence_language("C"), "c");
    }

    #[test]
    fn test_truncate_source_marks_cut() {
        let source = "x".repeat(1005);
        let cut = truncate_source(&source, 1000);
        assert!(cut.ends_with("\n// ... (truncated)"));
        assert_eq!(cut.chars().filter(|c| *c == 'x').count(), 1000);

        let short = "int main() {}";
        assert_eq!(truncate_source(short, 1000), short);
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "T\u{1ed5}ng hai s\u{1ed1} nguy\u{ea}n";
        assert_eq!(truncate_source(text, 4), "T\u{1ed5}ng\n// ... (truncated)");
        assert_eq!(truncate_source(text, 100), text);
    }
}

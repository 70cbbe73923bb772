use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// 程序配置
///
/// 先由 [`Config::from_env`] 读取环境变量，再由命令行参数覆盖
#[derive(Clone, Debug)]
pub struct Config {
    // --- 数据库 ---
    pub database_url: Option<String>,
    // --- LLM 配置 ---
    pub llm_api_key: Option<String>,
    pub llm_api_base_url: Option<String>,
    pub llm_model_name: String,
    pub temperature: f32,
    /// 首次调用失败后最多再重试的次数
    pub max_retries: u32,
    /// 退避基数，第 n 次重试前等待 retry_delay × 2^n
    pub retry_delay: Duration,
    // --- 生成策略 ---
    /// 每道题最多选取的 AC 代码数
    pub solutions_per_problem: usize,
    /// 写入 prompt 的单份代码最大字符数
    pub max_source_chars: usize,
    /// 作为第一作者的管理员用户名
    pub admin_username: String,
    /// 找不到管理员时是否直接报错（否则依次回退到超级用户、第一个用户）
    pub strict_admin: bool,
    // --- 运行模式 ---
    pub dry_run: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 额外输出的日志文件
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            llm_api_key: None,
            llm_api_base_url: None,
            llm_model_name: "mimo-v2-flash".to_string(),
            temperature: 0.7,
            max_retries: 3,
            retry_delay: Duration::from_secs(2),
            solutions_per_problem: 3,
            max_source_chars: 1000,
            admin_username: "admin".to_string(),
            strict_admin: false,
            dry_run: false,
            verbose_logging: false,
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let default = Self::default();
        Ok(Self {
            database_url: non_empty_var("DATABASE_URL"),
            llm_api_key: non_empty_var("OPENAI_API_KEY"),
            llm_api_base_url: non_empty_var("OPENAI_BASE_URL"),
            llm_model_name: non_empty_var("EDITORIAL_MODEL").unwrap_or(default.llm_model_name),
            temperature: parse_var("EDITORIAL_TEMPERATURE", "f32")?
                .unwrap_or(default.temperature),
            max_retries: parse_var("EDITORIAL_MAX_RETRIES", "u32")?
                .unwrap_or(default.max_retries),
            retry_delay: parse_var::<u64>("EDITORIAL_RETRY_DELAY", "u64")?
                .map(Duration::from_secs)
                .unwrap_or(default.retry_delay),
            admin_username: non_empty_var("EDITORIAL_ADMIN_USERNAME")
                .unwrap_or(default.admin_username),
            ..default
        })
    }

    /// 取数据库地址，缺失即为致命配置错误
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(name: &str, expected_type: &str) -> Result<Option<T>, ConfigError> {
    match non_empty_var(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_constants() {
        let config = Config::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(2));
        assert_eq!(config.max_source_chars, 1000);
        assert_eq!(config.solutions_per_problem, 3);
        assert_eq!(config.admin_username, "admin");
        assert!(!config.strict_admin);
    }

    #[test]
    fn test_parse_var_reports_bad_value() {
        std::env::set_var("EDITORIAL_TEST_BAD_U32", "three");
        let err = parse_var::<u32>("EDITORIAL_TEST_BAD_U32", "u32").unwrap_err();
        std::env::remove_var("EDITORIAL_TEST_BAD_U32");
        match err {
            ConfigError::EnvVarParseFailed { var_name, value, .. } => {
                assert_eq!(var_name, "EDITORIAL_TEST_BAD_U32");
                assert_eq!(value, "three");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_database_url() {
        let config = Config::default();
        assert!(matches!(
            config.require_database_url(),
            Err(ConfigError::MissingDatabaseUrl)
        ));
    }
}

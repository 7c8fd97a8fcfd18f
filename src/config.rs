use crate::error::AppError;
use crate::workflow::ExpiryPolicy;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 测验配置文件（TOML）
    pub quiz_config_file: String,
    /// 测验内容文件（TOML 或生成接口返回的 JSON）
    pub quiz_content_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// tick 间隔（毫秒）
    pub tick_interval_ms: u64,
    /// 倒计时归零时的处理策略
    pub expiry_policy: ExpiryPolicy,
    /// 剩余多少秒时提醒一次，0 表示不提醒
    pub timer_warning_seconds: u32,
    /// 输入答案后是否自动跳到下一题
    pub auto_advance: bool,
    /// 最多答题次数，0 表示不限
    pub max_attempts: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiz_config_file: "quiz_config.toml".to_string(),
            quiz_content_file: "quiz_content.toml".to_string(),
            verbose_logging: false,
            tick_interval_ms: 1000,
            expiry_policy: ExpiryPolicy::SubmitQuiz,
            timer_warning_seconds: 30,
            auto_advance: true,
            max_attempts: 0,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            quiz_config_file: std::env::var("QUIZ_CONFIG_FILE").unwrap_or(default.quiz_config_file),
            quiz_content_file: std::env::var("QUIZ_CONTENT_FILE").unwrap_or(default.quiz_content_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            tick_interval_ms: std::env::var("TICK_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).filter(|ms| *ms > 0).unwrap_or(default.tick_interval_ms),
            expiry_policy: parse_expiry_policy().unwrap_or(default.expiry_policy),
            timer_warning_seconds: std::env::var("TIMER_WARNING_SECONDS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.timer_warning_seconds),
            auto_advance: std::env::var("AUTO_ADVANCE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.auto_advance),
            max_attempts: std::env::var("MAX_ATTEMPTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_attempts),
        }
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}

/// 读取 TIMER_EXPIRY_POLICY，值无法识别时记录警告并回退默认值
fn parse_expiry_policy() -> Option<ExpiryPolicy> {
    let value = std::env::var("TIMER_EXPIRY_POLICY").ok()?;
    match value.parse() {
        Ok(policy) => Some(policy),
        Err(_) => {
            tracing::warn!(
                "{}",
                AppError::env_var_parse_failed("TIMER_EXPIRY_POLICY", value, "submit | advance")
            );
            None
        }
    }
}

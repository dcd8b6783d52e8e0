use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    pub fragments: FragmentsConfig,
    pub target: TargetConfig,
    pub output: Option<OutputConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentsConfig {
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub file: String,
    pub declaration: Option<String>,
    pub end_anchor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub report_json: Option<String>,
    pub check: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

pub const DEFAULT_DECLARATION: &str = "D";
pub const DEFAULT_END_ANCHOR: &str = "</script>";

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);
        let config: TomlConfig = toml::from_str(&processed_content)?;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${DOCS_ROOT})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("valid env var regex");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn set_check(&mut self, check: bool) {
        match self.output.as_mut() {
            Some(output) => output.check = Some(check),
            None => {
                self.output = Some(OutputConfig {
                    report_json: None,
                    check: Some(check),
                });
            }
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("job.name", &self.job.name)?;
        validation::validate_non_empty_list("fragments.files", &self.fragments.files)?;
        for file in &self.fragments.files {
            validation::validate_path("fragments.files", file)?;
        }
        validation::validate_file_extensions("fragments.files", &self.fragments.files, &["js", "json"])?;
        validation::validate_path("target.file", &self.target.file)?;
        validation::validate_identifier("target.declaration", self.declaration_name())?;
        validation::validate_non_empty_string("target.end_anchor", self.end_anchor())?;
        if let Some(report) = self.report_json() {
            validation::validate_path("output.report_json", report)?;
        }
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn fragment_files(&self) -> &[String] {
        &self.fragments.files
    }

    fn target_file(&self) -> &str {
        &self.target.file
    }

    fn declaration_name(&self) -> &str {
        self.target.declaration.as_deref().unwrap_or(DEFAULT_DECLARATION)
    }

    fn end_anchor(&self) -> &str {
        self.target.end_anchor.as_deref().unwrap_or(DEFAULT_END_ANCHOR)
    }

    fn check_only(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.check)
            .unwrap_or(false)
    }

    fn report_json(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.report_json.as_deref())
    }
}

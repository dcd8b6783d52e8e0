pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "docsplice")]
#[command(about = "Splices generated doc fragments into an HTML reference page")]
pub struct CliConfig {
    /// Fragment files to merge, in order
    #[arg(long, value_delimiter = ',')]
    pub fragments: Vec<String>,

    #[arg(long, default_value = "docs/reference.html")]
    pub target: String,

    /// Name of the spliced `const <NAME>={...};` declaration
    #[arg(long, default_value = "D")]
    pub declaration: String,

    /// Literal that occurs exactly once after the data block
    #[arg(long, default_value = "</script>")]
    pub end_anchor: String,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report_json: Option<String>,

    /// Compare instead of writing; fail if the target is out of date
    #[arg(long)]
    pub check: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable resource monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_list("fragments", &self.fragments)?;
        for file in &self.fragments {
            validation::validate_path("fragments", file)?;
        }
        validation::validate_file_extensions("fragments", &self.fragments, &["js", "json"])?;
        validation::validate_path("target", &self.target)?;
        validation::validate_identifier("declaration", &self.declaration)?;
        validation::validate_non_empty_string("end_anchor", &self.end_anchor)?;
        if let Some(report) = &self.report_json {
            validation::validate_path("report_json", report)?;
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn fragment_files(&self) -> &[String] {
        &self.fragments
    }

    fn target_file(&self) -> &str {
        &self.target
    }

    fn declaration_name(&self) -> &str {
        &self.declaration
    }

    fn end_anchor(&self) -> &str {
        &self.end_anchor
    }

    fn check_only(&self) -> bool {
        self.check
    }

    fn report_json(&self) -> Option<&str> {
        self.report_json.as_deref()
    }
}

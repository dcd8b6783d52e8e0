use crate::core::merge;
use crate::core::{ConfigProvider, Fragment, MergeResult, PayloadStats, Pipeline, RunSummary, Storage};
use crate::utils::error::{Result, SpliceError};

pub struct SplicePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SplicePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SplicePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Fragment>> {
        let mut fragments = Vec::new();

        // 按輸入順序讀取，單一片段失敗不會中止整個流程
        for path in self.config.fragment_files() {
            tracing::debug!("Reading fragment: {}", path);
            let bytes = match self.storage.read_file(path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("⚠️ Skipping fragment {}: {}", path, e);
                    continue;
                }
            };

            match String::from_utf8(bytes) {
                Ok(text) => fragments.push(Fragment {
                    source: path.clone(),
                    text,
                }),
                Err(e) => {
                    tracing::warn!("⚠️ Skipping fragment {}: not valid UTF-8 ({})", path, e);
                }
            }
        }

        Ok(fragments)
    }

    async fn transform(&self, fragments: Vec<Fragment>) -> Result<MergeResult> {
        let mut payloads = Vec::new();
        let mut stats = Vec::new();

        for fragment in fragments {
            match merge::extract_payload(&fragment.text) {
                Some(payload) => {
                    let entries = merge::count_entries(&payload);
                    tracing::debug!(
                        "Extracted {} entries from {} ({} bytes)",
                        entries,
                        fragment.source,
                        payload.len()
                    );
                    stats.push(PayloadStats {
                        source: fragment.source,
                        entries,
                        bytes: payload.len(),
                    });
                    payloads.push(payload);
                }
                None => {
                    tracing::warn!(
                        "⚠️ Skipping fragment {}: no brace-delimited payload",
                        fragment.source
                    );
                }
            }
        }

        let merged = merge::merge_payloads(&payloads);
        let declaration = merge::render_declaration(self.config.declaration_name(), &merged);
        let total_entries = stats.iter().map(|s| s.entries).sum();

        Ok(MergeResult {
            declaration,
            payloads: stats,
            total_entries,
        })
    }

    async fn load(&self, result: MergeResult) -> Result<String> {
        let target = self.config.target_file();

        let bytes = self.storage.read_file(target).await?;
        let document = String::from_utf8(bytes)?;

        // 標記定位失敗必須發生在任何寫入之前
        let updated = merge::splice_document(
            &document,
            self.config.declaration_name(),
            self.config.end_anchor(),
            &result.declaration,
        )?;

        if self.config.check_only() {
            if updated != document {
                return Err(SpliceError::CheckFailed {
                    path: target.to_string(),
                });
            }
            tracing::info!("✅ {} is up to date", target);
        } else {
            self.storage.write_file(target, updated.as_bytes()).await?;
            tracing::debug!("Wrote {} bytes to {}", updated.len(), target);
        }

        if let Some(report_path) = self.config.report_json() {
            let summary = RunSummary {
                target: target.to_string(),
                fragments_merged: result.payloads.len(),
                total_entries: result.total_entries,
                output_bytes: updated.len(),
                check_only: self.config.check_only(),
                finished_at: chrono::Utc::now(),
                payloads: result.payloads.clone(),
            };
            let json = serde_json::to_string_pretty(&summary)?;
            self.storage.write_file(report_path, json.as_bytes()).await?;
            tracing::debug!("Run report written to {}", report_path);
        }

        Ok(target.to_string())
    }
}

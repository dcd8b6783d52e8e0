use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct SpliceEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> SpliceEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        println!("Starting splice process...");

        // Extract
        println!("Reading fragments...");
        let fragments = self.pipeline.extract().await?;
        println!("Read {} fragments", fragments.len());
        self.monitor.log_stats("Extract");

        // Transform
        println!("Merging payloads...");
        let merged = self.pipeline.transform(fragments).await?;
        for payload in &merged.payloads {
            println!(
                "  {}: {} entries ({} bytes)",
                payload.source, payload.entries, payload.bytes
            );
        }
        println!(
            "Merged {} entries from {} payloads",
            merged.total_entries,
            merged.payloads.len()
        );
        self.monitor.log_stats("Transform");

        // Load
        println!("Splicing target document...");
        let output_bytes = merged.declaration.len();
        let output_path = self.pipeline.load(merged).await?;
        println!("Spliced {} bytes into: {}", output_bytes, output_path);
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}

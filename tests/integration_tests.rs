use docsplice::{CliConfig, LocalStorage, SpliceEngine, SplicePipeline, SpliceError};
use tempfile::TempDir;

const TARGET: &str = "<html>\n<script>const D={OLD};</script>\n</html>\n";

fn write_file(dir: &TempDir, name: &str, content: &str) {
    std::fs::write(dir.path().join(name), content).unwrap();
}

fn read_file(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join(name)).unwrap()
}

fn base_config(fragments: Vec<String>) -> CliConfig {
    CliConfig {
        fragments,
        target: "reference.html".to_string(),
        declaration: "D".to_string(),
        end_anchor: "</script>".to_string(),
        report_json: None,
        check: false,
        verbose: false,
        monitor: false,
    }
}

fn engine_for(
    dir: &TempDir,
    config: CliConfig,
) -> SpliceEngine<SplicePipeline<LocalStorage, CliConfig>> {
    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    SpliceEngine::new(SplicePipeline::new(storage, config))
}

#[tokio::test]
async fn test_end_to_end_splice() {
    let temp_dir = TempDir::new().unwrap();

    write_file(&temp_dir, "core.js", "// generated - do not edit\n{a:1},\n");
    write_file(&temp_dir, "extra.js", "{b:2}\n");
    write_file(&temp_dir, "reference.html", TARGET);

    let config = base_config(vec!["core.js".to_string(), "extra.js".to_string()]);
    let engine = engine_for(&temp_dir, config);

    let result = engine.run().await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), "reference.html");

    assert_eq!(
        read_file(&temp_dir, "reference.html"),
        "<html>\n<script>const D={\na:1,\n\nb:2\n};</script>\n</html>\n"
    );
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();

    write_file(&temp_dir, "core.js", "{a:1},\n");
    write_file(&temp_dir, "extra.js", "{b:2}\n");
    write_file(&temp_dir, "reference.html", TARGET);

    let config = base_config(vec!["core.js".to_string(), "extra.js".to_string()]);
    let engine = engine_for(&temp_dir, config);

    engine.run().await.unwrap();
    let first = read_file(&temp_dir, "reference.html");

    // second run consumes the freshly produced output as its target
    engine.run().await.unwrap();
    let second = read_file(&temp_dir, "reference.html");

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_fragment_is_skipped() {
    let temp_dir = TempDir::new().unwrap();

    write_file(&temp_dir, "core.js", "{a:1}\n");
    write_file(&temp_dir, "reference.html", TARGET);

    let config = base_config(vec![
        "core.js".to_string(),
        "nonexistent.js".to_string(),
    ]);
    let engine = engine_for(&temp_dir, config);

    // missing fragment must not take the run down
    engine.run().await.unwrap();

    assert_eq!(
        read_file(&temp_dir, "reference.html"),
        "<html>\n<script>const D={\na:1\n};</script>\n</html>\n"
    );
}

#[tokio::test]
async fn test_malformed_fragment_is_skipped() {
    let temp_dir = TempDir::new().unwrap();

    write_file(&temp_dir, "core.js", "{a:1}\n");
    write_file(&temp_dir, "broken.js", "no braces at all\n");
    write_file(&temp_dir, "reference.html", TARGET);

    let config = base_config(vec!["broken.js".to_string(), "core.js".to_string()]);
    let engine = engine_for(&temp_dir, config);

    engine.run().await.unwrap();

    assert_eq!(
        read_file(&temp_dir, "reference.html"),
        "<html>\n<script>const D={\na:1\n};</script>\n</html>\n"
    );
}

#[tokio::test]
async fn test_missing_start_marker_aborts_without_write() {
    let temp_dir = TempDir::new().unwrap();

    let original = "<html><script>var other=1;</script></html>";
    write_file(&temp_dir, "core.js", "{a:1}\n");
    write_file(&temp_dir, "reference.html", original);

    let config = base_config(vec!["core.js".to_string()]);
    let engine = engine_for(&temp_dir, config);

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, SpliceError::StartMarkerMissing { .. }));

    // target must be byte-for-byte unchanged
    assert_eq!(read_file(&temp_dir, "reference.html"), original);
}

#[tokio::test]
async fn test_ambiguous_anchor_aborts_without_write() {
    let temp_dir = TempDir::new().unwrap();

    let original =
        "<html><script>const D={OLD};</script><script>var x=1;</script></html>";
    write_file(&temp_dir, "core.js", "{a:1}\n");
    write_file(&temp_dir, "reference.html", original);

    let config = base_config(vec!["core.js".to_string()]);
    let engine = engine_for(&temp_dir, config);

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, SpliceError::AnchorAmbiguous { count: 2, .. }));

    assert_eq!(read_file(&temp_dir, "reference.html"), original);
}

#[tokio::test]
async fn test_check_mode_roundtrip() {
    let temp_dir = TempDir::new().unwrap();

    write_file(&temp_dir, "core.js", "{a:1}\n");
    write_file(&temp_dir, "reference.html", TARGET);

    // stale target fails the check and leaves the file alone
    let mut config = base_config(vec!["core.js".to_string()]);
    config.check = true;
    let engine = engine_for(&temp_dir, config);

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, SpliceError::CheckFailed { .. }));
    assert_eq!(read_file(&temp_dir, "reference.html"), TARGET);

    // after a real run, the same check passes
    let config = base_config(vec!["core.js".to_string()]);
    let engine = engine_for(&temp_dir, config);
    engine.run().await.unwrap();

    let mut config = base_config(vec!["core.js".to_string()]);
    config.check = true;
    let engine = engine_for(&temp_dir, config);
    assert!(engine.run().await.is_ok());
}

#[tokio::test]
async fn test_json_report_is_written() {
    let temp_dir = TempDir::new().unwrap();

    write_file(&temp_dir, "core.js", "{a:1,b:2},\n");
    write_file(&temp_dir, "extra.js", "{c:3}\n");
    write_file(&temp_dir, "reference.html", TARGET);

    let mut config = base_config(vec!["core.js".to_string(), "extra.js".to_string()]);
    config.report_json = Some("splice-report.json".to_string());
    let engine = engine_for(&temp_dir, config);

    engine.run().await.unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&read_file(&temp_dir, "splice-report.json")).unwrap();
    assert_eq!(report["target"], "reference.html");
    assert_eq!(report["fragments_merged"], 2);
    assert_eq!(report["total_entries"], 3);
    assert_eq!(report["payloads"][0]["source"], "core.js");
    assert_eq!(report["payloads"][0]["entries"], 2);
    assert_eq!(report["payloads"][1]["source"], "extra.js");
    assert_eq!(report["payloads"][1]["entries"], 1);
    assert!(report["finished_at"].is_string());
}

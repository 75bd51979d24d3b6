use async_trait::async_trait;
use bedrock_core::{JsonFileLedgerStore, SaveMode, parse_links_response, refresh};
use bedrock_model::{Channel, FetchError, LedgerStore, LinkSource, RawLinkSet, TrackerError};
use tempfile::tempdir;

struct PayloadSource(&'static str);

#[async_trait]
impl LinkSource for PayloadSource {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn fetch_links(&self) -> Result<RawLinkSet, FetchError> {
        parse_links_response(self.0)
    }
}

const CURRENT: &str = r#"{"result":{"links":[
    {"downloadType":"serverBedrockWindows","downloadUrl":"https://www.minecraft.net/bedrockdedicatedserver/bin-win/bedrock-server-1.21.50.3.zip"},
    {"downloadType":"serverBedrockLinux","downloadUrl":"https://www.minecraft.net/bedrockdedicatedserver/bin-linux/bedrock-server-1.21.50.3.zip"},
    {"downloadType":"serverBedrockPreviewWindows","downloadUrl":"https://www.minecraft.net/bedrockdedicatedserver/bin-win-preview/bedrock-server-1.21.60.1.zip"},
    {"downloadType":"serverBedrockPreviewLinux","downloadUrl":"https://www.minecraft.net/bedrockdedicatedserver/bin-linux-preview/bedrock-server-1.21.60.1.zip"}
]}}"#;

const MISMATCHED: &str = r#"{"result":{"links":[
    {"downloadType":"serverBedrockWindows","downloadUrl":"https://www.minecraft.net/bedrockdedicatedserver/bin-win/bedrock-server-1.21.50.zip"},
    {"downloadType":"serverBedrockLinux","downloadUrl":"https://www.minecraft.net/bedrockdedicatedserver/bin-linux/bedrock-server-1.21.51.zip"},
    {"downloadType":"serverBedrockPreviewWindows","downloadUrl":"https://www.minecraft.net/bedrockdedicatedserver/bin-win-preview/bedrock-server-1.21.70.1.zip"},
    {"downloadType":"serverBedrockPreviewLinux","downloadUrl":"https://www.minecraft.net/bedrockdedicatedserver/bin-linux-preview/bedrock-server-1.21.70.1.zip"}
]}}"#;

#[tokio::test]
async fn first_run_creates_ledger_and_second_run_is_byte_stable() {
    let temp_dir = tempdir().expect("create temp dir");
    let path = temp_dir.path().join("bedrock-server-downloads.json");
    let store = JsonFileLedgerStore::new(&path);

    let report = refresh(&PayloadSource(CURRENT), &store, SaveMode::Persist)
        .await
        .expect("first run should succeed");
    assert_eq!(report.added(), 2);

    let first = std::fs::read_to_string(&path).expect("read ledger");
    let ledger = store.load().expect("load ledger");
    assert_eq!(
        ledger
            .get(Channel::Regular, "1.21.50")
            .map(|r| r.linux.url.as_str()),
        Some("https://www.minecraft.net/bedrockdedicatedserver/bin-linux/bedrock-server-1.21.50.3.zip")
    );
    assert!(ledger.contains(Channel::Preview, "1.21.60"));

    let report = refresh(&PayloadSource(CURRENT), &store, SaveMode::Persist)
        .await
        .expect("second run should succeed");
    assert!(!report.has_changes());

    let second = std::fs::read_to_string(&path).expect("read ledger again");
    assert_eq!(first, second);
}

#[tokio::test]
async fn mismatch_leaves_file_untouched() {
    let temp_dir = tempdir().expect("create temp dir");
    let path = temp_dir.path().join("bedrock-server-downloads.json");
    let store = JsonFileLedgerStore::new(&path);
    refresh(&PayloadSource(CURRENT), &store, SaveMode::Persist)
        .await
        .expect("seed run should succeed");
    let before = std::fs::read_to_string(&path).expect("read ledger");

    let err = refresh(&PayloadSource(MISMATCHED), &store, SaveMode::Persist)
        .await
        .expect_err("mismatched links should fail");

    assert!(matches!(
        err,
        TrackerError::VersionMismatch {
            channel: Channel::Regular,
            ..
        }
    ));
    assert_eq!(std::fs::read_to_string(&path).expect("read ledger"), before);
}

#[tokio::test]
async fn corrupt_ledger_is_rebuilt_from_scratch() {
    let temp_dir = tempdir().expect("create temp dir");
    let path = temp_dir.path().join("bedrock-server-downloads.json");
    std::fs::write(&path, "{\"release\": {\"1.21.40\"").expect("write corrupt ledger");
    let store = JsonFileLedgerStore::new(&path);

    refresh(&PayloadSource(CURRENT), &store, SaveMode::Persist)
        .await
        .expect("run over corrupt ledger should succeed");

    let ledger = store.load().expect("load rebuilt ledger");
    assert_eq!(ledger.len(), 2);
}

#[tokio::test]
async fn non_utf8_ledger_keeps_known_versions() {
    let temp_dir = tempdir().expect("create temp dir");
    let path = temp_dir.path().join("bedrock-server-downloads.json");
    let mut bytes = br#"{"release":{"1.21.40":{"windows":{"url":"w"},"linux":{"url":"l"#.to_vec();
    bytes.push(0xFF);
    bytes.extend_from_slice(br#""}}},"preview":{}}"#);
    std::fs::write(&path, bytes).expect("write ledger with a stray byte");
    let store = JsonFileLedgerStore::new(&path);

    let report = refresh(&PayloadSource(CURRENT), &store, SaveMode::Persist)
        .await
        .expect("run over lossy ledger should succeed");
    assert_eq!(report.added(), 2);

    let ledger = store.load().expect("load merged ledger");
    assert!(ledger.contains(Channel::Regular, "1.21.40"));
    assert_eq!(ledger.len(), 3);
}

//! Integration tests for the JSON-lines protocol server

use medscan_cli::commands::serve_stream;
use medscan_worker::{EngineEvent, WorkerConfig};
use std::io::Write;
use tempfile::NamedTempFile;

async fn serve(input: &str, config: WorkerConfig) -> Vec<EngineEvent> {
    let output = serve_stream(input.as_bytes(), Vec::new(), config).await.unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| EngineEvent::from_line(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_init_and_analyze() {
    let input = concat!(
        "{\"type\":\"INIT\"}\n",
        "{\"type\":\"ANALYZE\",\"seq\":1,\"text\":\"Patient has diabetes and hypertension.\"}\n",
    );
    let events = serve(input, WorkerConfig::default()).await;

    assert_eq!(events.first(), Some(&EngineEvent::Ready { entries: 15 }));
    match events.last() {
        Some(EngineEvent::Result { seq: 1, entities }) => {
            assert_eq!(entities.len(), 2);
            assert_eq!(entities[0].code, "E11.9");
            assert_eq!(entities[1].code, "I10");
        }
        other => panic!("expected RESULT, got {:?}", other),
    }
    assert!(events
        .iter()
        .any(|e| matches!(e, EngineEvent::Progress { seq: 1, percent: 100 })));
}

#[tokio::test]
async fn test_bad_lines_are_skipped() {
    let input = concat!(
        "not json\n",
        "\n",
        "{\"type\":\"PING\"}\n",
        "{\"type\":\"ANALYZE\",\"seq\":1}\n",
        "{\"type\":\"INIT\"}\n",
    );
    let events = serve(input, WorkerConfig::default()).await;

    assert_eq!(events, vec![EngineEvent::Ready { entries: 15 }]);
}

#[tokio::test]
async fn test_shutdown_stops_reading() {
    let input = concat!(
        "{\"type\":\"SHUTDOWN\"}\n",
        "{\"type\":\"INIT\"}\n",
    );
    let events = serve(input, WorkerConfig::default()).await;
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_custom_terminology() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"code,desc,chapter\nJ45.901,\"Asthma attack, severe\",Respiratory\n")
        .unwrap();
    file.flush().unwrap();

    let config = WorkerConfig::default().with_terminology(file.path());
    let input = "{\"type\":\"ANALYZE\",\"seq\":4,\"text\":\"Asthma attak noted\"}\n";
    let events = serve(input, config).await;

    match events.last() {
        Some(EngineEvent::Result { seq: 4, entities }) => {
            assert_eq!(entities.len(), 1);
            assert_eq!(entities[0].term, "Asthma attak");
        }
        other => panic!("expected RESULT, got {:?}", other),
    }
}

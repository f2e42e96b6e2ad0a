// Integration tests for `UiLoadTester` using wiremock.
#![allow(clippy::unwrap_used)]

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sprinkler_api::{Error, FileReport, LoadTestEvent, TransportConfig, UI_FILES, UiLoadTester};

// ── Helpers ─────────────────────────────────────────────────────────

fn tester_for(server: &MockServer) -> UiLoadTester {
    UiLoadTester::new(server.address().to_string(), &TransportConfig::default()).unwrap()
}

fn ignore_events(_: LoadTestEvent<'_>) -> Result<(), Error> {
    Ok(())
}

async fn mount_file(server: &MockServer, file: &str, ok_responses: u64, fallback_status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/{file}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .up_to_n_times(ok_responses)
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/{file}")))
        .respond_with(ResponseTemplate::new(fallback_status))
        .mount(server)
        .await;
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_all_requests_okay() {
    let server = MockServer::start().await;
    for file in UI_FILES {
        mount_file(&server, file, 10, 500).await;
    }

    let report = tester_for(&server).run(10, ignore_events).await.unwrap();

    assert_eq!(report.host, server.address().to_string());
    assert_eq!(
        report.files,
        vec![
            FileReport { file: "index.html".into(), repeat: 10, okay: 10 },
            FileReport { file: "sprinklers.js".into(), repeat: 10, okay: 10 },
        ]
    );
}

#[tokio::test]
async fn test_non_200_responses_are_counted_not_raised() {
    let server = MockServer::start().await;
    mount_file(&server, "index.html", 7, 503).await;
    mount_file(&server, "sprinklers.js", 10, 503).await;

    let report = tester_for(&server).run(10, ignore_events).await.unwrap();

    assert_eq!(report.files[0].okay, 7);
    assert_eq!(report.files[1].okay, 10);
}

#[tokio::test]
async fn test_requests_are_issued_repeat_times_per_file() {
    let server = MockServer::start().await;
    for file in UI_FILES {
        Mock::given(method("GET"))
            .and(path(format!("/{file}")))
            .respond_with(ResponseTemplate::new(200))
            .expect(3)
            .mount(&server)
            .await;
    }

    let okay = tester_for(&server).count_okay("index.html", 3).await.unwrap();
    assert_eq!(okay, 3);
    let okay = tester_for(&server).count_okay("sprinklers.js", 3).await.unwrap();
    assert_eq!(okay, 3);
}

#[tokio::test]
async fn test_events_follow_file_order() {
    let server = MockServer::start().await;
    for file in UI_FILES {
        mount_file(&server, file, 2, 404).await;
    }

    let mut seen = Vec::new();
    tester_for(&server)
        .run(2, |event| {
            seen.push(match event {
                LoadTestEvent::Started { host } => format!("start {host}"),
                LoadTestEvent::FileStarted { file, repeat } => format!("run {file} x{repeat}"),
                LoadTestEvent::FileFinished(r) => format!("done {} {}", r.file, r.okay),
            });
            Ok::<_, Error>(())
        })
        .await
        .unwrap();

    assert_eq!(
        seen,
        vec![
            format!("start {}", server.address()),
            "run index.html x2".to_string(),
            "done index.html 2".to_string(),
            "run sprinklers.js x2".to_string(),
            "done sprinklers.js 2".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_transport_error_aborts_run() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().to_string()
    };
    let tester = UiLoadTester::new(addr, &TransportConfig::default()).unwrap();

    let mut finished = 0;
    let err = tester
        .run(5, |event| {
            if matches!(event, LoadTestEvent::FileFinished(_)) {
                finished += 1;
            }
            Ok::<_, Error>(())
        })
        .await
        .unwrap_err();

    assert!(err.is_transport(), "expected transport error, got {err:?}");
    assert_eq!(finished, 0);
}

#[tokio::test]
async fn test_zero_repeat_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let report = tester_for(&server).run(0, ignore_events).await.unwrap();
    assert!(report.files.iter().all(|f| f.okay == 0 && f.repeat == 0));
    assert_eq!(report.files.len(), 2);
}

#[derive(Debug)]
enum ReportError {
    Api(Error),
    Stopped,
}

impl From<Error> for ReportError {
    fn from(err: Error) -> Self {
        Self::Api(err)
    }
}

#[tokio::test]
async fn test_callback_error_stops_run_before_next_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sprinklers.js"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = tester_for(&server)
        .run(2, |event| match event {
            LoadTestEvent::FileFinished(_) => Err(ReportError::Stopped),
            _ => Ok(()),
        })
        .await
        .unwrap_err();

    match err {
        ReportError::Stopped => {}
        ReportError::Api(e) => panic!("expected the callback's error, got {e:?}"),
    }
}

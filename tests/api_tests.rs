use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/main_goals.json");

/// A request as seen by the stub: request line, lower-cased headers, body
struct Recorded {
    line: String,
    headers: Vec<String>,
    body: String,
}

/// Minimal HTTP/1.1 server answering fixed routes, one request per connection
struct StubServer {
    url: String,
    requests: mpsc::Receiver<Recorded>,
}

impl StubServer {
    fn start(routes: Vec<(&'static str, u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let recorded = handle(stream, &routes);
                if tx.send(recorded).is_err() {
                    break;
                }
            }
        });

        Self { url, requests: rx }
    }

    fn next_request(&self) -> Recorded {
        self.requests.recv_timeout(Duration::from_secs(5)).unwrap()
    }

    fn no_more_requests(&self) -> bool {
        self.requests.recv_timeout(Duration::from_millis(200)).is_err()
    }
}

fn handle(mut stream: TcpStream, routes: &[(&'static str, u16, String)]) -> Recorded {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut line = String::new();
    reader.read_line(&mut line).unwrap();
    let line = line.trim_end().to_string();

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        reader.read_line(&mut header).unwrap();
        let header = header.trim_end().to_lowercase();
        if header.is_empty() {
            break;
        }
        if let Some(len) = header.strip_prefix("content-length:") {
            content_length = len.trim().parse().unwrap();
        }
        headers.push(header);
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).unwrap();

    let (status, response_body) = routes
        .iter()
        .find(|(route, _, _)| line.split_whitespace().nth(1) == Some(*route))
        .map(|(_, status, body)| (*status, body.clone()))
        .unwrap_or((404, String::new()));
    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        response_body.len(),
        response_body
    );
    stream.write_all(response.as_bytes()).unwrap();
    stream.flush().unwrap();

    Recorded {
        line,
        headers,
        body: String::from_utf8(body).unwrap(),
    }
}

fn goals_body() -> String {
    fs::read_to_string(FIXTURE).unwrap()
}

fn setup_test_env(server: &StubServer) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join(".podtrack");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("rc"),
        format!("data.location=session.db\napi.url={}\napi.timeout=10s\n", server.url),
    )
    .unwrap();
    get_podtrack_cmd(&temp_dir)
        .args(&["login", "--token", "secret-token"])
        .assert()
        .success();
    temp_dir
}

fn get_podtrack_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("podtrack").unwrap();
    cmd.env("HOME", temp_dir.path())
        .env("COLUMNS", "100")
        .env_remove("PODTRACK_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_goals_from_api_sends_bearer_token() {
    let server = StubServer::start(vec![("/getMainGoals", 200, goals_body())]);
    let temp_dir = setup_test_env(&server);

    get_podtrack_cmd(&temp_dir)
        .args(&["goals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Career Pathway [CAR]"));

    let request = server.next_request();
    assert_eq!(request.line, "GET /getMainGoals HTTP/1.1");
    assert!(request.headers.iter().any(|h| h == "authorization: bearer secret-token"));
}

#[test]
fn test_check_posts_update() {
    let server = StubServer::start(vec![
        ("/getMainGoals", 200, goals_body()),
        ("/updateCheckbox", 200, "{}".to_string()),
    ]);
    let temp_dir = setup_test_env(&server);

    get_podtrack_cmd(&temp_dir)
        .args(&["check", "trainee", "FIN_Youth_Budget__c"])
        .assert()
        .success()
        .stdout("Checked FIN_Youth_Budget__c in Trainee.\n");

    assert!(server.next_request().line.starts_with("GET /getMainGoals"));
    let update = server.next_request();
    assert_eq!(update.line, "POST /updateCheckbox HTTP/1.1");
    let body: serde_json::Value = serde_json::from_str(&update.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"pod": "Trainee", "task_title": "FIN_Youth_Budget__c", "new_value": true})
    );
}

#[test]
fn test_uncheck_posts_false() {
    let server = StubServer::start(vec![
        ("/getMainGoals", 200, goals_body()),
        ("/updateCheckbox", 200, "{}".to_string()),
    ]);
    let temp_dir = setup_test_env(&server);

    get_podtrack_cmd(&temp_dir)
        .args(&["check", "Associate", "EDU_Youth_Enroll__c", "--uncheck"])
        .assert()
        .success()
        .stdout("Unchecked EDU_Youth_Enroll__c in Associate.\n");

    server.next_request();
    let body: serde_json::Value = serde_json::from_str(&server.next_request().body).unwrap();
    assert_eq!(body["new_value"], false);
    assert_eq!(body["pod"], "Associate");
}

#[test]
fn test_check_refuses_verified_task() {
    let server = StubServer::start(vec![
        ("/getMainGoals", 200, goals_body()),
        ("/updateCheckbox", 200, "{}".to_string()),
    ]);
    let temp_dir = setup_test_env(&server);

    get_podtrack_cmd(&temp_dir)
        .args(&["check", "Trainee", "CAR_Youth_Resume__c", "--uncheck"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("has been verified"));

    server.next_request();
    assert!(server.no_more_requests());
}

#[test]
fn test_check_unknown_task_suggests() {
    let server = StubServer::start(vec![("/getMainGoals", 200, goals_body())]);
    let temp_dir = setup_test_env(&server);

    get_podtrack_cmd(&temp_dir)
        .args(&["check", "Trainee", "FIN_Youth_Budgt__c"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Did you mean 'FIN_Youth_Budget__c'?"));
}

#[test]
fn test_check_sends_update_when_prefetch_fails() {
    let server = StubServer::start(vec![
        ("/getMainGoals", 503, String::new()),
        ("/updateCheckbox", 200, "{}".to_string()),
    ]);
    let temp_dir = setup_test_env(&server);

    get_podtrack_cmd(&temp_dir)
        .args(&["check", "Trainee", "FIN_Youth_Budget__c"])
        .assert()
        .success()
        .stderr(predicate::str::contains("sending update anyway"));

    server.next_request();
    assert!(server.next_request().line.starts_with("POST /updateCheckbox"));
}

#[test]
fn test_check_warns_when_pod_absent_from_goals() {
    let server = StubServer::start(vec![
        ("/getMainGoals", 200, goals_body()),
        ("/updateCheckbox", 200, "{}".to_string()),
    ]);
    let temp_dir = setup_test_env(&server);

    get_podtrack_cmd(&temp_dir)
        .args(&["check", "Partner", "LDR_Youth_Mentor__c"])
        .assert()
        .success()
        .stdout("Checked LDR_Youth_Mentor__c in Partner.\n")
        .stderr(predicate::str::contains("No Partner pod in current goals; sending update anyway"));

    server.next_request();
    let body: serde_json::Value = serde_json::from_str(&server.next_request().body).unwrap();
    assert_eq!(body["pod"], "Partner");
}

#[test]
fn test_unauthorized_is_user_error() {
    let server = StubServer::start(vec![("/getMainGoals", 401, String::new())]);
    let temp_dir = setup_test_env(&server);

    get_podtrack_cmd(&temp_dir)
        .args(&["starred"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("API returned HTTP 401"));
}

#[test]
fn test_server_error_is_internal() {
    let server = StubServer::start(vec![("/getMainGoals", 500, String::new())]);
    let temp_dir = setup_test_env(&server);

    get_podtrack_cmd(&temp_dir)
        .args(&["progress"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::starts_with("Internal error: API returned HTTP 500"));
}

#[test]
fn test_whoami() {
    let server = StubServer::start(vec![(
        "/userinfo",
        200,
        r#"{"email": "sam@example.org", "name": "Sam Rivera"}"#.to_string(),
    )]);
    let temp_dir = setup_test_env(&server);

    get_podtrack_cmd(&temp_dir)
        .args(&["whoami"])
        .assert()
        .success()
        .stdout("Sam Rivera <sam@example.org>\n");
}

#[test]
fn test_whoami_no_account() {
    let server = StubServer::start(vec![("/userinfo", 200, "{}".to_string())]);
    let temp_dir = setup_test_env(&server);

    get_podtrack_cmd(&temp_dir)
        .args(&["whoami"])
        .assert()
        .success()
        .stdout("No account found for this login.\n");
}

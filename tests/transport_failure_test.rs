use ci_slack_notify::cli::{handle_notify, NotifyArgs};
use ci_slack_notify::github::ContextFields;
use ci_slack_notify::slack::{ApiClient, DisplayOverrides, SlackPayload, WebhookClient};
use ci_slack_notify::status::JobStatus;
use ci_slack_notify::{compose, MessagePayload};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

fn context() -> ContextFields {
    ContextFields {
        repo_owner: "octocat".to_string(),
        repo_name: "hello-world".to_string(),
        repo_url: "https://github.com/octocat/hello-world".to_string(),
        ref_name: "refs/heads/main".to_string(),
        event_name: "push".to_string(),
        event_url: None,
        workflow_name: "CI".to_string(),
        workflow_url: "https://github.com/octocat/hello-world/actions/runs/42".to_string(),
    }
}

fn message() -> MessagePayload {
    compose("Build", JobStatus::Success, None, &context(), None)
}

// 读完整个 HTTP 请求（头 + Content-Length 个字节的 body）再响应
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= pos + 4 + content_length {
                break;
            }
        }
    }
}

/// 起一个只处理一次请求的本地 HTTP 服务，返回其 URL
async fn serve_once(content_type: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            content_type,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_webhook_accepts_ok_body() {
    let url = serve_once("text/plain", "ok").await;
    let payload = SlackPayload::build(&message(), &DisplayOverrides::default());
    let client = WebhookClient::new(url).unwrap();
    assert!(client.send(&payload).await.is_ok());
}

#[tokio::test]
async fn test_webhook_rejects_not_ok_body() {
    let url = serve_once("text/plain", "not_ok").await;
    let payload = SlackPayload::build(&message(), &DisplayOverrides::default());
    let client = WebhookClient::new(url).unwrap();
    let err = client.send(&payload).await.unwrap_err();
    assert!(err.to_string().contains("not_ok"));
}

#[tokio::test]
async fn test_api_rejects_ok_false_response() {
    let url = serve_once(
        "application/json",
        r#"{"ok": false, "error": "channel_not_found"}"#,
    )
    .await;
    let payload = SlackPayload::build(&message(), &DisplayOverrides::default());
    let client = ApiClient::with_endpoint("xoxb-1", url).unwrap();
    let err = client.post_message(&payload).await.unwrap_err();
    assert!(err.to_string().contains("channel_not_found"));
}

#[tokio::test]
async fn test_api_accepts_ok_true_response() {
    let url = serve_once("application/json", r#"{"ok": true, "ts": "123.456"}"#).await;
    let payload = SlackPayload::build(&message(), &DisplayOverrides::default());
    let client = ApiClient::with_endpoint("xoxb-1", url).unwrap();
    assert!(client.post_message(&payload).await.is_ok());
}

#[tokio::test]
async fn test_delivery_failure_surfaces_uniform_error() {
    // 底层原因只进日志，向上只看到统一的投递失败消息
    std::env::set_var("GITHUB_REPOSITORY", "octocat/hello-world");
    std::env::set_var("GITHUB_SHA", "6dcb09b5b57875f334f61aebed695e2e4193db5e");
    std::env::set_var("GITHUB_REF", "refs/heads/main");
    std::env::set_var("GITHUB_EVENT_NAME", "push");
    std::env::set_var("GITHUB_WORKFLOW", "CI");
    std::env::set_var("GITHUB_RUN_ID", "42");

    let url = serve_once("text/plain", "not_ok").await;
    let args = NotifyArgs {
        status: "failure".to_string(),
        job_name: "Deploy".to_string(),
        url: Some(url),
        slack_bot_token: None,
        mention: None,
        mention_if: None,
        username: None,
        channel: None,
        icon_emoji: None,
        commit: false,
        token: None,
    };

    let err = handle_notify(args).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to post message to Slack");
}

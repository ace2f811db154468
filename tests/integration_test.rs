use lark_alert::cli::{
    self, AlertArgs, CustomArgs, SendArgs, SummaryArgs, TargetArgs, UrgentArgs,
};
use lark_alert::{AlertItem, Urgency};
use mockito::Matcher;
use serde_json::json;

fn target(server: &mockito::Server) -> TargetArgs {
    TargetArgs {
        webhook_url: Some(format!("{}/hook", server.url())),
        timeout: 5,
        dry_run: false,
        json: false,
    }
}

#[test]
fn test_full_workflow() {
    // 1. 启动 mock webhook
    let mut server = mockito::Server::new();
    let text_mock = server
        .mock("POST", "/hook")
        .match_body(Matcher::PartialJson(json!({"msg_type": "text"})))
        .with_status(200)
        .with_body(r#"{"code":0,"msg":"success"}"#)
        .expect(3)
        .create();
    let card_mock = server
        .mock("POST", "/hook")
        .match_body(Matcher::PartialJson(json!({"msg_type": "interactive"})))
        .with_status(200)
        .with_body(r#"{"code":0,"msg":"success"}"#)
        .expect(1)
        .create();

    // 2. 普通文本 + @所有人
    let result = cli::handle_send(SendArgs {
        target: target(&server),
        message: Some("deploy finished".to_string()),
        mentions: vec![],
        mention_all: true,
    })
    .unwrap();
    assert!(result.success);

    // 3. 紧急告警
    let result = cli::handle_urgent(UrgentArgs {
        target: target(&server),
        title: "CRITICAL".to_string(),
        message: "BTC -15%".to_string(),
        no_mention_all: false,
    })
    .unwrap();
    assert!(result.success);

    // 4. 卡片告警
    let result = cli::handle_alert(AlertArgs {
        target: target(&server),
        title: "Volume Spike".to_string(),
        details: vec![("Pair".to_string(), "ETH/USDT".to_string())],
        urgency: Urgency::High,
    })
    .unwrap();
    assert!(result.success);

    // 5. 汇总
    let result = cli::handle_summary(SummaryArgs {
        target: target(&server),
        items: vec![AlertItem::new("Price Alert", "BTC +12%", "14:30")],
    })
    .unwrap();
    assert!(result.success);

    // 6. 校验请求数
    text_mock.assert();
    card_mock.assert();
}

#[test]
fn test_custom_alert_routing_by_urgency() {
    let mut server = mockito::Server::new();
    let urgent = server
        .mock("POST", "/hook")
        .match_body(Matcher::Regex("🚨".to_string()))
        .with_status(200)
        .with_body(r#"{"code":0}"#)
        .expect(1)
        .create();
    let headline = server
        .mock("POST", "/hook")
        .match_body(Matcher::Regex("📊".to_string()))
        .with_status(200)
        .with_body(r#"{"code":0}"#)
        .expect(1)
        .create();

    for urgency in [Urgency::High, Urgency::Low] {
        let result = cli::handle_custom(CustomArgs {
            target: target(&server),
            kind: "Liquidity".to_string(),
            message: "DOGE/USDT order book thin".to_string(),
            urgency,
        })
        .unwrap();
        assert!(result.success);
    }

    urgent.assert();
    headline.assert();
}

#[test]
fn test_failed_send_is_reported_not_raised() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/hook")
        .with_status(400)
        .with_body("bad request")
        .create();

    let result = cli::handle_send(SendArgs {
        target: target(&server),
        message: Some("hello".to_string()),
        mentions: vec![],
        mention_all: false,
    })
    .unwrap();

    assert!(!result.success);
    assert_eq!(result.status_code, Some(400));
    let rendered = cli::format_result(&result);
    assert!(rendered.contains("❌ Failed to send message!"));
    assert!(rendered.contains("400"));
}

#[test]
fn test_missing_url_is_config_error() {
    let args = SendArgs {
        target: TargetArgs {
            webhook_url: None,
            timeout: 5,
            dry_run: false,
            json: false,
        },
        message: Some("hello".to_string()),
        mentions: vec![],
        mention_all: false,
    };

    let err = cli::handle_send(args).unwrap_err();
    assert!(err.to_string().contains("webhook URL is required"));
}

#[test]
fn test_dry_run_needs_no_url() {
    let args = SendArgs {
        target: TargetArgs {
            webhook_url: None,
            timeout: 5,
            dry_run: true,
            json: true,
        },
        message: Some("hello".to_string()),
        mentions: vec!["ou_123".to_string()],
        mention_all: false,
    };

    let result = cli::handle_send(args).unwrap();
    assert!(result.success);
    let text = result.data.unwrap()["content"]["text"].as_str().unwrap().to_string();
    assert!(text.starts_with("<at user_id=\"ou_123\">"));
    assert!(text.ends_with("hello"));
}

//! lark-alert 二进制的参数解析与退出码

use std::process::{Command, Output};

fn lark_alert(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lark-alert"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

// ============================================================================
// 参数解析
// ============================================================================

mod parse_tests {
    use super::*;

    #[test]
    fn test_send_dry_run_with_only_message() {
        let output = lark_alert(&["send", "--dry-run", "hello"]);
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert_eq!(output.status.code(), Some(0));
        assert!(stdout.contains("\"text\": \"hello\""));
        assert!(!stdout.contains("request example"));
    }

    #[test]
    fn test_missing_required_argument_exits_1() {
        let output = lark_alert(&["urgent", "--dry-run", "--message", "BTC -15%"]);
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("--title"));
    }

    #[test]
    fn test_unknown_subcommand_exits_1() {
        assert_eq!(lark_alert(&["broadcast"]).status.code(), Some(1));
    }

    #[test]
    fn test_help_exits_0() {
        let output = lark_alert(&["--help"]);
        assert_eq!(output.status.code(), Some(0));
        assert!(String::from_utf8_lossy(&output.stdout).contains("send"));
    }
}

// ============================================================================
// 运行期错误
// ============================================================================

mod runtime_tests {
    use super::*;

    #[test]
    fn test_send_without_url_exits_1() {
        let output = lark_alert(&["send"]);
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("webhook URL is required"));
    }
}

//! Output formatting for CLI commands

use serde::Serialize;

use crate::notification::DispatchResult;

/// Format output as pretty JSON
pub fn format_output<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// Human readable dispatch result
pub fn format_result(result: &DispatchResult) -> String {
    let mut lines = Vec::new();

    if result.success {
        lines.push("✅ Message sent successfully!".to_string());
        if let Some(code) = result.status_code {
            lines.push(format!("Status Code: {}", code));
        }
        if let Some(data) = &result.data {
            lines.push(format!("Response: {}", format_output(data)));
        }
    } else {
        lines.push("❌ Failed to send message!".to_string());
        lines.push(format!("Error: {}", result.error.as_deref().unwrap_or("unknown error")));
        if let Some(code) = result.status_code {
            lines.push(format!("Status Code: {}", code));
        }
    }

    lines.join("\n")
}

/// 打印结果（`--json` 时输出 JSON）
pub fn print_result(result: &DispatchResult, json: bool) {
    if json {
        println!("{}", format_output(result));
    } else if result.success {
        println!("{}", format_result(result));
    } else {
        eprintln!("{}", format_result(result));
    }
}

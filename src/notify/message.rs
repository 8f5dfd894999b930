//! Notification email composition

use chrono::{DateTime, Local};

use crate::types::format_timestamp;

/// A fully composed notification, independent of the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

pub fn subject_for(count: usize) -> String {
    format!("🎉 域名可注册提醒 - 发现 {} 个可注册域名！", count)
}

/// Render the HTML body listing every available domain
pub fn html_body_for(domains: &[String], generated_at: &DateTime<Local>) -> String {
    let items: String = domains
        .iter()
        .map(|domain| {
            format!(
                "<li style=\"margin: 10px 0;\"><strong>{}</strong></li>\n",
                escape_html(domain)
            )
        })
        .collect();

    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; padding: 20px;">
<h2 style="color: #28a745;">🎉 发现可注册的域名！</h2>
<p>以下域名当前可以注册：</p>
<ul style="font-size: 18px;">
{items}</ul>
<p style="color: #666;">请尽快抢注！</p>
<hr>
<p style="font-size: 12px; color: #999;">
检测时间: {timestamp}<br>
此邮件由域名监控脚本自动发送
</p>
</body>
</html>
"#,
        items = items,
        timestamp = format_timestamp(generated_at),
    )
}

pub fn compose(from: &str, to: &str, domains: &[String], generated_at: &DateTime<Local>) -> Email {
    Email {
        from: from.to_string(),
        to: to.to_string(),
        subject: subject_for(domains.len()),
        html_body: html_body_for(domains, generated_at),
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_subject_mentions_count() {
        assert!(subject_for(2).contains(" 2 "));
    }

    #[test]
    fn test_body_lists_domains_in_order() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let domains = vec!["foo.xyz".to_string(), "bar.com".to_string()];
        let body = html_body_for(&domains, &at);

        let foo = body.find("<strong>foo.xyz</strong>").unwrap();
        let bar = body.find("<strong>bar.com</strong>").unwrap();
        assert!(foo < bar);
        assert_eq!(body.matches("<li").count(), 2);
        assert!(body.contains("检测时间: 2024-05-01 08:30:00"));
    }

    #[test]
    fn test_domains_are_escaped() {
        let at = Local::now();
        let body = html_body_for(&["<b>x</b>.com".to_string()], &at);
        assert!(body.contains("&lt;b&gt;x&lt;/b&gt;.com"));
        assert!(!body.contains("<b>x</b>"));
    }

    #[test]
    fn test_compose() {
        let at = Local::now();
        let email = compose("bot@example.org", "me@example.org", &["a.io".to_string()], &at);
        assert_eq!(email.from, "bot@example.org");
        assert_eq!(email.to, "me@example.org");
        assert_eq!(email.subject, subject_for(1));
    }
}

use serde::{Deserialize, Serialize};

/// Body of a Feishu custom-bot webhook call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeishuMessage {
    pub msg_type: String,
    pub content: TextContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    pub text: String,
}

impl FeishuMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            msg_type: "text".to_string(),
            content: TextContent { text: text.into() },
        }
    }

    /// The status-update announcement for one feed entry.
    pub fn status_update(title: &str, link: &str, published: &str) -> Self {
        Self::text(format!(
            "🚨 **Linode 状态更新**\n\
             📌 **标题**: {title}\n\
             🔗 **链接**: {link}\n\
             ⏰ **发布时间**: {published}"
        ))
    }
}

/// The only part of the webhook reply the relay looks at.
#[derive(Debug, Deserialize)]
pub struct FeishuResponse {
    #[serde(default)]
    pub code: Option<i64>,
}

impl FeishuResponse {
    pub fn is_ok(&self) -> bool {
        self.code == Some(0)
    }
}

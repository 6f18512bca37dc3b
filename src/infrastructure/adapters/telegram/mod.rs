//! Telegram adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::errors::BotError;
use crate::domain::entities::{self, Keyboard, Reply};
use crate::domain::traits::{Bot, BotInfo, Notifier};

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

impl From<&User> for entities::User {
    fn from(user: &User) -> Self {
        entities::User {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

impl Update {
    /// Chat, sender and text of a text message; other updates yield None
    pub fn inbound_text(&self) -> Option<(i64, Option<entities::User>, &str)> {
        let msg = self.message.as_ref()?;
        let text = msg.text.as_deref()?;
        if msg.from.as_ref().map_or(false, |u| u.is_bot) {
            return None;
        }
        Some((msg.chat.id, msg.from.as_ref().map(entities::User::from), text))
    }
}

/// Envelope every Bot API method answers with
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Result<T, BotError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(BotError::Network(format!(
                "Telegram API error: {}",
                self.description.unwrap_or_else(|| "no description".to_string())
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
struct ReplyKeyboardMarkup {
    keyboard: Vec<Vec<KeyboardButton>>,
    resize_keyboard: bool,
    one_time_keyboard: bool,
}

#[derive(Debug, Serialize)]
struct KeyboardButton {
    text: String,
}

impl From<&Keyboard> for ReplyKeyboardMarkup {
    fn from(keyboard: &Keyboard) -> Self {
        Self {
            keyboard: keyboard.rows.iter()
                .map(|row| row.iter().map(|text| KeyboardButton { text: text.clone() }).collect())
                .collect(),
            resize_keyboard: true,
            one_time_keyboard: keyboard.one_time,
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyKeyboardMarkup>,
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    client: Client,
    info: BotInfo,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: Client::new(),
            info: BotInfo {
                id: "unknown".to_string(),
                name: "families-bot".to_string(),
                username: "families_bot".to_string(),
            },
        }
    }

    /// First characters of the token, safe to log
    fn token_preview(&self) -> String {
        self.token.chars().take(8).collect()
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }

    async fn call<Req: Serialize + ?Sized, Res: DeserializeOwned>(&self, method: &str, request: &Req) -> Result<Res, BotError> {
        let response = self.client
            .post(self.api_url(method))
            .json(request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let data: ApiResponse<Res> = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        data.into_result()
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            first_name: String,
            username: String,
        }

        let data: BotInfoResponse = self.call("getMe", &serde_json::json!({})).await?;

        self.info = BotInfo {
            id: data.id.to_string(),
            name: data.first_name,
            username: data.username,
        };

        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: u64,
            allowed_updates: Vec<String>,
        }

        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message".to_string()],
        };

        self.call("getUpdates", &request).await
    }

    /// Get the next update offset
    pub fn get_next_offset(updates: &[Update], current: i64) -> i64 {
        updates.iter()
            .map(|u| u.update_id + 1)
            .max()
            .unwrap_or(current)
    }

    async fn send_message_request(&self, request: &SendMessageRequest<'_>) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct MessageResult {
            #[allow(dead_code)]
            message_id: i64,
        }

        let _: MessageResult = self.call("sendMessage", request).await?;
        Ok(())
    }

    /// Register bot commands with Telegram
    pub async fn register_commands(&self, commands: &[(String, String)]) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct Command<'a> {
            command: &'a str,
            description: &'a str,
        }

        #[derive(Serialize)]
        struct SetMyCommandsRequest<'a> {
            commands: Vec<Command<'a>>,
        }

        let request = SetMyCommandsRequest {
            commands: commands.iter()
                .map(|(command, description)| Command { command, description })
                .collect(),
        };

        let _: bool = self.call("setMyCommands", &request).await?;
        tracing::info!("Registered {} bot commands with Telegram", commands.len());
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramAdapter {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        tracing::debug!("Sending to {}: {}", chat_id, text);
        let request = SendMessageRequest { chat_id, text, reply_markup: None };
        self.send_message_request(&request)
            .await
            .map_err(|e| BotError::Delivery(e.to_string()))
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting Telegram bot (token: {}...)", self.token_preview());
        Ok(())
    }

    async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<(), BotError> {
        tracing::debug!("Sending reply to {}: {}", chat_id, reply.text);
        let request = SendMessageRequest {
            chat_id,
            text: &reply.text,
            reply_markup: reply.keyboard.as_ref().map(ReplyKeyboardMarkup::from),
        };
        self.send_message_request(&request).await
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

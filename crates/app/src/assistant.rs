//! Ordering assistant.
//!
//! A chat collaborator that answers menu questions. The conversational
//! engine is an opaque request/response service behind [`ChatBackend`];
//! this module owns what surrounds it: building the menu briefing the
//! backend is primed with, keeping the running conversation, and
//! rebuilding the session whenever the menu changes so the assistant never
//! recommends items that are gone.
//!
//! The assistant never fails the session: a backend error degrades to a
//! canned apology.

use async_trait::async_trait;
use comptoir::menu::MenuItem;
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::receipt::format_dzd;

/// Reply used whenever the backend is unreachable or returns nothing.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble connecting to my brain right now. Please try again in a moment.";

/// Default conversational model.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Error)]
pub enum ChatBackendError {
    #[error("could not reach the chat backend")]
    Transport(#[source] reqwest::Error),

    #[error("chat backend unavailable (status {status})")]
    Unavailable { status: u16 },

    #[error("chat backend returned no reply")]
    EmptyReply,
}

/// Who said a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

/// One turn of the running conversation.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

/// A conversation primed with a system instruction.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    pub system_instruction: String,
    pub turns: Vec<ChatTurn>,
}

impl ChatSession {
    fn primed(system_instruction: String) -> Self {
        Self {
            system_instruction,
            turns: Vec::new(),
        }
    }
}

/// The opaque conversational collaborator: full context in, one reply
/// out. Stateless by contract; the assistant carries the history.
#[automock]
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn reply(
        &self,
        session: &ChatSession,
        message: &str,
    ) -> Result<String, ChatBackendError>;
}

/// Builds the system instruction priming the assistant with the current
/// menu.
#[must_use]
pub fn menu_briefing(menu: &[MenuItem]) -> String {
    let menu_lines: Vec<String> = menu
        .iter()
        .map(|item| {
            let promotion = item
                .promotion
                .as_deref()
                .map(|label| format!(" Promotion: {label}"))
                .unwrap_or_default();

            format!(
                "{} ({}) - {}. {}{}",
                item.name,
                item.category,
                format_dzd(item.price_minor),
                item.description,
                promotion,
            )
        })
        .collect();

    format!(
        "You are a friendly and helpful assistant for a fast-food restaurant named \"Comptoir\". \
         Your goal is to help customers with the menu and their orders.\n\
         \n\
         RULES:\n\
         - Be conversational and cheerful.\n\
         - Your knowledge is limited to the menu provided below. Do not invent items.\n\
         - If asked for recommendations, suggest popular items from the menu.\n\
         - If a customer wants to order, guide them to use the \"Add to Cart\" button on the \
         website. You cannot place orders for them.\n\
         - Answer in the language the customer is asking in.\n\
         \n\
         CURRENT MENU:\n{}",
        menu_lines.join("\n")
    )
}

/// Fingerprint of a menu snapshot; when it changes the session restarts
/// so the briefing stays current.
fn menu_fingerprint(menu: &[MenuItem]) -> String {
    let ids: Vec<String> = menu.iter().map(|item| item.id.to_string()).collect();

    ids.join(",")
}

/// The customer-facing assistant.
pub struct Assistant {
    backend: Arc<dyn ChatBackend>,
    fingerprint: String,
    session: ChatSession,
}

impl Assistant {
    /// An assistant speaking through `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            fingerprint: String::new(),
            session: ChatSession::default(),
        }
    }

    /// The running conversation.
    #[must_use]
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Sends one customer message and returns the reply. The session is
    /// rebuilt first if the menu changed since the last message; a
    /// backend failure yields [`FALLBACK_REPLY`] and leaves the
    /// conversation untouched.
    pub async fn ask(&mut self, menu: &[MenuItem], message: &str) -> String {
        let fingerprint = menu_fingerprint(menu);

        if self.fingerprint != fingerprint || self.session.system_instruction.is_empty() {
            self.session = ChatSession::primed(menu_briefing(menu));
            self.fingerprint = fingerprint;
        }

        match self.backend.reply(&self.session, message).await {
            Ok(reply) => {
                self.session.turns.push(ChatTurn {
                    role: ChatRole::User,
                    text: message.to_string(),
                });
                self.session.turns.push(ChatTurn {
                    role: ChatRole::Model,
                    text: reply.clone(),
                });

                reply
            }
            Err(error) => {
                warn!(%error, "assistant backend failed");

                FALLBACK_REPLY.to_string()
            }
        }
    }
}

// Wire shapes for the generateContent endpoint.

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    system_instruction: WirePromptContent<'a>,
    contents: Vec<WireContent<'a>>,
}

#[derive(Debug, Serialize)]
struct WirePromptContent<'a> {
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    role: &'static str,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// [`ChatBackend`] over the hosted conversational API.
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl HttpChatBackend {
    /// A backend using the default hosted endpoint and model.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn request_body<'a>(session: &'a ChatSession, message: &'a str) -> GenerateRequest<'a> {
        let mut contents: Vec<WireContent<'a>> = session
            .turns
            .iter()
            .map(|turn| WireContent {
                role: match turn.role {
                    ChatRole::User => "user",
                    ChatRole::Model => "model",
                },
                parts: vec![WirePart { text: &turn.text }],
            })
            .collect();

        contents.push(WireContent {
            role: "user",
            parts: vec![WirePart { text: message }],
        });

        GenerateRequest {
            system_instruction: WirePromptContent {
                parts: vec![WirePart {
                    text: &session.system_instruction,
                }],
            },
            contents,
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn reply(
        &self,
        session: &ChatSession,
        message: &str,
    ) -> Result<String, ChatBackendError> {
        let body = Self::request_body(session, message);

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ChatBackendError::Transport)?;

        let status = response.status();

        if !status.is_success() {
            return Err(ChatBackendError::Unavailable {
                status: status.as_u16(),
            });
        }

        let decoded: GenerateResponse = response
            .json()
            .await
            .map_err(ChatBackendError::Transport)?;

        let reply: String = decoded
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if reply.is_empty() {
            return Err(ChatBackendError::EmptyReply);
        }

        Ok(reply)
    }
}

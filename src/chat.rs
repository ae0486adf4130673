use crate::api::{ApiError, SkincareApi};
use crate::i18n;
use actix::prelude::*;
use askama::Template;
use log_error::LogError;
use sk_types::chat::{format_message, ChatReply, ChatRequest, Span};
use std::sync::Arc;
use uuid::Uuid;

/// Conversation identity for one mount of the chat widget.
///
/// A new session is started on every mount and is dropped together with the
/// controller; nothing is persisted across mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    id: Uuid,
}

impl ChatSession {
    pub fn start() -> Self {
        let id = Uuid::new_v4();
        log::info!("Chat session {id} started");
        Self { id }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bubble {
    User(String),
    Bot(String),
    /// Placeholder for the reply to one pending message.
    Typing(u64),
}

impl Bubble {
    fn css_class(&self) -> &'static str {
        match self {
            Self::User(_) => "user-message",
            Self::Bot(_) => "bot-message",
            Self::Typing(_) => "bot-message typing-bubble",
        }
    }

    fn spans(&self) -> Vec<Span> {
        match self {
            Self::User(text) | Self::Bot(text) => format_message(text),
            Self::Typing(_) => vec![Span::Text(i18n::TYPING.to_string())],
        }
    }
}

pub struct BubbleView {
    class: &'static str,
    spans: Vec<Span>,
}

#[derive(Template)]
#[template(path = "chat/transcript.html")]
pub struct TranscriptView {
    bubbles: Vec<BubbleView>,
}

pub fn render(transcript: &[Bubble]) -> Result<String, askama::Error> {
    TranscriptView {
        bubbles: transcript
            .iter()
            .map(|b| BubbleView {
                class: b.css_class(),
                spans: b.spans(),
            })
            .collect(),
    }
    .render()
}

pub struct ChatController {
    api: Arc<dyn SkincareApi>,
    session: ChatSession,
    transcript: Vec<Bubble>,
    next_placeholder: u64,
}

impl ChatController {
    pub fn new(api: Arc<dyn SkincareApi>, session: ChatSession) -> Self {
        Self {
            api,
            session,
            transcript: vec![],
            next_placeholder: 0,
        }
    }

    fn send(&mut self, text: String, ctx: &mut Context<Self>) {
        self.transcript.push(Bubble::User(text.clone()));
        self.next_placeholder += 1;
        let placeholder = self.next_placeholder;
        self.transcript.push(Bubble::Typing(placeholder));
        let request = ChatRequest {
            session_id: self.session.id(),
            message: text,
        };
        let api = self.api.clone();
        ctx.spawn(
            async move { api.chat(request).await }
                .into_actor(self)
                .map(move |res, act, _| act.settle(placeholder, res)),
        );
    }

    fn settle(&mut self, placeholder: u64, res: Result<ChatReply, ApiError>) {
        let Some(pos) = self
            .transcript
            .iter()
            .position(|b| *b == Bubble::Typing(placeholder))
        else {
            log::debug!("Dropping reply for cleared message {placeholder}");
            return;
        };
        match res {
            Ok(reply) => {
                self.transcript[pos] = Bubble::Bot(reply.text_or(i18n::CHAT_FALLBACK).to_string());
            }
            Err(err) => {
                log::error!("Chat request in session {} failed: {err}", self.session.id());
                self.transcript.remove(pos);
            }
        }
    }
}

impl Actor for ChatController {
    type Context = Context<Self>;
}

/// Chat form submission.
#[derive(Message)]
#[rtype(result = "()")]
pub struct SendMessage(pub String);

/// Quick-reply button; the button label is the message.
#[derive(Message)]
#[rtype(result = "()")]
pub struct QuickReply(pub String);

#[derive(Message)]
#[rtype(result = "()")]
pub struct Reset;

#[derive(Message)]
#[rtype(result = "Uuid")]
pub struct SessionId;

#[derive(Message)]
#[rtype(result = "Vec<Bubble>")]
pub struct GetTranscript;

#[derive(Message)]
#[rtype(result = "Result<String, askama::Error>")]
pub struct GetView;

impl Handler<SendMessage> for ChatController {
    type Result = ();

    fn handle(&mut self, SendMessage(text): SendMessage, ctx: &mut Self::Context) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.send(text.to_string(), ctx);
    }
}

impl Handler<QuickReply> for ChatController {
    type Result = ();

    fn handle(&mut self, QuickReply(label): QuickReply, ctx: &mut Self::Context) {
        self.send(label.trim().to_string(), ctx);
    }
}

impl Handler<Reset> for ChatController {
    type Result = ();

    fn handle(&mut self, _: Reset, ctx: &mut Self::Context) {
        let api = self.api.clone();
        let session_id = self.session.id();
        ctx.spawn(
            async move { api.reset_chat(session_id).await }
                .into_actor(self)
                .map(|res, act, _| {
                    if let Some(reply) = res.log_error("Unable to reset conversation") {
                        act.transcript.clear();
                        if let Some(text) = reply.reply.filter(|r| !r.is_empty()) {
                            act.transcript.push(Bubble::Bot(text));
                        }
                    }
                }),
        );
    }
}

impl Handler<SessionId> for ChatController {
    type Result = MessageResult<SessionId>;

    fn handle(&mut self, _: SessionId, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.session.id())
    }
}

impl Handler<GetTranscript> for ChatController {
    type Result = MessageResult<GetTranscript>;

    fn handle(&mut self, _: GetTranscript, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.transcript.clone())
    }
}

impl Handler<GetView> for ChatController {
    type Result = Result<String, askama::Error>;

    fn handle(&mut self, _: GetView, _: &mut Self::Context) -> Self::Result {
        render(&self.transcript)
    }
}

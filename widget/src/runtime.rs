//! Async orchestration: feeds UI events through the transition logic,
//! paces the resulting replies with typing delays, and reaches the
//! backend for assistant answers, session issuance, and voice notes.

use serde_json::Value;
use tokio::time::sleep;

use crate::api::{ChatApi, RuntimeConfig};
use crate::content;
use crate::controller::TurnController;
use crate::directive::RenderSink;
use crate::fallback;
use crate::message::{MenuChoice, Reply};
use crate::state::PanelKind;
use crate::transition::{transition, ChatEvent, Outcome};

pub struct ChatRuntime<A, S> {
    api: A,
    sink: S,
    controller: TurnController,
    config: RuntimeConfig,
}

impl<A: ChatApi, S: RenderSink> ChatRuntime<A, S> {
    pub fn new(api: A, sink: S) -> Self {
        Self {
            api,
            sink,
            controller: TurnController::new(),
            config: RuntimeConfig::default(),
        }
    }

    /// Pull runtime configuration and play the welcome sequence. An
    /// unreachable backend leaves the defaults in place; the chat
    /// still opens.
    pub async fn bootstrap(&mut self) {
        match self.api.fetch_config().await {
            Ok(config) => self.config = config,
            Err(err) => log::warn!("no se pudo cargar la configuración: {err}"),
        }
        self.controller
            .set_audio(self.config.audio_enabled, self.config.audio_volume);

        self.dispatch(ChatEvent::Opened).await;
    }

    pub async fn handle_user_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let directives = self.controller.push_user_message(text);
        self.sink.apply_all(directives);

        self.dispatch(ChatEvent::UserText(text.to_string())).await;
    }

    pub async fn handle_menu(&mut self, choice: MenuChoice) {
        // A button tap cancels any reply still being "typed".
        let directives = self.controller.interrupt();
        self.sink.apply_all(directives);

        if choice == MenuChoice::Glossary {
            self.open_glossary_panel();
        }

        self.dispatch(ChatEvent::MenuChosen(choice)).await;
    }

    async fn dispatch(&mut self, event: ChatEvent) {
        let step = transition(self.controller.phase(), self.controller.user_name(), &event);
        self.controller.set_phase(step.next_phase);

        match step.outcome {
            Outcome::Replies(replies) => self.deliver_sequence(replies).await,
            Outcome::NameCaptured { name, replies } => {
                self.controller.set_user_name(&name);
                // The chat keeps working without a session; protected
                // calls will fall back locally.
                if let Err(err) = self.api.issue_session(&name).await {
                    log::warn!("no se pudo emitir la sesión: {err}");
                }
                self.deliver_sequence(replies).await;
            }
            Outcome::AskAssistant { prompt } => self.answer_with_assistant(&prompt).await,
        }
    }

    async fn answer_with_assistant(&mut self, prompt: &str) {
        let rows = self.api.context_snippets(prompt).await;
        let context = format_context(&rows);

        let text = match self.api.assistant_reply(prompt, context.as_deref()).await {
            Ok(answer) => answer,
            Err(err) => {
                log::warn!("asistente no disponible: {err}");
                fallback::reply_for(prompt)
            }
        };

        self.deliver_sequence(vec![Reply::text(text)]).await;
    }

    /// Play replies in order with their typing delays. A stale commit
    /// means the user interrupted; the rest of the sequence is
    /// abandoned with it.
    async fn deliver_sequence(&mut self, replies: Vec<Reply>) {
        for reply in replies {
            let (turn, setup) = self.controller.begin_bot_turn(reply);
            self.sink.apply_all(setup);

            sleep(turn.delay).await;

            match self.controller.commit_bot_turn(turn) {
                Some(directives) => self.sink.apply_all(directives),
                None => break,
            }
        }
    }

    pub fn begin_voice_capture(&mut self) {
        let directives = self.controller.begin_voice_capture();
        self.sink.apply_all(directives);
    }

    /// Stop recording and ship the captured audio. Upload problems
    /// surface as a friendly notice, not an error.
    pub async fn finish_voice_capture(&mut self, bytes: Vec<u8>, mimetype: &str) {
        let directives = self.controller.finish_voice_capture();
        self.sink.apply_all(directives);

        match self.api.upload_audio(bytes, mimetype).await {
            Ok(uploaded) => {
                log::info!(
                    "nota de voz subida a {} ({} bytes)",
                    uploaded.url,
                    uploaded.size
                );
                let directives = self.controller.push_user_message("🎤 Nota de voz");
                self.sink.apply_all(directives);
            }
            Err(err) => {
                log::warn!("fallo subiendo la nota de voz: {err}");
                self.deliver_sequence(vec![content::voice_upload_failed()]).await;
            }
        }
    }

    pub async fn open_prompts_panel(&mut self) {
        let body = match self.api.prompt_sheets().await {
            Ok(sheets) if !sheets.combined.is_empty() => sheets.combined,
            Ok(_) => "No hay prompts configurados.".to_string(),
            Err(err) => {
                log::warn!("no se pudieron cargar los prompts: {err}");
                "No se pudieron cargar los prompts.".to_string()
            }
        };

        let directives = self.controller.open_panel(PanelKind::Prompts, body);
        self.sink.apply_all(directives);
    }

    pub fn open_glossary_panel(&mut self) {
        let directives = self
            .controller
            .open_panel(PanelKind::Glossary, content::glossary_sheet());
        self.sink.apply_all(directives);
    }

    pub fn close_panel(&mut self, kind: PanelKind) {
        let directives = self.controller.close_panel(kind);
        self.sink.apply_all(directives);
    }

    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

/// Compact one-line-per-row rendering of course content for the
/// assistant's context window.
fn format_context(rows: &[Value]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }

    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            let title = row.get("title").and_then(Value::as_str);
            let body = row.get("content").and_then(Value::as_str);
            match (title, body) {
                (Some(title), Some(body)) => format!("- {}: {}", title, body),
                (None, Some(body)) => format!("- {}", body),
                _ => format!("- {}", row),
            }
        })
        .collect();

    Some(lines.join("\n"))
}

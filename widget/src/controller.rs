//! Turn lifecycle around the transcript: typing indicator, humanized
//! reply delay, cancellation of stale turns, and menu paging.

use std::time::Duration;

use crate::directive::{ChatStatus, RenderDirective};
use crate::message::{Message, Reply, Role};
use crate::state::{ChatPhase, ChatState, PanelKind};

const SHORT_REPLY_DELAY: Duration = Duration::from_millis(700);
const MEDIUM_REPLY_DELAY: Duration = Duration::from_millis(1400);
const LONG_REPLY_DELAY: Duration = Duration::from_millis(2200);

/// Identifies the bot turn a delayed commit belongs to. Any user
/// action in between makes the token stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingToken(u64);

/// A bot turn waiting out its typing delay.
#[derive(Debug)]
pub struct PendingTurn {
    pub token: TypingToken,
    pub reply: Reply,
    pub delay: Duration,
}

/// Owns the conversation state and turns chat activity into
/// [`RenderDirective`]s. Delivery order is the caller's job: begin a
/// turn, wait `delay`, then commit it.
pub struct TurnController {
    state: ChatState,
    audio_enabled: bool,
    audio_volume: f32,
}

impl TurnController {
    pub fn new() -> Self {
        Self {
            state: ChatState::new(),
            audio_enabled: true,
            audio_volume: 0.7,
        }
    }

    pub fn set_audio(&mut self, enabled: bool, volume: f32) {
        self.audio_enabled = enabled;
        self.audio_volume = volume;
    }

    pub fn phase(&self) -> ChatPhase {
        self.state.phase
    }

    pub fn set_phase(&mut self, phase: ChatPhase) {
        self.state.phase = phase;
    }

    pub fn user_name(&self) -> Option<&str> {
        self.state.user_name.as_deref()
    }

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        self.state.user_name = Some(name.into());
    }

    pub fn history(&self) -> &[Message] {
        &self.state.history
    }

    /// Start a bot turn: make sure the typing indicator is up and hand
    /// back the pending turn to commit once `delay` has passed.
    pub fn begin_bot_turn(&mut self, reply: Reply) -> (PendingTurn, Vec<RenderDirective>) {
        self.state.generation += 1;
        let token = TypingToken(self.state.generation);

        let mut directives = Vec::new();
        if !self.state.typing_visible {
            self.state.typing_visible = true;
            directives.push(RenderDirective::ShowTyping);
            directives.push(RenderDirective::SetStatus(ChatStatus::Typing));
        }

        let delay = typing_delay(&reply.text);
        (PendingTurn { token, reply, delay }, directives)
    }

    /// Commit a turn begun earlier. Returns `None` when the turn went
    /// stale in the meantime; the reply is dropped without a trace.
    ///
    /// A menu-carrying reply landing right after another menu-carrying
    /// bot message replaces it in place, so paging through menus does
    /// not stack dead button rows in the transcript.
    pub fn commit_bot_turn(&mut self, turn: PendingTurn) -> Option<Vec<RenderDirective>> {
        if turn.token.0 != self.state.generation {
            return None;
        }

        self.state.typing_visible = false;
        let mut directives = vec![
            RenderDirective::HideTyping,
            RenderDirective::SetStatus(ChatStatus::Online),
        ];

        let message = Message::bot(turn.reply.text.clone(), turn.reply.controls);
        let replace_last = message.controls.is_some()
            && matches!(
                self.state.history.last(),
                Some(last) if last.role == Role::Bot && last.controls.is_some()
            );
        if replace_last {
            if let Some(last) = self.state.history.last_mut() {
                *last = message.clone();
            }
            directives.push(RenderDirective::ReplaceLastBot(message));
        } else {
            self.state.history.push(message.clone());
            directives.push(RenderDirective::Append(message));
        }

        if turn.reply.plays_audio && self.audio_enabled {
            directives.push(RenderDirective::PlayAudio {
                text: turn.reply.text,
                volume: self.audio_volume,
            });
        }
        if turn.reply.requires_input {
            directives.push(RenderDirective::FocusInput);
        }

        Some(directives)
    }

    /// Record what the user typed. Any in-flight bot turn goes stale.
    pub fn push_user_message(&mut self, text: impl Into<String>) -> Vec<RenderDirective> {
        let mut directives = self.interrupt();
        let message = Message::user(text);
        self.state.history.push(message.clone());
        directives.push(RenderDirective::Append(message));
        directives
    }

    /// Invalidate pending turns and take the typing indicator down.
    pub fn interrupt(&mut self) -> Vec<RenderDirective> {
        self.state.generation += 1;

        let mut directives = Vec::new();
        if self.state.typing_visible {
            self.state.typing_visible = false;
            directives.push(RenderDirective::HideTyping);
            directives.push(RenderDirective::SetStatus(ChatStatus::Online));
        }
        directives
    }

    /// Holding the mic button interrupts whatever the bot was saying.
    pub fn begin_voice_capture(&mut self) -> Vec<RenderDirective> {
        let mut directives = self.interrupt();
        directives.push(RenderDirective::StartRecording);
        directives
    }

    pub fn finish_voice_capture(&mut self) -> Vec<RenderDirective> {
        vec![RenderDirective::StopRecording]
    }

    /// Open a side panel. At most one panel is up at a time, so any
    /// other open panel closes first. Reopening the same kind re-emits
    /// the panel with the fresh body.
    pub fn open_panel(
        &mut self,
        kind: PanelKind,
        body: impl Into<String>,
    ) -> Vec<RenderDirective> {
        let mut directives = Vec::new();
        if let Some(open) = self.state.open_panel {
            if open != kind {
                directives.push(RenderDirective::ClosePanel { kind: open });
            }
        }
        self.state.open_panel = Some(kind);
        directives.push(RenderDirective::OpenPanel {
            kind,
            body: body.into(),
        });
        directives
    }

    pub fn close_panel(&mut self, kind: PanelKind) -> Vec<RenderDirective> {
        if self.state.open_panel == Some(kind) {
            self.state.open_panel = None;
            vec![RenderDirective::ClosePanel { kind }]
        } else {
            Vec::new()
        }
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

/// Longer texts "type" for longer, in three steps.
fn typing_delay(text: &str) -> Duration {
    match text.chars().count() {
        0..=79 => SHORT_REPLY_DELAY,
        80..=279 => MEDIUM_REPLY_DELAY,
        _ => LONG_REPLY_DELAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;

    fn commit_now(controller: &mut TurnController, reply: Reply) -> Vec<RenderDirective> {
        let (turn, _) = controller.begin_bot_turn(reply);
        controller.commit_bot_turn(turn).expect("turn went stale")
    }

    #[test]
    fn typing_delay_grows_with_text_length() {
        assert_eq!(typing_delay("hola"), SHORT_REPLY_DELAY);
        assert_eq!(typing_delay(&"a".repeat(79)), SHORT_REPLY_DELAY);
        assert_eq!(typing_delay(&"a".repeat(80)), MEDIUM_REPLY_DELAY);
        assert_eq!(typing_delay(&"a".repeat(280)), LONG_REPLY_DELAY);
    }

    #[test]
    fn typing_indicator_shows_once_while_already_typing() {
        let mut controller = TurnController::new();

        let (_, first) = controller.begin_bot_turn(Reply::text("uno"));
        assert!(matches!(first[0], RenderDirective::ShowTyping));

        let (_, second) = controller.begin_bot_turn(Reply::text("dos"));
        assert!(second.is_empty());
    }

    #[test]
    fn user_message_while_typing_drops_the_pending_turn() {
        let mut controller = TurnController::new();

        let (turn, _) = controller.begin_bot_turn(Reply::text("respuesta lenta"));
        let directives = controller.push_user_message("otra pregunta");
        assert!(matches!(directives[0], RenderDirective::HideTyping));

        assert!(controller.commit_bot_turn(turn).is_none());
        assert_eq!(controller.history().len(), 1);
        assert_eq!(controller.history()[0].role, Role::User);
    }

    #[test]
    fn only_the_turn_begun_after_the_interrupt_renders() {
        let mut controller = TurnController::new();

        let (stale, _) = controller.begin_bot_turn(Reply::text("primera respuesta"));
        controller.push_user_message("espera, otra cosa");
        let (live, _) = controller.begin_bot_turn(Reply::text("segunda respuesta"));

        assert!(controller.commit_bot_turn(stale).is_none());
        assert!(controller.commit_bot_turn(live).is_some());

        let bot_texts: Vec<&str> = controller
            .history()
            .iter()
            .filter(|m| m.role == Role::Bot)
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(bot_texts, ["segunda respuesta"]);
    }

    #[test]
    fn committed_turn_lands_in_history_with_teardown_first() {
        let mut controller = TurnController::new();

        let directives = commit_now(&mut controller, Reply::text("hola"));
        assert!(matches!(directives[0], RenderDirective::HideTyping));
        assert!(matches!(
            directives[1],
            RenderDirective::SetStatus(ChatStatus::Online)
        ));
        assert!(matches!(directives[2], RenderDirective::Append(_)));
        assert_eq!(controller.history().len(), 1);
    }

    #[test]
    fn menu_replies_replace_the_previous_menu_in_place() {
        let mut controller = TurnController::new();

        commit_now(&mut controller, content::main_menu(Some("Ana Gómez")));
        assert_eq!(controller.history().len(), 1);

        let directives = commit_now(&mut controller, content::topics_menu());
        assert!(directives
            .iter()
            .any(|d| matches!(d, RenderDirective::ReplaceLastBot(_))));
        assert_eq!(controller.history().len(), 1);
        assert!(controller.history()[0].text.contains("TEMAS DISPONIBLES"));

        // A plain reply appends again.
        commit_now(&mut controller, Reply::text("texto sin menú"));
        assert_eq!(controller.history().len(), 2);
    }

    #[test]
    fn menu_after_user_message_appends_instead_of_replacing() {
        let mut controller = TurnController::new();

        commit_now(&mut controller, content::main_menu(None));
        controller.push_user_message("¿qué es overfitting?");
        commit_now(&mut controller, content::topics_menu());

        assert_eq!(controller.history().len(), 3);
    }

    #[test]
    fn audio_and_focus_directives_follow_the_reply_flags() {
        let mut controller = TurnController::new();

        let directives = commit_now(&mut controller, Reply::text("bienvenida").with_audio());
        assert!(directives
            .iter()
            .any(|d| matches!(d, RenderDirective::PlayAudio { .. })));

        let directives = commit_now(&mut controller, Reply::text("¿tu nombre?").needs_input());
        assert!(directives
            .iter()
            .any(|d| matches!(d, RenderDirective::FocusInput)));

        controller.set_audio(false, 0.0);
        let directives = commit_now(&mut controller, Reply::text("silencio").with_audio());
        assert!(!directives
            .iter()
            .any(|d| matches!(d, RenderDirective::PlayAudio { .. })));
    }

    #[test]
    fn opening_a_second_panel_closes_the_first() {
        let mut controller = TurnController::new();

        let directives = controller.open_panel(PanelKind::Glossary, content::glossary_sheet());
        assert_eq!(directives.len(), 1);

        let directives = controller.open_panel(PanelKind::Prompts, "prompts del curso");
        assert!(matches!(
            directives[0],
            RenderDirective::ClosePanel {
                kind: PanelKind::Glossary
            }
        ));
        assert!(matches!(
            directives[1],
            RenderDirective::OpenPanel {
                kind: PanelKind::Prompts,
                ..
            }
        ));

        assert!(controller.close_panel(PanelKind::Glossary).is_empty());
        assert_eq!(controller.close_panel(PanelKind::Prompts).len(), 1);
    }

    #[test]
    fn voice_capture_interrupts_and_emits_recording_markers() {
        let mut controller = TurnController::new();

        let (turn, _) = controller.begin_bot_turn(Reply::text("pendiente"));
        let directives = controller.begin_voice_capture();
        assert!(directives
            .iter()
            .any(|d| matches!(d, RenderDirective::StartRecording)));
        assert!(controller.commit_bot_turn(turn).is_none());

        let directives = controller.finish_voice_capture();
        assert!(matches!(directives[0], RenderDirective::StopRecording));
    }
}

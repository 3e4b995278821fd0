use crate::message::Message;
use crate::state::PanelKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStatus {
    /// "escribiendo..." while a bot turn is pending.
    Typing,
    /// "en línea" when idle.
    Online,
}

/// Instructions for the host surface. The controller never touches a
/// DOM or terminal itself; it only emits these.
#[derive(Debug, Clone)]
pub enum RenderDirective {
    ShowTyping,
    HideTyping,
    SetStatus(ChatStatus),
    Append(Message),
    /// Swap the most recent bot message for this one, used when menus
    /// page in place.
    ReplaceLastBot(Message),
    FocusInput,
    PlayAudio { text: String, volume: f32 },
    OpenPanel { kind: PanelKind, body: String },
    ClosePanel { kind: PanelKind },
    StartRecording,
    StopRecording,
}

/// Implemented by whatever draws the chat: a DOM binding, a TUI, or a
/// test recorder.
pub trait RenderSink {
    fn apply(&mut self, directive: RenderDirective);

    fn apply_all(&mut self, directives: Vec<RenderDirective>) {
        for directive in directives {
            self.apply(directive);
        }
    }
}

use crate::message::Message;

/// Where the conversation currently sits. `Quiz` tracks which question
/// is on screen so answer buttons can be scored without re-parsing the
/// transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    Start,
    MainMenu,
    TopicBrowsing,
    ExerciseBrowsing,
    Help,
    Glossary,
    Quiz { question: usize },
    Faq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Glossary,
    Prompts,
}

/// Conversation state owned by the controller. Nothing here is global;
/// two widgets on one page get two independent states.
#[derive(Debug)]
pub struct ChatState {
    pub user_name: Option<String>,
    pub phase: ChatPhase,
    pub history: Vec<Message>,
    pub typing_visible: bool,
    /// Monotonic typing-token generation. See `TurnController`.
    pub generation: u64,
    pub open_panel: Option<PanelKind>,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            user_name: None,
            phase: ChatPhase::Start,
            history: Vec::new(),
            typing_visible: false,
            generation: 0,
            open_panel: None,
        }
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

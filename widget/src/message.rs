use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Bot,
    User,
}

/// One transcript entry. Bot messages may carry a quick-reply menu;
/// a later menu-carrying bot message replaces the previous one in
/// place instead of stacking.
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub controls: Option<Menu>,
}

impl Message {
    pub fn bot(text: impl Into<String>, controls: Option<Menu>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
            timestamp: Utc::now(),
            controls,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: Utc::now(),
            controls: None,
        }
    }
}

/// An outgoing bot turn before it is committed to the transcript.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub controls: Option<Menu>,
    pub requires_input: bool,
    pub plays_audio: bool,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            controls: None,
            requires_input: false,
            plays_audio: false,
        }
    }

    pub fn with_menu(text: impl Into<String>, menu: Menu) -> Self {
        Self {
            controls: Some(menu),
            ..Self::text(text)
        }
    }

    pub fn needs_input(mut self) -> Self {
        self.requires_input = true;
        self
    }

    pub fn with_audio(mut self) -> Self {
        self.plays_audio = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub choice: MenuChoice,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, choice: MenuChoice) -> Self {
        Self {
            label: label.into(),
            choice,
        }
    }
}

/// Everything a quick-reply button can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Instructions,
    Topics,
    Topic(TopicKey),
    Exercises,
    ExerciseLevel(ExerciseKey),
    Help,
    Glossary,
    Quiz,
    QuizAnswer(usize),
    QuizNext,
    Faq,
    FaqEntry(usize),
    MainMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicKey {
    Fundamentos,
    MachineLearning,
    DeepLearning,
    Aplicaciones,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseKey {
    Basicos,
    Intermedios,
    Proyectos,
    Desafios,
}

//! Pure conversation logic: an event plus the current phase maps to the
//! next phase and what to say. No timers, no rendering, no network.

use crate::content;
use crate::message::{MenuChoice, Reply};
use crate::state::ChatPhase;

#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// Widget opened for the first time.
    Opened,
    /// Free text typed by the user.
    UserText(String),
    /// A quick-reply button pressed.
    MenuChosen(MenuChoice),
}

#[derive(Debug)]
pub enum Outcome {
    /// Canned replies to deliver in order.
    Replies(Vec<Reply>),
    /// First free-text turn while unnamed: the text was the user's name.
    NameCaptured { name: String, replies: Vec<Reply> },
    /// Free text that should go to the assistant pipeline.
    AskAssistant { prompt: String },
}

#[derive(Debug)]
pub struct Transition {
    pub next_phase: ChatPhase,
    pub outcome: Outcome,
}

pub fn transition(phase: ChatPhase, user_name: Option<&str>, event: &ChatEvent) -> Transition {
    match event {
        ChatEvent::Opened => replies(ChatPhase::Start, content::welcome_sequence()),
        ChatEvent::UserText(text) => user_text(phase, user_name, text.trim()),
        ChatEvent::MenuChosen(choice) => menu_chosen(phase, user_name, *choice),
    }
}

fn user_text(phase: ChatPhase, user_name: Option<&str>, text: &str) -> Transition {
    if user_name.is_none() && phase == ChatPhase::Start {
        if is_full_name(text) {
            let name = text.to_string();
            let turn = vec![content::name_accepted(&name), content::main_menu(Some(&name))];
            return Transition {
                next_phase: ChatPhase::MainMenu,
                outcome: Outcome::NameCaptured {
                    name,
                    replies: turn,
                },
            };
        }
        return replies(ChatPhase::Start, vec![content::name_rejected()]);
    }

    Transition {
        next_phase: phase,
        outcome: Outcome::AskAssistant {
            prompt: text.to_string(),
        },
    }
}

fn menu_chosen(phase: ChatPhase, user_name: Option<&str>, choice: MenuChoice) -> Transition {
    match choice {
        MenuChoice::Instructions => replies(ChatPhase::Help, content::instructions_sequence()),
        MenuChoice::Topics => reply(ChatPhase::TopicBrowsing, content::topics_menu()),
        MenuChoice::Topic(key) => reply(ChatPhase::TopicBrowsing, content::topic(key)),
        MenuChoice::Exercises => reply(ChatPhase::ExerciseBrowsing, content::exercises_menu()),
        MenuChoice::ExerciseLevel(key) => {
            reply(ChatPhase::ExerciseBrowsing, content::exercise_level(key))
        }
        MenuChoice::Help => replies(ChatPhase::Help, content::help_sequence()),
        MenuChoice::Glossary => reply(ChatPhase::Glossary, content::glossary_reply()),
        MenuChoice::Quiz => match content::quiz_question(0) {
            Some(question) => reply(ChatPhase::Quiz { question: 0 }, question),
            None => main_menu(user_name),
        },
        MenuChoice::QuizAnswer(option) => match phase {
            ChatPhase::Quiz { question } => reply(
                ChatPhase::Quiz { question },
                content::quiz_feedback(question, option),
            ),
            _ => main_menu(user_name),
        },
        MenuChoice::QuizNext => match phase {
            ChatPhase::Quiz { question } => {
                let next = question + 1;
                match content::quiz_question(next) {
                    Some(reply_) => reply(ChatPhase::Quiz { question: next }, reply_),
                    None => reply(ChatPhase::MainMenu, content::quiz_finished()),
                }
            }
            _ => main_menu(user_name),
        },
        MenuChoice::Faq => reply(ChatPhase::Faq, content::faq_menu()),
        MenuChoice::FaqEntry(index) => reply(ChatPhase::Faq, content::faq_answer(index)),
        MenuChoice::MainMenu => main_menu(user_name),
    }
}

fn main_menu(user_name: Option<&str>) -> Transition {
    reply(ChatPhase::MainMenu, content::main_menu(user_name))
}

fn reply(next_phase: ChatPhase, reply: Reply) -> Transition {
    replies(next_phase, vec![reply])
}

fn replies(next_phase: ChatPhase, replies: Vec<Reply>) -> Transition {
    Transition {
        next_phase,
        outcome: Outcome::Replies(replies),
    }
}

/// Name capture wants at least first and last name.
fn is_full_name(text: &str) -> bool {
    text.split_whitespace().count() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_texts(outcome: &Outcome) -> Vec<String> {
        match outcome {
            Outcome::Replies(replies) | Outcome::NameCaptured { replies, .. } => {
                replies.iter().map(|r| r.text.clone()).collect()
            }
            Outcome::AskAssistant { .. } => Vec::new(),
        }
    }

    #[test]
    fn opening_plays_welcome_and_asks_for_name() {
        let t = transition(ChatPhase::Start, None, &ChatEvent::Opened);
        assert_eq!(t.next_phase, ChatPhase::Start);

        let Outcome::Replies(replies) = t.outcome else {
            panic!("expected canned replies");
        };
        assert!(replies.first().expect("welcome").plays_audio);
        let last = replies.last().expect("name prompt");
        assert!(last.requires_input);
        assert!(last.text.contains("nombre y apellido"));
    }

    #[test]
    fn single_word_name_is_rejected_and_phase_stays_start() {
        let t = transition(
            ChatPhase::Start,
            None,
            &ChatEvent::UserText("Ana".to_string()),
        );
        assert_eq!(t.next_phase, ChatPhase::Start);
        let texts = reply_texts(&t.outcome);
        assert!(texts[0].contains("nombre y apellido"));
    }

    #[test]
    fn full_name_is_captured_and_main_menu_follows() {
        let t = transition(
            ChatPhase::Start,
            None,
            &ChatEvent::UserText("Ana Gómez".to_string()),
        );
        assert_eq!(t.next_phase, ChatPhase::MainMenu);

        let Outcome::NameCaptured { name, replies } = t.outcome else {
            panic!("expected name capture");
        };
        assert_eq!(name, "Ana Gómez");
        assert!(replies[0].text.contains("Ana Gómez"));
        assert!(replies[1].controls.is_some());
    }

    #[test]
    fn named_user_free_text_goes_to_assistant() {
        let t = transition(
            ChatPhase::MainMenu,
            Some("Ana Gómez"),
            &ChatEvent::UserText("¿qué es una red neuronal?".to_string()),
        );
        assert_eq!(t.next_phase, ChatPhase::MainMenu);
        let Outcome::AskAssistant { prompt } = t.outcome else {
            panic!("expected assistant turn");
        };
        assert_eq!(prompt, "¿qué es una red neuronal?");
    }

    #[test]
    fn menu_navigation_moves_between_phases_and_back() {
        let t = transition(
            ChatPhase::MainMenu,
            Some("Ana Gómez"),
            &ChatEvent::MenuChosen(MenuChoice::Topics),
        );
        assert_eq!(t.next_phase, ChatPhase::TopicBrowsing);

        let t = transition(
            ChatPhase::TopicBrowsing,
            Some("Ana Gómez"),
            &ChatEvent::MenuChosen(MenuChoice::Topic(crate::message::TopicKey::DeepLearning)),
        );
        assert_eq!(t.next_phase, ChatPhase::TopicBrowsing);
        assert!(reply_texts(&t.outcome)[0].contains("Deep Learning"));

        let t = transition(
            ChatPhase::TopicBrowsing,
            Some("Ana Gómez"),
            &ChatEvent::MenuChosen(MenuChoice::MainMenu),
        );
        assert_eq!(t.next_phase, ChatPhase::MainMenu);
    }

    #[test]
    fn quiz_scores_answers_and_finishes_back_at_main_menu() {
        let t = transition(
            ChatPhase::MainMenu,
            Some("Ana Gómez"),
            &ChatEvent::MenuChosen(MenuChoice::Quiz),
        );
        assert_eq!(t.next_phase, ChatPhase::Quiz { question: 0 });

        let t = transition(
            ChatPhase::Quiz { question: 0 },
            Some("Ana Gómez"),
            &ChatEvent::MenuChosen(MenuChoice::QuizAnswer(1)),
        );
        assert_eq!(t.next_phase, ChatPhase::Quiz { question: 0 });
        assert!(reply_texts(&t.outcome)[0].starts_with("✅"));

        let t = transition(
            ChatPhase::Quiz { question: 0 },
            Some("Ana Gómez"),
            &ChatEvent::MenuChosen(MenuChoice::QuizAnswer(0)),
        );
        assert!(reply_texts(&t.outcome)[0].starts_with("❌"));

        // Walk past the last question.
        let mut phase = ChatPhase::Quiz { question: 0 };
        loop {
            let t = transition(
                phase,
                Some("Ana Gómez"),
                &ChatEvent::MenuChosen(MenuChoice::QuizNext),
            );
            match t.next_phase {
                ChatPhase::Quiz { question } => phase = ChatPhase::Quiz { question },
                ChatPhase::MainMenu => {
                    assert!(reply_texts(&t.outcome)[0].contains("completado"));
                    break;
                }
                other => panic!("unexpected phase {:?}", other),
            }
        }
    }

    #[test]
    fn stale_quiz_answer_outside_quiz_falls_back_to_main_menu() {
        let t = transition(
            ChatPhase::MainMenu,
            Some("Ana Gómez"),
            &ChatEvent::MenuChosen(MenuChoice::QuizAnswer(0)),
        );
        assert_eq!(t.next_phase, ChatPhase::MainMenu);
    }
}

//! Canned-response chat assistant.
//!
//! Replies come from an ordered rule list: the first rule with a matching keyword wins,
//! and [`FALLBACK_RESPONSE`] covers everything else. No model is consulted.

use tracing::debug;

use crate::core::models::chat::{ChatMessage, Role};

pub const WELCOME_MESSAGE: &str =
    "Hello! I'm your Material Science Agent Assistant. How can I help you today?";
pub const CLEARED_MESSAGE: &str = "Chat history cleared. How can I help you today?";

pub const FALLBACK_RESPONSE: &str = "That's an interesting question about materials science. While I don't have specific information on that topic, I can help with questions about elements, material properties, alloys, composites, and engineering applications. Could you provide more details or try a different question?";

pub const SUGGESTED_QUESTIONS: [&str; 5] = [
    "What are the properties of titanium?",
    "How is carbon fiber used in composites?",
    "What makes stainless steel corrosion resistant?",
    "Which material properties matter for structural parts?",
    "How is the periodic table organized?",
];

struct Rule {
    topic: &'static str,
    /// Plain substrings of the lowercased input. Short ones like `ti` hit inside other
    /// words too (`properties`), which is why rule order matters.
    keywords: &'static [&'static str],
    response: &'static str,
}

static RULES: [Rule; 6] = [
    Rule {
        topic: "titanium",
        keywords: &["titanium", "ti"],
        response: "Titanium (Ti) is a lightweight, strong, lustrous metal with atomic number 22. It has excellent corrosion resistance and the highest strength-to-weight ratio of any metal. Common applications include aerospace components, medical implants, and high-performance sporting goods.",
    },
    Rule {
        topic: "carbon fiber",
        keywords: &["carbon fiber", "composite"],
        response: "Carbon fiber is a polymer consisting of thin, strong crystalline filaments of carbon. It's known for its high strength-to-weight ratio, stiffness, and chemical resistance. Carbon fiber reinforced composites are used in aerospace, automotive, sporting goods, and high-end consumer products.",
    },
    Rule {
        topic: "steel",
        keywords: &["steel", "alloy"],
        response: "Steel is an alloy of iron and carbon, often with other elements that determine its properties. Different steel alloys offer varying degrees of strength, hardness, and corrosion resistance. Steel is one of the most widely used materials in construction, manufacturing, and engineering.",
    },
    Rule {
        topic: "properties",
        keywords: &["property", "properties"],
        response: "Key material properties include: tensile strength (resistance to breaking under tension), hardness (resistance to deformation), ductility (ability to deform without breaking), thermal conductivity (heat transfer ability), and corrosion resistance. These properties determine a material's suitability for specific applications.",
    },
    Rule {
        topic: "periodic table",
        keywords: &["periodic", "element"],
        response: "The periodic table organizes elements by atomic number and chemical properties. Elements in the same group (column) have similar properties. Metals are on the left, nonmetals on the right, and metalloids between them. The table helps predict chemical behavior and is fundamental to materials science.",
    },
    Rule {
        topic: "greeting",
        keywords: &["hello", "hi", "hey"],
        response: "Hello! I'm your Material Science Agent assistant. Feel free to ask me about elements, materials, properties, or engineering applications.",
    },
];

/// Topic of the first rule that matches `input`, if any.
pub fn matched_topic(input: &str) -> Option<&'static str> {
    let lowered = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
        .map(|rule| rule.topic)
}

/// Deterministic reply for `input`. Matching is case-insensitive.
pub fn respond(input: &str) -> &'static str {
    let lowered = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
        .map_or(FALLBACK_RESPONSE, |rule| rule.response)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    Send(String),
    Clear,
}

/// The message list of the chat screen. It always holds at least one message.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
        }
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_reply(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.role == Role::Assistant)
    }

    pub fn apply(mut self, event: ChatEvent) -> Self {
        match event {
            ChatEvent::Send(text) => {
                if text.trim().is_empty() {
                    return self;
                }
                let reply = respond(&text);
                debug!(topic = matched_topic(&text).unwrap_or("fallback"), "Chat reply selected");
                self.messages.push(ChatMessage::user(text));
                self.messages.push(ChatMessage::assistant(reply));
            }
            ChatEvent::Clear => {
                self.messages = vec![ChatMessage::assistant(CLEARED_MESSAGE)];
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titanium_wins_in_any_case() {
        let titanium = RULES[0].response;
        assert_eq!(respond("TITANIUM"), titanium);
        assert_eq!(respond("Tell me about TiTaNiUm steel alloys"), titanium);
        assert_eq!(respond("is Ti-6Al-4V strong?"), titanium);
    }

    #[test]
    fn rules_are_checked_in_priority_order() {
        assert_eq!(matched_topic("composite steel"), Some("carbon fiber"));
        assert_eq!(matched_topic("steel alloy"), Some("steel"));
        assert_eq!(matched_topic("element property"), Some("properties"));
        assert_eq!(matched_topic("hello, periodic table"), Some("periodic table"));
    }

    #[test]
    fn short_keywords_match_inside_words() {
        assert_eq!(matched_topic("what are the properties?"), Some("titanium"));
        assert_eq!(matched_topic("this is nothing"), Some("greeting"));
        assert_eq!(matched_topic("they said"), Some("greeting"));
        assert_eq!(matched_topic("Hey!"), Some("greeting"));
        assert_eq!(matched_topic("quantum chromodynamics"), None);
    }

    #[test]
    fn unmatched_input_gets_fallback() {
        assert_eq!(respond("quantum chromodynamics"), FALLBACK_RESPONSE);
        assert_eq!(respond("quantum chromodynamics"), respond("quantum chromodynamics"));
    }

    #[test]
    fn new_session_starts_with_welcome() {
        let chat = ChatSession::new();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].content, WELCOME_MESSAGE);
    }

    #[test]
    fn send_appends_user_then_assistant() {
        let chat = ChatSession::new().apply(ChatEvent::Send("hello".into()));
        let roles: Vec<_> = chat.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(chat.messages()[1].content, "hello");
        assert_eq!(chat.last_reply().unwrap().content, RULES[5].response);
    }

    #[test]
    fn blank_input_is_ignored() {
        let chat = ChatSession::new().apply(ChatEvent::Send("   \n".into()));
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn clearing_leaves_exactly_one_assistant_message() {
        let chat = ChatSession::new()
            .apply(ChatEvent::Send("steel".into()))
            .apply(ChatEvent::Send("hi".into()))
            .apply(ChatEvent::Clear);
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, Role::Assistant);
        assert_eq!(chat.messages()[0].content, CLEARED_MESSAGE);
    }
}

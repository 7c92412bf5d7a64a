use crate::core::message::Message;

/// Append-only ordered message history for one session.
///
/// The sequence is replaced wholesale when a saved snapshot is loaded and
/// grows one message at a time afterwards. There is no deletion,
/// truncation, or size bound.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_insertion_order() {
        let mut conversation = Conversation::new();
        conversation.append(Message::user("one"));
        conversation.append(Message::bot("two"));
        conversation.append(Message::user("three"));

        let texts: Vec<&str> = conversation
            .messages()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[test]
    fn loading_replaces_the_sequence_wholesale() {
        let snapshot = vec![Message::user("hello"), Message::bot("hi there")];
        let conversation = Conversation::from_messages(snapshot.clone());
        assert_eq!(conversation.messages(), snapshot.as_slice());
        assert_eq!(conversation.len(), 2);
        assert!(!conversation.is_empty());
    }
}

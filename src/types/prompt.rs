use super::message::ChatMessage;
use crate::response::CompleteResponse;

/// An ordered conversation built up message by message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prompt {
    messages: Vec<ChatMessage>,
}

impl Prompt {
    /// Create a new empty prompt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a prompt with a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(content)],
        }
    }

    /// Create a prompt with a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(content)],
        }
    }

    pub fn with_system(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::system(content));
        self
    }

    pub fn with_user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::user(content));
        self
    }

    pub fn with_assistant(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::assistant(content));
        self
    }

    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_messages(mut self, messages: impl IntoIterator<Item = ChatMessage>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Append the assistant reply of a finished completion, so the next turn
    /// sees it as history.
    pub fn with_response(self, response: &CompleteResponse) -> Self {
        self.with_assistant(response.content.clone())
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<ChatMessage> {
        self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<&str> for Prompt {
    fn from(s: &str) -> Self {
        Prompt::user(s)
    }
}

impl From<String> for Prompt {
    fn from(s: String) -> Self {
        Prompt::user(s)
    }
}

impl From<Vec<ChatMessage>> for Prompt {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Prompt { messages }
    }
}

impl AsRef<[ChatMessage]> for Prompt {
    fn as_ref(&self) -> &[ChatMessage] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_prompt_builder_keeps_order() {
        let prompt = Prompt::system("You are terse.")
            .with_user("Hi")
            .with_assistant("Hello")
            .with_user("Bye");

        let roles: Vec<Role> = prompt.messages().iter().map(|m| m.role()).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );
        assert_eq!(prompt.messages()[3].content(), "Bye");
    }

    #[test]
    fn test_with_response_appends_assistant() {
        let response = CompleteResponse {
            id: "chatcmpl-1".to_string(),
            model: "deepseek-chat".to_string(),
            content: "Paris".to_string(),
            finish_reason: Some("stop".to_string()),
            usage: None,
        };

        let prompt = Prompt::user("Capital of France?").with_response(&response);
        assert_eq!(prompt.len(), 2);
        assert_eq!(prompt.messages()[1].role(), Role::Assistant);
        assert_eq!(prompt.messages()[1].content(), "Paris");
    }

    #[test]
    fn test_from_impls() {
        let prompt: Prompt = "Hello".into();
        assert_eq!(prompt.len(), 1);
        assert_eq!(prompt.messages()[0].role(), Role::User);

        let prompt: Prompt = vec![ChatMessage::system("a"), ChatMessage::user("b")].into();
        assert_eq!(prompt.into_messages().len(), 2);
        assert!(Prompt::new().is_empty());
    }
}

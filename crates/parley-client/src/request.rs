//! Chat request payload

use serde::Serialize;

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub stream: bool,
}

impl ChatRequest {
    /// A single-turn request: persona first, then the user prompt.
    pub fn new(model: &str, system_prompt: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![Message::system(system_prompt), Message::user(prompt)],
            stream: false,
        }
    }

    /// Non-empty model, non-empty messages, last message from the user
    pub fn is_well_formed(&self) -> bool {
        !self.model.is_empty()
            && self
                .messages
                .last()
                .map(|m| m.role == Role::User)
                .unwrap_or(false)
    }

    /// Serialized JSON body as sent on the wire
    pub fn to_wire(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_well_formed() {
        let request = ChatRequest::new("llama3", "You are an NPC.", "Hello!");
        assert!(request.is_well_formed());
        assert!(!request.stream);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[1].content, "Hello!");
    }

    #[test]
    fn test_malformed_requests() {
        let mut request = ChatRequest::new("llama3", "sys", "hi");
        request.messages.pop();
        assert!(!request.is_well_formed());

        request.messages.clear();
        assert!(!request.is_well_formed());

        let empty_model = ChatRequest::new("", "sys", "hi");
        assert!(!empty_model.is_well_formed());
    }

    #[test]
    fn test_wire_format() {
        let request = ChatRequest::new("llama3", "Be brief.", "Hello!");
        assert_eq!(
            request.to_wire().unwrap(),
            r#"{"model":"llama3","messages":[{"role":"system","content":"Be brief."},{"role":"user","content":"Hello!"}],"stream":false}"#
        );
    }

    #[test]
    fn test_wire_escapes_prompt() {
        let request = ChatRequest::new("llama3", "sys", "say \"hi\"\nC:\\path");
        let wire = request.to_wire().unwrap();
        assert!(wire.contains(r#""content":"say \"hi\"\nC:\\path""#));
    }
}

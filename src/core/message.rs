#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptRole {
    User,
    Assistant,
}

/// A single transcript entry. Entries are never edited after they are
/// appended; the transcript only grows or is reseeded wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: TranscriptRole,
    pub content: String,
}

impl Message {
    pub fn new(role: TranscriptRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TranscriptRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TranscriptRole::Assistant, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_roles() {
        assert_eq!(Message::user("hi").role, TranscriptRole::User);
        let reply = Message::assistant("Use neem oil spray.");
        assert_eq!(reply.role, TranscriptRole::Assistant);
        assert_eq!(reply.content, "Use neem oil spray.");
    }
}

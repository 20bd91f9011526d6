//! The request every LLM client answers.

/// One SQL generation request.
///
/// The instruction text is the same for every request; only the question
/// changes. Clients decide how the two are laid out on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlPrompt {
    /// Table description, answer rules and worked examples.
    pub instructions: String,
    /// The user's question, already trimmed.
    pub question: String,
}

impl SqlPrompt {
    /// Creates a prompt from the fixed instructions and a question.
    pub fn new(instructions: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            question: question.into(),
        }
    }
}

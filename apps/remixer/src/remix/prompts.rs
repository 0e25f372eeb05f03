/// Instruction used when the caller does not supply one.
pub const DEFAULT_INSTRUCTION: &str = "Transform the following content into a tweet \
    (280 characters or less) while maintaining the same voice and tone:";

/// Joins an instruction and the user's content into the single message sent
/// upstream: the instruction, a space, then the content in double quotes.
///
/// Content is passed through verbatim; embedded quotes are not escaped.
pub fn build_instruction(instruction: &str, content: &str) -> String {
    format!("{instruction} \"{content}\"")
}

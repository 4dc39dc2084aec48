//! Rule-based reply composition.
//!
//! Guards are checked in a fixed order and the first one that matches decides
//! the reply. The composer is independent from emotion scoring and has no
//! state.

/// Reply for empty or whitespace-only input.
pub const EMPTY_PROMPT: &str = "No escribiste nada. Prueba a preguntarme algo.";

/// Reply when the text looks like a question.
pub const QUESTION_PROMPT: &str = "Buena pregunta — cuéntame más detalle y te ayudo.";

/// Prefix for the word-truncated summary reply.
pub const SUMMARY_PREFIX: &str = "Resumen breve: ";

/// Prefix for the generic acknowledgement reply.
pub const ACK_PREFIX: &str = "Entendido. ";

/// Substrings (lower-case) that mark the text as a question.
pub const QUESTION_MARKERS: &[&str] = &["como", "qué", "que", "por qué", "cuando", "?"];

/// Substrings (lower-case) that ask for a summary or explanation.
pub const SUMMARY_COMMANDS: &[&str] = &["explica", "resume", "resumen", "sintetiza"];

/// Texts with fewer words than this are echoed back.
pub const SHORT_TEXT_WORDS: usize = 6;

/// Words kept by the summary reply.
pub const SUMMARY_WORDS: usize = 30;

/// Characters kept by the acknowledgement reply.
pub const ACK_CHARS: usize = 400;

/// Which guard produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Empty,
    Question,
    Echo,
    Summary,
    Acknowledge,
}

/// Classify `text` into the branch [`compose`] would take.
pub fn reply_kind(text: &str) -> ReplyKind {
    let msg = text.trim();
    if msg.is_empty() {
        return ReplyKind::Empty;
    }

    let lowered = msg.to_lowercase();
    if QUESTION_MARKERS.iter().any(|q| lowered.contains(q)) {
        return ReplyKind::Question;
    }

    if msg.split_whitespace().count() < SHORT_TEXT_WORDS {
        return ReplyKind::Echo;
    }

    if SUMMARY_COMMANDS.iter().any(|w| lowered.contains(w)) {
        ReplyKind::Summary
    } else {
        ReplyKind::Acknowledge
    }
}

/// Produce the reply for `text`.
pub fn compose(text: &str) -> String {
    let msg = text.trim();
    match reply_kind(msg) {
        ReplyKind::Empty => EMPTY_PROMPT.to_string(),
        ReplyKind::Question => QUESTION_PROMPT.to_string(),
        ReplyKind::Echo => {
            format!("Interesante. Me dijiste: «{msg}». ¿Quieres que lo explique más?")
        },
        ReplyKind::Summary => {
            let words: Vec<&str> = msg.split_whitespace().take(SUMMARY_WORDS).collect();
            format!("{SUMMARY_PREFIX}{}...", words.join(" "))
        },
        ReplyKind::Acknowledge => {
            let head: String = msg.chars().take(ACK_CHARS).collect();
            format!("{ACK_PREFIX}{head}")
        },
    }
}

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t ")]
    fn empty_input_prompts(#[case] input: &str) {
        assert_eq!(compose(input), EMPTY_PROMPT);
    }

    #[rstest]
    #[case("¿Cómo estás?")]
    #[case("dime cuando llegas")]
    #[case("what is this?")]
    #[case("COMO va todo")]
    fn question_markers_win(#[case] input: &str) {
        assert_eq!(reply_kind(input), ReplyKind::Question);
        assert_eq!(compose(input), QUESTION_PROMPT);
    }

    #[test]
    fn question_beats_summary_command() {
        let input = "explica por favor que significa esto en palabras sencillas";
        assert_eq!(compose(input), QUESTION_PROMPT);
    }

    #[test]
    fn short_text_is_echoed() {
        let reply = compose("hola");
        assert_eq!(reply_kind("hola"), ReplyKind::Echo);
        assert!(reply.contains("hola"));
        assert_eq!(
            reply,
            "Interesante. Me dijiste: «hola». ¿Quieres que lo explique más?"
        );
    }

    #[test]
    fn echo_uses_trimmed_text() {
        assert_eq!(
            compose("  buenos días  "),
            "Interesante. Me dijiste: «buenos días». ¿Quieres que lo explique más?"
        );
    }

    #[test]
    fn five_words_still_echo_six_do_not() {
        assert_eq!(reply_kind("uno dos tres cuatro cinco"), ReplyKind::Echo);
        assert_eq!(
            reply_kind("uno dos tres cuatro cinco seis"),
            ReplyKind::Acknowledge
        );
    }

    #[test]
    fn ten_words_get_acknowledged() {
        let input = "el gato duerme sobre la alfombra roja todo el dia";
        assert_eq!(input.split_whitespace().count(), 10);
        assert_eq!(compose(input), format!("{ACK_PREFIX}{input}"));
    }

    #[test]
    fn acknowledge_truncates_at_400_chars() {
        let input = "ñandú ".repeat(100);
        let reply = compose(&input);
        let body = reply.strip_prefix(ACK_PREFIX).unwrap_or_default();
        assert_eq!(body.chars().count(), ACK_CHARS);
        assert!(input.trim().starts_with(body));
    }

    #[test]
    fn summary_keeps_first_30_words() {
        let words: Vec<String> = (0..40).map(|i| format!("palabra{i}")).collect();
        let input = format!("resume    esto: {}", words.join("  "));
        let reply = compose(&input);

        let expected_words: Vec<&str> = input.split_whitespace().take(30).collect();
        assert_eq!(
            reply,
            format!("{SUMMARY_PREFIX}{}...", expected_words.join(" "))
        );
    }

    #[test]
    fn summary_command_is_case_insensitive() {
        let input = "Por favor EXPLICA el ciclo del agua en detalle";
        // "por favor" contains no question marker, but make sure of it.
        assert!(!QUESTION_MARKERS.iter().any(|q| input.to_lowercase().contains(q)));
        assert_eq!(reply_kind(input), ReplyKind::Summary);
    }

    #[test]
    fn compose_is_deterministic() {
        let input = "un texto cualquiera con varias palabras dentro de él";
        assert_eq!(compose(input), compose(input));
    }
}

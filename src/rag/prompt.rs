//! Prompt templates.
//!
//! Pure string construction, no state. Wording is the contract here:
//! the grounded template must instruct the model to answer only from the
//! supplied context and to say so when the context is not enough.

/// Direct-instruction template for the videogame endpoint.
pub fn videogame_brief(topic: &str) -> String {
    format!(
        "Briefly describe the plot of the videogame {topic} in under 100 words. \
         The target audience is a regular player already familiar with common \
         game mechanics. Do not explain controls or tutorials. Focus on the \
         main story, the central conflict and the tone of the game (dark, \
         epic, humorous, etc.). Use a direct, punchy style, like the synopsis \
         on the back cover of the game."
    )
}

/// Context-grounded template for the retrieval endpoints.
pub fn grounded_answer(context: &str, question: &str) -> String {
    format!(
        "Context:\n{context}\n\nQuestion:\n{question}\n\n\
         Answer based only on the context. If you do not have enough \
         information, say so."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn videogame_brief_embeds_the_topic() {
        let prompt = videogame_brief("Hollow Knight");
        assert!(prompt.contains("Hollow Knight"));
        assert!(prompt.contains("under 100 words"));
    }

    #[test]
    fn grounded_answer_carries_context_and_verbatim_question() {
        let prompt = grounded_answer("fact one\n\nfact two", "What is fact one?");
        assert!(prompt.contains("fact one\n\nfact two"));
        assert!(prompt.contains("What is fact one?"));
        assert!(prompt.contains("only on the context"));
    }

    #[test]
    fn grounded_answer_tolerates_empty_context() {
        let prompt = grounded_answer("", "Anything?");
        assert!(prompt.starts_with("Context:\n\n"));
        assert!(prompt.contains("Anything?"));
    }

    #[test]
    fn templates_are_deterministic() {
        assert_eq!(videogame_brief("Celeste"), videogame_brief("Celeste"));
        assert_eq!(grounded_answer("c", "q"), grounded_answer("c", "q"));
    }
}

//! Prompt construction for translation and critique

use crate::core::models::Language;

pub fn build_translation_prompt(text: &str, language: Language) -> String {
    format!(
        "Translate the following text into {}. \
         Reply with the translation only, without explanations or notes.\n\n\
         Text:\n{}",
        language.display_name(),
        text
    )
}

pub fn build_critique_prompt(original: &str, translated: &str) -> String {
    format!(
        "Evaluate the quality of the translation below. \
         Judge its accuracy and fluency, then give a rating from 1 to 10 \
         followed by a short justification.\n\n\
         Original text:\n{}\n\n\
         Translation:\n{}",
        original, translated
    )
}

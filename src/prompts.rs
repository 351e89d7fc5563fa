//! The fixed instruction prompt sent with every classification request.
//!
//! Centralising the prompt here keeps a single source of truth and lets unit
//! tests inspect it without touching the network path. The wording is part of
//! the classifier's contract: it demands a one-word `SI`/`NO` answer, which
//! [`crate::pipeline::vision::is_affirmative`] then matches exactly.

/// Instruction asking the vision model for a binary verdict on an image.
///
/// The prompt is in Spanish and constrains the answer to exactly `SI`
/// (the image depicts objects, people, landscapes or other semantic content)
/// or `NO` (only basic geometric figures or abstract patterns). Anything the
/// model answers beyond that single word is treated as "not meaningful".
pub const CLASSIFY_PROMPT: &str = "Analiza esta imagen y responde 'SI' si la imagen contiene \
    objetos, personas, paisajes u otro contenido con significado \
    semántico. Responde 'NO' si la imagen solo contiene figuras \
    geométricas básicas sin significado (como círculos, cuadrados, \
    líneas) o patrones abstractos sin contenido reconocible. \
    Responde ÚNICAMENTE con SI o NO.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_demands_one_word_answer() {
        assert!(CLASSIFY_PROMPT.contains("ÚNICAMENTE"));
        assert!(CLASSIFY_PROMPT.contains("SI"));
        assert!(CLASSIFY_PROMPT.contains("NO"));
    }
}

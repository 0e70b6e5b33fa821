use rand::Rng;

use crate::tokenize::{capitalize_first, ends_terminal};
use crate::{MagpieError, Result};

/// Longest span of consecutive tokens lifted from a single corpus item.
const MAX_SPAN: usize = 4;

/// Stitch random contiguous word spans from the tokenized corpus until the
/// output reaches `target_words` words, then dress it up as a sentence.
/// The chain is never consulted.
pub fn generate(corpus: &[Vec<String>], target_words: usize, rng: &mut impl Rng) -> Result<String> {
    if corpus.is_empty() {
        return Err(MagpieError::EmptyCorpus);
    }

    let mut output: Vec<String> = Vec::new();
    while output.len() < target_words {
        let item = &corpus[rng.gen_range(0..corpus.len())];
        let start = rng.gen_range(0..item.len());
        let span = rng.gen_range(1..=MAX_SPAN);
        let end = (start + span).min(item.len());
        output.extend(item[start..end].iter().cloned());
    }

    let mut text = capitalize_first(&output.join(" "));
    if !ends_terminal(&text) {
        text.push('.');
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn corpus(items: &[&str]) -> Vec<Vec<String>> {
        items
            .iter()
            .map(|item| item.split_whitespace().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn fails_on_empty_corpus() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate(&[], 10, &mut rng),
            Err(MagpieError::EmptyCorpus)
        ));
    }

    #[test]
    fn output_meets_target_and_looks_like_a_sentence() {
        let pool = corpus(&[
            "the quick brown fox jumps over the lazy dog",
            "never gonna give you up",
            "it was the best of times",
        ]);
        let mut rng = StdRng::seed_from_u64(42);

        let text = generate(&pool, 10, &mut rng).unwrap();
        assert!(text.split_whitespace().count() >= 10);
        assert!(text.chars().next().unwrap().is_uppercase());
        assert!(ends_terminal(&text));
    }

    #[test]
    fn spans_are_clamped_to_item_bounds() {
        // Single one-word item: every span draw collapses to that word.
        let pool = corpus(&["hi"]);
        let mut rng = StdRng::seed_from_u64(7);

        let text = generate(&pool, 3, &mut rng).unwrap();
        assert_eq!(text, "Hi hi hi.");
    }

    #[test]
    fn existing_terminal_punctuation_is_kept() {
        let pool = corpus(&["goodbye!"]);
        let mut rng = StdRng::seed_from_u64(9);

        let text = generate(&pool, 1, &mut rng).unwrap();
        assert_eq!(text, "Goodbye!");
    }

    #[test]
    fn zero_target_yields_a_bare_period() {
        let pool = corpus(&["whatever works"]);
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(generate(&pool, 0, &mut rng).unwrap(), ".");
    }
}

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::settings::{ContentType, Difficulty};

pub const DEFAULT_WORD_COUNT: usize = 50;

const SIMPLE_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "I", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what",
];

const MEDIUM_WORDS: &[&str] = &[
    "about", "which", "when", "there", "other", "were", "into", "more", "your", "than", "first",
    "some", "time", "could", "these", "two", "may", "then", "over", "like", "also", "people",
    "year", "last", "most", "out", "after", "work", "use", "no", "way", "new", "many", "such",
    "great", "think", "same", "high", "every", "being",
];

const COMPLEX_WORDS: &[&str] = &[
    "experience", "technology", "development", "consider", "government", "particular",
    "environment", "opportunity", "important", "significant", "different", "available",
    "information", "management", "understanding", "community", "performance", "knowledge",
    "generation", "organization", "quality", "structure", "authority", "individual",
    "challenge", "relationship", "university", "strategy", "beautiful", "establish",
    "necessary", "recognize",
];

/// Sentence end marks, weighted by repetition
const END_MARKS: &[char] = &['.', '.', '.', '.', ',', ',', ',', '!', '?'];

/// Produces practice text for a difficulty and content type
pub trait TextProvider {
    fn generate(&self, difficulty: Difficulty, content_type: ContentType) -> String;
}

/// Stable key for a generated text, used to find its replay record.
///
/// FNV-1a over the whole text, so texts that merely share an opening never
/// share a ghost.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextId(String);

impl TextId {
    pub fn from_text(text: &str) -> Self {
        const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0000_0100_0000_01b3;

        let hash = text
            .bytes()
            .fold(OFFSET_BASIS, |acc, b| (acc ^ u64::from(b)).wrapping_mul(PRIME));
        TextId(format!("{hash:016x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Random text drawn from built-in word pools
#[derive(Debug, Clone)]
pub struct WordListGenerator {
    word_count: usize,
}

impl Default for WordListGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_WORD_COUNT)
    }
}

impl WordListGenerator {
    pub fn new(word_count: usize) -> Self {
        Self {
            word_count: word_count.max(1),
        }
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn generate_with<R: Rng>(
        &self,
        rng: &mut R,
        difficulty: Difficulty,
        content_type: ContentType,
    ) -> String {
        let pool = word_pool(difficulty);
        let tokens: Vec<String> = (0..self.word_count)
            .map(|_| {
                if content_type.has_numbers() && rng.gen_ratio(1, 3) {
                    random_number(rng, difficulty)
                } else {
                    let word = pool.choose(rng).copied().unwrap_or("the");
                    if content_type.has_punctuation() {
                        word.to_string()
                    } else {
                        word.to_lowercase()
                    }
                }
            })
            .collect();

        if content_type.has_punctuation() {
            punctuate(rng, tokens)
        } else {
            tokens.iter().join(" ")
        }
    }
}

impl TextProvider for WordListGenerator {
    fn generate(&self, difficulty: Difficulty, content_type: ContentType) -> String {
        self.generate_with(&mut rand::thread_rng(), difficulty, content_type)
    }
}

/// Always hands out the same text, whatever the settings
#[derive(Debug, Clone)]
pub struct FixedTextProvider {
    text: String,
}

impl FixedTextProvider {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextProvider for FixedTextProvider {
    fn generate(&self, _difficulty: Difficulty, _content_type: ContentType) -> String {
        self.text.clone()
    }
}

fn word_pool(difficulty: Difficulty) -> Vec<&'static str> {
    match difficulty {
        Difficulty::Easy => SIMPLE_WORDS.to_vec(),
        Difficulty::Medium => [SIMPLE_WORDS, MEDIUM_WORDS].concat(),
        Difficulty::Hard => [SIMPLE_WORDS, MEDIUM_WORDS, COMPLEX_WORDS].concat(),
    }
}

fn random_number<R: Rng>(rng: &mut R, difficulty: Difficulty) -> String {
    match difficulty {
        Difficulty::Easy => rng.gen_range(0..100).to_string(),
        Difficulty::Medium => rng.gen_range(0..10_000).to_string(),
        Difficulty::Hard => {
            if rng.gen_bool(0.5) {
                format!("{}.{:02}", rng.gen_range(0..1_000), rng.gen_range(0..100))
            } else {
                rng.gen_range(0..100_000).to_string()
            }
        }
    }
}

/// Group tokens into sentences of 5-12 words with capitals, commas and end marks
fn punctuate<R: Rng>(rng: &mut R, tokens: Vec<String>) -> String {
    let total = tokens.len();
    let mut tokens = tokens.into_iter();
    let mut result: Vec<String> = Vec::with_capacity(total);

    while result.len() < total {
        let sentence_len = rng.gen_range(5..=12);
        let mut sentence: Vec<String> = Vec::with_capacity(sentence_len);

        for i in 0..sentence_len {
            if result.len() + sentence.len() >= total {
                break;
            }
            let Some(word) = tokens.next() else { break };

            if i == 0 {
                sentence.push(capitalize_first_letter(&word));
                continue;
            }
            if i > 2 && i < sentence_len - 1 && rng.gen_bool(0.2) {
                if let Some(last) = sentence.last_mut() {
                    last.push(',');
                }
            }
            sentence.push(word);
        }

        if let Some(last) = sentence.last_mut() {
            last.push(*END_MARKS.choose(rng).unwrap_or(&'.'));
        }
        if sentence.is_empty() {
            break;
        }
        result.extend(sentence);
    }

    result.join(" ")
}

fn capitalize_first_letter(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_text_id_is_deterministic() {
        assert_eq!(TextId::from_text("hello world"), TextId::from_text("hello world"));
        assert_eq!(TextId::from_text("").as_str(), "cbf29ce484222325");
        assert_eq!(TextId::from_text("abc").as_str().len(), 16);
    }

    #[test]
    fn test_text_id_uses_whole_text() {
        let a = "the same twenty char prefix, then one ending";
        let b = "the same twenty char prefix, then another ending";
        assert_ne!(TextId::from_text(a), TextId::from_text(b));
    }

    #[test]
    fn test_words_are_plain_lowercase() {
        let gen = WordListGenerator::new(30);
        let text = gen.generate_with(&mut rng(), Difficulty::Hard, ContentType::Words);

        assert_eq!(text.split(' ').count(), 30);
        assert!(text
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == ' '));
    }

    #[test]
    fn test_easy_draws_from_simple_pool_only() {
        let gen = WordListGenerator::new(40);
        let text = gen.generate_with(&mut rng(), Difficulty::Easy, ContentType::Words);
        let simple: Vec<String> = SIMPLE_WORDS.iter().map(|w| w.to_lowercase()).collect();
        assert!(text.split(' ').all(|w| simple.iter().any(|s| s == w)));
    }

    #[test]
    fn test_punctuation_builds_sentences() {
        let gen = WordListGenerator::new(50);
        let text = gen.generate_with(&mut rng(), Difficulty::Medium, ContentType::Punctuation);

        assert_eq!(text.split(' ').count(), 50);
        assert!(text.chars().next().unwrap().is_uppercase());
        let last = text.chars().last().unwrap();
        assert!(END_MARKS.contains(&last));
    }

    #[test]
    fn test_numbers_mix_in_digits() {
        let gen = WordListGenerator::new(60);
        let text = gen.generate_with(&mut rng(), Difficulty::Medium, ContentType::Numbers);

        assert_eq!(text.split(' ').count(), 60);
        assert!(text.chars().any(|c| c.is_ascii_digit()));
        assert!(text.chars().any(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_mixed_has_numbers_and_punctuation() {
        let gen = WordListGenerator::new(60);
        let text = gen.generate_with(&mut rng(), Difficulty::Hard, ContentType::Mixed);

        assert!(text.chars().any(|c| c.is_ascii_digit()));
        assert!(text.chars().any(|c| END_MARKS.contains(&c)));
    }

    #[test]
    fn test_generate_via_trait() {
        let provider: Box<dyn TextProvider> = Box::new(WordListGenerator::default());
        let text = provider.generate(Difficulty::Easy, ContentType::Words);
        assert_eq!(text.split(' ').count(), DEFAULT_WORD_COUNT);
    }

    #[test]
    fn test_fixed_provider_ignores_settings() {
        let provider = FixedTextProvider::new("cat");
        assert_eq!(provider.generate(Difficulty::Hard, ContentType::Mixed), "cat");
        assert_eq!(provider.generate(Difficulty::Easy, ContentType::Words), "cat");
    }

    #[test]
    fn test_word_count_is_at_least_one() {
        assert_eq!(WordListGenerator::new(0).word_count(), 1);
    }

    #[test]
    fn test_capitalize_first_letter() {
        assert_eq!(capitalize_first_letter("hello"), "Hello");
        assert_eq!(capitalize_first_letter("123abc"), "123abc");
        assert_eq!(capitalize_first_letter(""), "");
    }
}

//! Polarity scoring for entry content.
//!
//! The store never accepts a sentiment value from its caller; it asks a
//! [`SentimentScorer`] every time content is written.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Scores text polarity in `[-1.0, 1.0]`. Must be deterministic for a
/// fixed input.
pub trait SentimentScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// VADER compound score: the full valence lexicon with negation, boosters,
/// "but" shifts, capitalisation and emoji handling.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl SentimentScorer for VaderScorer {
    fn polarity(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let scores = self.analyzer.polarity_scores(text);
        scores
            .get("compound")
            .copied()
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_text_scores_zero() {
        let scorer = VaderScorer::new();
        assert_eq!(scorer.polarity("I went to the store and bought milk."), 0.0);
        assert_eq!(scorer.polarity(""), 0.0);
        assert_eq!(scorer.polarity("   \n"), 0.0);
    }

    #[test]
    fn positive_and_negative_text() {
        let scorer = VaderScorer::new();
        assert!(scorer.polarity("Today was a great day, I feel happy") > 0.5);
        assert!(scorer.polarity("Awful meeting, I am so stressed and sad") < -0.4);
    }

    #[test]
    fn words_beyond_a_small_word_list_count() {
        let scorer = VaderScorer::new();
        assert!(scorer.polarity("I feel joyful") > 0.0);
        assert!(scorer.polarity("What a terrific afternoon") > 0.0);
        assert!(scorer.polarity("The commute was dreadful") < 0.0);
    }

    #[test]
    fn negation_flips_sign() {
        let scorer = VaderScorer::new();
        assert!(scorer.polarity("good") > 0.0);
        assert!(scorer.polarity("not good") < 0.0);
    }

    #[test]
    fn deterministic_and_bounded() {
        let scorer = VaderScorer::new();
        let text = "Felt anxious in the morning but the walk was lovely and calm!!";
        let first = scorer.polarity(text);
        assert_eq!(first, scorer.polarity(text));
        assert!((-1.0..=1.0).contains(&first));
    }
}

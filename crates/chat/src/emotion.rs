//! Keyword-based emotion scoring.
//!
//! Each label owns a list of keyword substrings. A keyword counts once if it
//! appears anywhere in the lower-cased text, no matter how often. The counts
//! are then normalized into a distribution over the fixed label set.

use serde::{Serialize, Serializer, ser::SerializeMap};

/// The closed set of labels the classifier scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Question,
}

impl Emotion {
    /// All labels, in the order they are serialized.
    pub const ALL: [Emotion; 4] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Question,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Question => "question",
        }
    }

    /// Keyword substrings associated with this label (already lower-case).
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Happy => &["happy", "feliz", "genial", "excelente", ":)"],
            Self::Sad => &["triste", "mal", "deprimido", ":("],
            Self::Angry => &["enojado", "cabreado", "molesto"],
            Self::Question => &["?", "como", "qué", "por qué", "cuando", "how", "why"],
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Happy => 0,
            Self::Sad => 1,
            Self::Angry => 2,
            Self::Question => 3,
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized score per [`Emotion`].
///
/// Sums to 1.0 (within 3-decimal rounding) when any keyword matched,
/// otherwise every score is zero. Serializes as a JSON object keyed by label.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EmotionScores([f64; 4]);

impl EmotionScores {
    pub fn get(&self, emotion: Emotion) -> f64 {
        self.0[emotion.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::ALL.into_iter().map(|e| (e, self.get(e)))
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }

    /// Label with the highest score, or `None` when nothing matched.
    pub fn dominant(&self) -> Option<Emotion> {
        if self.is_zero() {
            return None;
        }
        self.iter()
            .fold(None::<(Emotion, f64)>, |best, (e, v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((e, v)),
            })
            .map(|(e, _)| e)
    }
}

impl Serialize for EmotionScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Emotion::ALL.len()))?;
        for (emotion, score) in self.iter() {
            map.serialize_entry(emotion.as_str(), &score)?;
        }
        map.end()
    }
}

/// Score `text` against the keyword table.
pub fn classify(text: &str) -> EmotionScores {
    let lowered = text.to_lowercase();

    let mut counts = [0.0_f64; 4];
    for emotion in Emotion::ALL {
        counts[emotion.index()] = emotion
            .keywords()
            .iter()
            .filter(|kw| lowered.contains(**kw))
            .count() as f64;
    }

    let sum: f64 = counts.iter().sum();
    if sum > 0.0 {
        for c in &mut counts {
            *c = round3(*c / sum);
        }
    }

    EmotionScores(counts)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[test]
    fn empty_text_scores_zero() {
        let scores = classify("");
        assert!(scores.is_zero());
        assert_eq!(scores.total(), 0.0);
        assert_eq!(scores.dominant(), None);
    }

    #[test]
    fn no_keywords_scores_zero() {
        assert!(classify("el gato duerme").is_zero());
    }

    #[test]
    fn single_label_gets_full_weight() {
        let scores = classify("Estoy muy FELIZ hoy");
        assert_eq!(scores.get(Emotion::Happy), 1.0);
        assert_eq!(scores.get(Emotion::Sad), 0.0);
        assert_eq!(scores.dominant(), Some(Emotion::Happy));
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let scores = classify("triste triste triste, genial");
        assert_eq!(scores.get(Emotion::Sad), 0.5);
        assert_eq!(scores.get(Emotion::Happy), 0.5);
    }

    #[test]
    fn substring_match_not_token_match() {
        // "malo" contains "mal".
        let scores = classify("que malo");
        assert_eq!(scores.get(Emotion::Sad), 1.0);
    }

    #[test]
    fn scores_are_rounded_to_three_decimals() {
        // happy: feliz; sad: triste; question: ?
        let scores = classify("feliz y triste?");
        assert_eq!(scores.get(Emotion::Happy), 0.333);
        assert_eq!(scores.get(Emotion::Sad), 0.333);
        assert_eq!(scores.get(Emotion::Question), 0.333);
    }

    #[rstest]
    #[case("¿Cómo estás? Estoy feliz :)")]
    #[case("how are you, why so sad")]
    #[case("enojado y molesto, ¿por qué?")]
    #[case("excelente genial happy :) triste")]
    fn matched_scores_sum_to_one(#[case] input: &str) {
        let scores = classify(input);
        assert!(!scores.is_zero());
        assert!((scores.total() - 1.0).abs() < 0.01, "total: {}", scores.total());
        assert!(scores.iter().all(|(_, v)| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn serializes_in_label_order() {
        let json = serde_json::to_string(&classify("feliz")).unwrap();
        assert_eq!(
            json,
            r#"{"happy":1.0,"sad":0.0,"angry":0.0,"question":0.0}"#
        );
    }
}

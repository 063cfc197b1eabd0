//! Named class scores

use crate::ScoreError;

/// Model scores keyed by class label, in model output order
#[derive(Debug, Clone, PartialEq)]
pub struct ClassScores {
    entries: Vec<(String, f64)>,
}

impl ClassScores {
    /// Pair labels with the leading scores. Trailing scores beyond the
    /// labelled classes are ignored; fewer scores than labels is an error.
    pub fn from_inferences<S: AsRef<str>>(
        labels: &[S],
        scores: &[f64],
    ) -> Result<Self, ScoreError> {
        if scores.len() < labels.len() {
            return Err(ScoreError::ShapeMismatch {
                expected: labels.len(),
                actual: scores.len(),
            });
        }

        let entries = labels
            .iter()
            .zip(scores)
            .map(|(label, &score)| {
                if score.is_finite() {
                    Ok((label.as_ref().to_string(), score))
                } else {
                    Err(ScoreError::NotFinite {
                        label: label.as_ref().to_string(),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    /// Highest-scoring class; the first one wins ties
    pub fn top(&self) -> Option<(&str, f64)> {
        self.entries
            .iter()
            .fold(None, |best: Option<(&str, f64)>, (name, score)| match best {
                Some((_, best_score)) if best_score >= *score => best,
                _ => Some((name.as_str(), *score)),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, score)| (name.as_str(), *score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&str; 2] = ["bicycle", "motorcycle"];

    #[test]
    fn test_labels_follow_output_order() {
        let scores = ClassScores::from_inferences(&LABELS, &[0.2, 0.8]).unwrap();
        let named: Vec<_> = scores.iter().collect();
        assert_eq!(named, vec![("bicycle", 0.2), ("motorcycle", 0.8)]);
        assert_eq!(scores.top(), Some(("motorcycle", 0.8)));
    }

    #[test]
    fn test_trailing_scores_ignored() {
        let scores = ClassScores::from_inferences(&LABELS, &[0.01, 0.97, 0.02]).unwrap();
        let named: Vec<_> = scores.iter().collect();
        assert_eq!(named, vec![("bicycle", 0.01), ("motorcycle", 0.97)]);
    }

    #[test]
    fn test_too_few_scores() {
        let err = ClassScores::from_inferences(&LABELS, &[0.9]).unwrap_err();
        assert_eq!(err, ScoreError::ShapeMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn test_non_finite_score() {
        let err = ClassScores::from_inferences(&LABELS, &[f64::NAN, 0.1]).unwrap_err();
        assert_eq!(
            err,
            ScoreError::NotFinite {
                label: "bicycle".to_string()
            }
        );
    }

    #[test]
    fn test_top_tie_keeps_first() {
        let scores = ClassScores::from_inferences(&LABELS, &[0.5, 0.5]).unwrap();
        assert_eq!(scores.top(), Some(("bicycle", 0.5)));
    }
}

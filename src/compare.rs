// src/compare.rs  —  Score copied text against what was sent
use std::fmt;
use std::time::{Duration, Instant};

/// Case-insensitive Levenshtein similarity in 0.0..=1.0
pub fn similarity(original: &str, response: &str) -> f64 {
    strsim::normalized_levenshtein(&original.to_lowercase(), &response.to_lowercase())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub original:   String,
    pub response:   String,
    pub similarity: f64,
    pub took:       Duration,
    pub tries:      u32,
}

impl Answer {
    /// Score `response`; `started` is when the line was first sent
    pub fn score(original: &str, response: &str, started: Instant, tries: u32) -> Self {
        Self {
            original:   original.to_string(),
            response:   response.to_string(),
            similarity: similarity(original, response),
            took:       started.elapsed(),
            tries,
        }
    }

    pub fn percent(&self) -> f64 { self.similarity * 100.0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Averages {
    pub percent: f64,
    pub took:    Duration,
    pub tries:   f64,
}

impl fmt::Display for Averages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Averages: {:.2}% correct | {:.2}s | {:.1} tries",
            self.percent,
            self.took.as_secs_f64(),
            self.tries,
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnswerBatch(Vec<Answer>);

impl AnswerBatch {
    pub fn push(&mut self, a: Answer) { self.0.push(a); }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Mean score, time and tries; all zero for an empty batch
    pub fn averages(&self) -> Averages {
        if self.is_empty() {
            return Averages::default();
        }
        let n = self.len();
        let percent = self.0.iter().map(Answer::percent).sum::<f64>() / n as f64;
        let took = self.0.iter().map(|a| a.took).sum::<Duration>() / n as u32;
        let tries = self.0.iter().map(|a| a.tries as f64).sum::<f64>() / n as f64;
        Averages { percent, took, tries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(sim: f64, secs: u64, tries: u32) -> Answer {
        Answer {
            original: String::new(),
            response: String::new(),
            similarity: sim,
            took: Duration::from_secs(secs),
            tries,
        }
    }

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity("cq de dd6ds", "cq de dd6ds"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(similarity("Paris", "pARIS"), 1.0);
    }

    #[test]
    fn distance_scales_by_longest() {
        // kitten -> sitting: 3 edits over 7 chars
        let s = similarity("kitten", "sitting");
        assert!((s - (1.0 - 3.0 / 7.0)).abs() < 1e-12);
        assert_eq!(similarity("abc", ""), 0.0);
        assert_eq!(similarity("", "abc"), 0.0);
    }

    #[test]
    fn one_missing_letter() {
        assert!((similarity("hello", "helo") - 0.8).abs() < 1e-12);
    }

    #[test]
    fn score_records_inputs() {
        let a = Answer::score("the", "teh", Instant::now(), 2);
        assert_eq!(a.original, "the");
        assert_eq!(a.response, "teh");
        assert_eq!(a.tries, 2);
        assert!((a.percent() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn averages_of_batch() {
        let mut b = AnswerBatch::default();
        assert_eq!(b.averages(), Averages::default());
        b.push(answer(1.0, 2, 1));
        b.push(answer(0.5, 4, 2));
        let avg = b.averages();
        assert!((avg.percent - 75.0).abs() < 1e-9);
        assert_eq!(avg.took, Duration::from_secs(3));
        assert!((avg.tries - 1.5).abs() < 1e-12);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn averages_line_format() {
        let avg = Averages { percent: 87.5, took: Duration::from_millis(2345), tries: 1.5 };
        assert_eq!(avg.to_string(), "Averages: 87.50% correct | 2.35s | 1.5 tries");
        assert_eq!(Averages::default().to_string(), "Averages: 0.00% correct | 0.00s | 0.0 tries");
    }
}

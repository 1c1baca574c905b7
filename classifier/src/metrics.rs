//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::dataset::Sentiment;

/// Counts of (expected, predicted) pairs, positive is the positive class.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positive: u64,
    pub false_positive: u64,
    pub true_negative: u64,
    pub false_negative: u64,
}

impl ConfusionMatrix {
    pub fn add(&mut self, expected: Sentiment, predicted: Sentiment) {
        match (expected, predicted) {
            (Sentiment::Positive, Sentiment::Positive) => self.true_positive += 1,
            (Sentiment::Negative, Sentiment::Positive) => self.false_positive += 1,
            (Sentiment::Negative, Sentiment::Negative) => self.true_negative += 1,
            (Sentiment::Positive, Sentiment::Negative) => self.false_negative += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    pub fn f1(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        }
    }
}

impl FromIterator<(Sentiment, Sentiment)> for ConfusionMatrix {
    fn from_iter<T: IntoIterator<Item=(Sentiment, Sentiment)>>(iter: T) -> Self {
        let mut matrix = Self::default();
        for (expected, predicted) in iter {
            matrix.add(expected, predicted);
        }
        matrix
    }
}

#[inline]
fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// The scores of a classifier on a labeled test set.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: u64,
    pub matrix: ConfusionMatrix,
}

impl From<ConfusionMatrix> for ClassificationReport {
    fn from(matrix: ConfusionMatrix) -> Self {
        Self {
            accuracy: matrix.accuracy(),
            precision: matrix.precision(),
            recall: matrix.recall(),
            f1: matrix.f1(),
            support: matrix.total(),
            matrix,
        }
    }
}

impl Display for ClassificationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Accuracy:  {:.4}", self.accuracy)?;
        writeln!(f, "Precision: {:.4}", self.precision)?;
        writeln!(f, "Recall:    {:.4}", self.recall)?;
        writeln!(f, "F1 Score:  {:.4}", self.f1)?;
        writeln!(f, "Support:   {}", self.support)?;
        write!(
            f,
            "Confusion: tp={} fp={} tn={} fn={}",
            self.matrix.true_positive,
            self.matrix.false_positive,
            self.matrix.true_negative,
            self.matrix.false_negative
        )
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;
    use crate::dataset::Sentiment::{Negative, Positive};
    use super::{ClassificationReport, ConfusionMatrix};

    #[test]
    fn scores_are_calculated() {
        let matrix: ConfusionMatrix = [
            (Positive, Positive),
            (Positive, Positive),
            (Positive, Negative),
            (Negative, Positive),
            (Negative, Negative),
        ].into_iter().collect();
        assert_eq!(2, matrix.true_positive);
        assert_eq!(1, matrix.false_negative);
        assert_eq!(1, matrix.false_positive);
        assert_eq!(1, matrix.true_negative);

        let report = ClassificationReport::from(matrix);
        assert_eq!(5, report.support);
        assert_approx_eq!(f64, 0.6, report.accuracy);
        assert_approx_eq!(f64, 2.0 / 3.0, report.precision);
        assert_approx_eq!(f64, 2.0 / 3.0, report.recall);
        assert_approx_eq!(f64, 2.0 / 3.0, report.f1);
    }

    #[test]
    fn zero_divisions_are_zero() {
        let matrix: ConfusionMatrix = [(Negative, Negative), (Negative, Negative)].into_iter().collect();
        let report = ClassificationReport::from(matrix);
        assert_approx_eq!(f64, 1.0, report.accuracy);
        assert_approx_eq!(f64, 0.0, report.precision);
        assert_approx_eq!(f64, 0.0, report.recall);
        assert_approx_eq!(f64, 0.0, report.f1);

        let empty = ClassificationReport::from(ConfusionMatrix::default());
        assert_approx_eq!(f64, 0.0, empty.accuracy);
    }

    #[test]
    fn report_is_printed() {
        let report = ClassificationReport::from(ConfusionMatrix {
            true_positive: 3,
            false_positive: 1,
            true_negative: 4,
            false_negative: 0,
        });
        let text = report.to_string();
        assert!(text.contains("Accuracy:  0.8750"), "{text}");
        assert!(text.contains("Recall:    1.0000"), "{text}");
        assert!(text.contains("tp=3 fp=1 tn=4 fn=0"), "{text}");
    }
}

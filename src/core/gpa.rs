//! Credit-weighted GPA.
//!
//! GPA = Σ(credits · grade4) / Σ(credits), rounded half-up to two decimals.
//! An empty input or zero total credits yields 0.

use crate::domain::model::GradeEntry;

/// Anything that carries a credit weight and a 4-point grade.
pub trait WeightedGrade {
    fn credits(&self) -> f64;
    fn grade4(&self) -> f64;
}

impl WeightedGrade for GradeEntry {
    fn credits(&self) -> f64 {
        GradeEntry::credits(self)
    }

    fn grade4(&self) -> f64 {
        GradeEntry::grade4(self)
    }
}

/// Bare `(credits, grade4)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditGrade {
    pub credits: f64,
    pub grade4: f64,
}

impl CreditGrade {
    pub fn new(credits: f64, grade4: f64) -> Self {
        Self { credits, grade4 }
    }
}

impl WeightedGrade for CreditGrade {
    fn credits(&self) -> f64 {
        self.credits
    }

    fn grade4(&self) -> f64 {
        self.grade4
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpaSummary {
    pub gpa: f64,
    pub total_credits: f64,
    pub entries: usize,
}

pub fn summarize<'a, T, I>(grades: I) -> GpaSummary
where
    T: WeightedGrade + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut points = 0.0;
    let mut total_credits = 0.0;
    let mut entries = 0;

    for grade in grades {
        points += grade.credits() * grade.grade4();
        total_credits += grade.credits();
        entries += 1;
    }

    let gpa = if total_credits > 0.0 {
        round2(points / total_credits)
    } else {
        0.0
    };

    GpaSummary {
        gpa,
        total_credits,
        entries,
    }
}

pub fn aggregate<'a, T, I>(grades: I) -> f64
where
    T: WeightedGrade + 'a,
    I: IntoIterator<Item = &'a T>,
{
    summarize(grades).gpa
}

/// Half away from zero; GPAs are never negative so this is half-up.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Text shown in a GPA display: `0` when there is nothing to average,
/// otherwise two decimals.
pub fn format_gpa(summary: &GpaSummary) -> String {
    if summary.total_credits > 0.0 {
        format!("{:.2}", summary.gpa)
    } else {
        "0".to_string()
    }
}

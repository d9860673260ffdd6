//! Fixed survey price tables and nearest-key lookup.

use pyo3::prelude::*;

use crate::log_debug;
use crate::models::SurveySpec;

/// One representative (question count, sample size) price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceEntry {
    pub spec: SurveySpec,
    pub price: i64,
}

/// Price table keyed by survey spec, in insertion order.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PriceTable {
    entries: Vec<PriceEntry>,
}

const MAIN_SURVEY_PRICES: [(u32, u32, i64); 8] = [
    (20, 100, 187_000),
    (40, 100, 328_000),
    (20, 300, 216_000),
    (40, 300, 382_000),
    (20, 500, 255_000),
    (40, 500, 460_000),
    (20, 1000, 372_000),
    (40, 1000, 675_000),
];

const SCREENING_PRICES: [(u32, u32, i64); 18] = [
    (5, 10_000, 100_000),
    (10, 10_000, 180_000),
    (15, 10_000, 308_000),
    (5, 20_000, 130_000),
    (10, 20_000, 220_000),
    (15, 20_000, 358_000),
    (5, 30_000, 160_000),
    (10, 30_000, 260_000),
    (15, 30_000, 408_000),
    (5, 50_000, 220_000),
    (10, 50_000, 340_000),
    (15, 50_000, 508_000),
    (5, 70_000, 280_000),
    (10, 70_000, 420_000),
    (15, 70_000, 608_000),
    (5, 100_000, 370_000),
    (10, 100_000, 540_000),
    (15, 100_000, 758_000),
];

impl PriceTable {
    pub fn from_entries(entries: impl IntoIterator<Item = (u32, u32, i64)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(questions, sample_size, price)| PriceEntry {
                    spec: SurveySpec::new(questions, sample_size),
                    price,
                })
                .collect(),
        }
    }

    /// Representative prices of the main survey.
    pub fn main_survey() -> Self {
        Self::from_entries(MAIN_SURVEY_PRICES)
    }

    /// Representative prices of the screening survey.
    pub fn screening() -> Self {
        Self::from_entries(SCREENING_PRICES)
    }

    pub fn entries(&self) -> &[PriceEntry] {
        &self.entries
    }

    /// Entry nearest to `(questions, sample_size)`, see [`lookup_price`].
    pub fn nearest(&self, questions: u32, sample_size: u32, verbosity: u8) -> Option<&PriceEntry> {
        let mut best: Option<(&PriceEntry, f64)> = None;
        for entry in &self.entries {
            let distance = spec_distance(entry.spec, questions, sample_size);
            log_debug!(
                verbosity,
                "    candidate {}x{}: distance {:.4}",
                entry.spec.questions,
                entry.spec.sample_size,
                distance
            );
            // strict comparison keeps the first of equally near keys
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((entry, distance));
            }
        }
        best.map(|(entry, _)| entry)
    }
}

#[pymethods]
impl PriceTable {
    #[new]
    fn new(entries: Vec<(u32, u32, i64)>) -> Self {
        Self::from_entries(entries)
    }

    #[staticmethod]
    #[pyo3(name = "main_survey")]
    fn py_main_survey() -> Self {
        Self::main_survey()
    }

    #[staticmethod]
    #[pyo3(name = "screening")]
    fn py_screening() -> Self {
        Self::screening()
    }

    fn __len__(&self) -> usize {
        self.entries.len()
    }

    fn __repr__(&self) -> String {
        format!("PriceTable(entries={})", self.entries.len())
    }
}

/// Squared distance with the sample-size axis scaled down by 1000.
fn spec_distance(key: SurveySpec, questions: u32, sample_size: u32) -> f64 {
    let dq = f64::from(key.questions) - f64::from(questions);
    let dn = (f64::from(key.sample_size) - f64::from(sample_size)) / 1000.0;
    dq * dq + dn * dn
}

/// Price of the table key nearest to `(questions, sample_size)`, or 0 for an
/// empty table.
///
/// Distance is `(q - tq)^2 + ((n - tn) / 1000)^2`; ties go to the key listed first.
pub fn lookup_price(table: &PriceTable, questions: u32, sample_size: u32) -> i64 {
    table
        .nearest(questions, sample_size, 0)
        .map_or(0, |entry| entry.price)
}

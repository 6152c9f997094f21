//! Declarative input/output fixtures
//!
//! A fixture names an entry point, lists literal arguments, and states the
//! literal result the entry point must produce:
//!
//! ```toml
//! [[fixture]]
//! name = "primes up to 100"
//! entry = "prime_count"
//! input = [100]
//! output = 25
//! ```
//!
//! Fixture files are TOML (default) or JSON (`.json` extension) with the
//! same shape. [`builtin_fixtures`] carries the reference scenarios.

use crate::{
    error::{Result, SegError},
    expand::expand,
    flat::Executor,
    monoid::Sum,
    segmented::{replicated_iota, segmented_iota, segmented_reduce, segmented_scan},
    sieve::{prime_count, primes},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A literal fixture value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// An integer
    Int(i64),
    /// An array of booleans
    Bools(Vec<bool>),
    /// An array of integers
    Ints(Vec<i64>),
}

impl Literal {
    /// Read as a single integer
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Literal::Int(value) => Ok(*value),
            other => Err(SegError::Fixture(format!("expected an integer, got {other}"))),
        }
    }

    /// Read as an integer array; `[]` is accepted whatever it parsed as
    pub fn as_ints(&self) -> Result<Vec<i64>> {
        match self {
            Literal::Ints(values) => Ok(values.clone()),
            Literal::Bools(values) if values.is_empty() => Ok(Vec::new()),
            other => Err(SegError::Fixture(format!(
                "expected an integer array, got {other}"
            ))),
        }
    }

    /// Read as a boolean array; `[]` is accepted whatever it parsed as
    pub fn as_bools(&self) -> Result<Vec<bool>> {
        match self {
            Literal::Bools(values) => Ok(values.clone()),
            Literal::Ints(values) if values.is_empty() => Ok(Vec::new()),
            other => Err(SegError::Fixture(format!(
                "expected a boolean array, got {other}"
            ))),
        }
    }

    /// Read as an array of non-negative counts
    pub fn as_counts(&self) -> Result<Vec<usize>> {
        self.as_ints()?
            .into_iter()
            .map(|value| {
                usize::try_from(value).map_err(|_| SegError::InvalidInput {
                    operation: "fixture",
                    reason: format!("count {value} is negative"),
                })
            })
            .collect()
    }

    /// Structural equality that treats every empty array as the same value
    pub fn matches(&self, other: &Literal) -> bool {
        match (self, other) {
            (Literal::Bools(a), Literal::Ints(b)) | (Literal::Ints(b), Literal::Bools(a)) => {
                a.is_empty() && b.is_empty()
            }
            _ => self == other,
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{json}"),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}

fn from_counts(values: Vec<usize>) -> Literal {
    Literal::Ints(values.into_iter().map(|v| v as i64).collect())
}

/// Functions a fixture can call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPoint {
    /// `primes(n)`: all primes up to and including `n`
    Primes,
    /// `prime_count(n)`: how many primes up to and including `n`
    PrimeCount,
    /// `segmented_scan(+, 0, flags, values)`
    SegmentedScanSum,
    /// `segmented_reduce(+, 0, flags, values)`
    SegmentedReduceSum,
    /// `replicated_iota(reps)`
    ReplicatedIota,
    /// `segmented_iota(flags)`
    SegmentedIota,
    /// `expand(x -> x, (x, j) -> x * j, arr)`
    ExpandScale,
}

impl EntryPoint {
    /// Every registered entry point
    pub const ALL: [EntryPoint; 7] = [
        EntryPoint::Primes,
        EntryPoint::PrimeCount,
        EntryPoint::SegmentedScanSum,
        EntryPoint::SegmentedReduceSum,
        EntryPoint::ReplicatedIota,
        EntryPoint::SegmentedIota,
        EntryPoint::ExpandScale,
    ];

    /// Name used in fixture files
    pub fn name(&self) -> &'static str {
        match self {
            EntryPoint::Primes => "primes",
            EntryPoint::PrimeCount => "prime_count",
            EntryPoint::SegmentedScanSum => "segmented_scan_sum",
            EntryPoint::SegmentedReduceSum => "segmented_reduce_sum",
            EntryPoint::ReplicatedIota => "replicated_iota",
            EntryPoint::SegmentedIota => "segmented_iota",
            EntryPoint::ExpandScale => "expand_scale",
        }
    }

    /// Argument signature, for listings
    pub fn signature(&self) -> &'static str {
        match self {
            EntryPoint::Primes => "(n: int) -> [int]",
            EntryPoint::PrimeCount => "(n: int) -> int",
            EntryPoint::SegmentedScanSum => "(flags: [bool], values: [int]) -> [int]",
            EntryPoint::SegmentedReduceSum => "(flags: [bool], values: [int]) -> [int]",
            EntryPoint::ReplicatedIota => "(reps: [int]) -> [int]",
            EntryPoint::SegmentedIota => "(flags: [bool]) -> [int]",
            EntryPoint::ExpandScale => "(arr: [int]) -> [int]",
        }
    }

    fn arity(&self) -> usize {
        match self {
            EntryPoint::SegmentedScanSum | EntryPoint::SegmentedReduceSum => 2,
            _ => 1,
        }
    }

    /// Evaluate the entry point on literal arguments
    pub fn run<E: Executor>(&self, exec: &E, args: &[Literal]) -> Result<Literal> {
        if args.len() != self.arity() {
            return Err(SegError::Fixture(format!(
                "{} expects {} argument(s), got {}",
                self.name(),
                self.arity(),
                args.len()
            )));
        }

        let sum = Sum::<i64>::new();
        let output = match self {
            EntryPoint::Primes => Literal::Ints(primes(exec, args[0].as_int()?)?),
            EntryPoint::PrimeCount => Literal::Int(prime_count(exec, args[0].as_int()?)? as i64),
            EntryPoint::SegmentedScanSum => Literal::Ints(segmented_scan(
                exec,
                &sum,
                &args[0].as_bools()?,
                &args[1].as_ints()?,
            )?),
            EntryPoint::SegmentedReduceSum => Literal::Ints(segmented_reduce(
                exec,
                &sum,
                &args[0].as_bools()?,
                &args[1].as_ints()?,
            )?),
            EntryPoint::ReplicatedIota => {
                from_counts(replicated_iota(exec, &args[0].as_counts()?)?)
            }
            EntryPoint::SegmentedIota => from_counts(segmented_iota(exec, &args[0].as_bools()?)?),
            EntryPoint::ExpandScale => {
                let arr = args[0].as_counts()?;
                from_counts(expand(exec, |&x: &usize| x, |&x, j| x * j, &arr)?)
            }
        };
        Ok(output)
    }
}

impl std::fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A named scenario: entry point, literal arguments, expected result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// Scenario name
    pub name: String,
    /// Function under test
    pub entry: EntryPoint,
    /// Literal arguments
    pub input: Vec<Literal>,
    /// Expected result
    pub output: Literal,
}

impl Fixture {
    /// Create a fixture
    pub fn new(
        name: impl Into<String>,
        entry: EntryPoint,
        input: Vec<Literal>,
        output: Literal,
    ) -> Self {
        Self {
            name: name.into(),
            entry,
            input,
            output,
        }
    }

    /// Run the fixture and compare against the expected output
    pub fn run<E: Executor>(&self, exec: &E) -> FixtureOutcome {
        match self.entry.run(exec, &self.input) {
            Ok(actual) => FixtureOutcome {
                name: self.name.clone(),
                entry: self.entry,
                passed: actual.matches(&self.output),
                expected: self.output.clone(),
                actual: Some(actual),
                error: None,
            },
            Err(err) => FixtureOutcome {
                name: self.name.clone(),
                entry: self.entry,
                passed: false,
                expected: self.output.clone(),
                actual: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Result of running one fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureOutcome {
    /// Scenario name
    pub name: String,
    /// Function under test
    pub entry: EntryPoint,
    /// Whether the actual output matched
    pub passed: bool,
    /// Expected result
    pub expected: Literal,
    /// Actual result, if the entry point returned one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Literal>,
    /// Error message, if the entry point failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FixtureFile {
    #[serde(default, rename = "fixture")]
    fixtures: Vec<Fixture>,
}

/// Parse fixtures from TOML text
pub fn parse_toml(text: &str) -> Result<Vec<Fixture>> {
    Ok(toml::from_str::<FixtureFile>(text)?.fixtures)
}

/// Parse fixtures from JSON text
pub fn parse_json(text: &str) -> Result<Vec<Fixture>> {
    Ok(serde_json::from_str::<FixtureFile>(text)?.fixtures)
}

/// Load fixtures from a file, choosing the format by extension
pub fn load_fixtures(path: &Path) -> Result<Vec<Fixture>> {
    let text = fs::read_to_string(path)?;
    let fixtures = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json(&text),
        _ => parse_toml(&text),
    }
    .map_err(|err| SegError::Fixture(format!("{}: {}", path.display(), err)))?;

    log::debug!("loaded {} fixtures from {}", fixtures.len(), path.display());
    Ok(fixtures)
}

/// Reference scenarios shipped with the library
pub fn builtin_fixtures() -> Vec<Fixture> {
    use EntryPoint::*;
    use Literal::{Bools, Int, Ints};

    vec![
        Fixture::new(
            "segmented scan restarts per segment",
            SegmentedScanSum,
            vec![
                Bools(vec![true, false, true, false, false]),
                Ints(vec![1, 2, 3, 4, 5]),
            ],
            Ints(vec![1, 3, 3, 7, 12]),
        ),
        Fixture::new(
            "segmented reduce of two segments",
            SegmentedReduceSum,
            vec![
                Bools(vec![true, false, false, true, false]),
                Ints(vec![1, 2, 3, 4, 5]),
            ],
            Ints(vec![6, 9]),
        ),
        Fixture::new(
            "segmented reduce of a single element",
            SegmentedReduceSum,
            vec![Bools(vec![true]), Ints(vec![42])],
            Ints(vec![]),
        ),
        Fixture::new(
            "replicated iota",
            ReplicatedIota,
            vec![Ints(vec![2, 3, 1])],
            Ints(vec![0, 0, 1, 1, 1, 2]),
        ),
        Fixture::new(
            "replicated iota with empty runs",
            ReplicatedIota,
            vec![Ints(vec![0, 2, 0, 1])],
            Ints(vec![1, 1, 3]),
        ),
        Fixture::new(
            "segmented iota",
            SegmentedIota,
            vec![Bools(vec![false, false, false, true, false, false, false])],
            Ints(vec![0, 1, 2, 0, 1, 2, 3]),
        ),
        Fixture::new(
            "expand scales by generator index",
            ExpandScale,
            vec![Ints(vec![2, 3, 1])],
            Ints(vec![0, 2, 0, 3, 6, 0]),
        ),
        Fixture::new(
            "primes up to 30",
            Primes,
            vec![Int(30)],
            Ints(vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]),
        ),
        Fixture::new("primes up to 100", PrimeCount, vec![Int(100)], Int(25)),
        Fixture::new("no primes below 2", PrimeCount, vec![Int(1)], Int(0)),
    ]
}

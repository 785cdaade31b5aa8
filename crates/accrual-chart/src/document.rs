// File: crates/accrual-chart/src/document.rs
// Summary: Typed model of the runs document (`compounds.json`) with order-preserving run maps.
//
// ```json
// { "initialRate": "200%", "baseRunName": "Full Duration",
//   "runs": { "Full Duration": [ { "time": 0, "v": "9000000.57077" } ] } }
// ```

use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ChartError, Result};

/// A JSON number or string, kept exactly as written.
///
/// Any other JSON value (`true`, `null`, arrays, objects) is kept in `Other`
/// and never converts to a number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl Scalar {
    /// Numeric value of a JSON number; strings are rejected.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => n.as_f64(),
            Scalar::Text(_) | Scalar::Other(_) => None,
        }
    }

    /// Numeric value of a JSON number or of a string holding a float literal.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => n.as_f64(),
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Other(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<u64> for Scalar {
    fn from(v: u64) -> Self { Scalar::Number(v.into()) }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self { Scalar::Text(v) }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self { Scalar::Text(v.to_owned()) }
}

/// One `(time, v)` point of a run. `time` is seconds since the run start.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: Scalar,
    pub v: Scalar,
}

impl Sample {
    pub fn new(time: impl Into<Scalar>, v: impl Into<Scalar>) -> Self {
        Self { time: time.into(), v: v.into() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    pub name: String,
    pub samples: Vec<Sample>,
}

/// Run name -> samples, in document order.
///
/// A repeated name keeps its first position and takes the last samples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Runs(Vec<Run>);

impl Runs {
    pub fn new() -> Self { Self(Vec::new()) }

    /// Insert or replace (in place) the samples of `name`.
    pub fn insert(&mut self, name: impl Into<String>, samples: Vec<Sample>) {
        let name = name.into();
        match self.0.iter_mut().find(|r| r.name == name) {
            Some(run) => run.samples = samples,
            None => self.0.push(Run { name, samples }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Run> {
        self.0.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Run> { self.0.iter() }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.0.iter().map(|r| r.name.as_str()) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<'a> IntoIterator for &'a Runs {
    type Item = &'a Run;
    type IntoIter = std::slice::Iter<'a, Run>;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl Serialize for Runs {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for run in &self.0 {
            map.serialize_entry(&run.name, &run.samples)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Runs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(RunsVisitor)
    }
}

struct RunsVisitor;

impl<'de> Visitor<'de> for RunsVisitor {
    type Value = Runs;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of run names to sample sequences")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Runs, A::Error> {
        let mut runs = Runs(Vec::with_capacity(access.size_hint().unwrap_or(0)));
        while let Some((name, samples)) = access.next_entry::<String, Vec<Sample>>()? {
            runs.insert(name, samples);
        }
        Ok(runs)
    }
}

/// Root of a runs document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Simulation parameter shown verbatim in the chart title.
    pub initial_rate: Scalar,
    /// Run drawn as the baseline; may name no run at all.
    pub base_run_name: String,
    #[serde(default)]
    pub runs: Runs,
}

impl Document {
    /// Read `path` whole, release the handle, then parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ChartError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn base_run(&self) -> Option<&Run> {
        self.runs.get(&self.base_run_name)
    }
}

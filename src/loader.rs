//! Reading connectome edge lists.
//!
//! An edge list is a CSV table with a header row and at least the `Source`, `Target`,
//! `Weight` and `Type` columns:
//!
//! ```text
//! Source,Target,Weight,Type
//! ADAL,ADAR,1,electrical
//! ADAL,AIBL,2,chemical
//! ```
//!
//! Other columns are ignored. The first malformed row aborts the load.

use std::{io, path::Path};

use serde::Deserialize;
use tracing::info;

use crate::{
    edge::{Edge, SynapseType},
    error::{Error, Result},
};

/// A single row of the edge list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Target")]
    pub target: String,
    #[serde(rename = "Weight")]
    pub weight: f64,
    #[serde(rename = "Type")]
    pub synapse_type: SynapseType,
}

impl Record {
    pub fn into_edge(self) -> Edge<String> {
        Edge::with_attributes(self.source, self.target, self.weight, self.synapse_type)
    }
}

/// Loads every record of the edge list at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(reader)?;
    info!(path = %path.display(), records = records.len(), "loaded edge list");

    Ok(records)
}

/// Reads every record from an in-memory or streamed edge list.
///
/// # Examples
///
/// ```
/// use wormnet::{edge::SynapseType, loader};
///
/// let csv = "Source,Target,Weight,Type\nAVAL,AVAR,4,electrical\n";
/// let records = loader::from_reader(csv.as_bytes()).unwrap();
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].synapse_type, SynapseType::Electrical);
/// ```
pub fn from_reader(reader: impl io::Read) -> Result<Vec<Record>> {
    read_records(csv::Reader::from_reader(reader))
}

fn read_records<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    for result in reader.deserialize::<Record>() {
        let record = result.map_err(|source| Error::Record {
            // Header is line 1.
            line: source
                .position()
                .map(|position| position.line())
                .unwrap_or_default(),
            source,
        })?;

        records.push(record);
    }

    Ok(records)
}

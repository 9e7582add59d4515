//! A module for working with edges.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The kind of synapse an edge represents.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SynapseType {
    /// A chemical synapse (directed signalling through neurotransmitters).
    Chemical,
    /// An electrical synapse, i.e. a gap junction.
    Electrical,
    /// Any other label found in the data, kept as is.
    Other(String),
}

impl SynapseType {
    /// Returns the canonical label of the synapse type.
    ///
    /// # Examples
    ///
    /// ```
    /// use wormnet::edge::SynapseType;
    ///
    /// assert_eq!("gap".parse::<SynapseType>().unwrap().as_str(), "electrical");
    /// assert_eq!("Chem".parse::<SynapseType>().unwrap().as_str(), "chemical");
    /// assert_eq!("muscle".parse::<SynapseType>().unwrap().as_str(), "muscle");
    /// ```
    pub fn as_str(&self) -> &str {
        match self {
            Self::Chemical => "chemical",
            Self::Electrical => "electrical",
            Self::Other(label) => label,
        }
    }
}

impl FromStr for SynapseType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();

        Ok(match label.to_ascii_lowercase().as_str() {
            "chemical" | "chem" => Self::Chemical,
            "electrical" | "gap" | "gap junction" | "gap_junction" => Self::Electrical,
            _ => Self::Other(label.to_owned()),
        })
    }
}

impl From<String> for SynapseType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(synapse_type) => synapse_type,
            Err(infallible) => match infallible {},
        }
    }
}

impl From<SynapseType> for String {
    fn from(synapse_type: SynapseType) -> Self {
        synapse_type.as_str().to_owned()
    }
}

impl fmt::Display for SynapseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed edge from `source` to `target`, carrying a weight and an optional synapse type.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<T> {
    source: T,
    target: T,
    weight: f64,
    synapse_type: Option<SynapseType>,
}

impl<T> Edge<T> {
    /// Creates a new unit weight edge between two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use wormnet::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.weight(), 1.0);
    /// assert_ne!(edge, Edge::new("b", "a"));
    /// ```
    pub fn new(source: T, target: T) -> Self {
        Self {
            source,
            target,
            weight: 1.0,
            synapse_type: None,
        }
    }

    /// Creates a new edge with the given weight and synapse type.
    pub fn with_attributes(source: T, target: T, weight: f64, synapse_type: SynapseType) -> Self {
        Self {
            source,
            target,
            weight,
            synapse_type: Some(synapse_type),
        }
    }

    /// Returns the vertex the edge starts from.
    ///
    /// # Examples
    ///
    /// ```
    /// use wormnet::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.source(), &"a");
    /// ```
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the vertex the edge points to.
    ///
    /// # Examples
    ///
    /// ```
    /// use wormnet::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.target(), &"b");
    /// ```
    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn synapse_type(&self) -> Option<&SynapseType> {
        self.synapse_type.as_ref()
    }

    /// Returns whether the edge starts and ends at the same vertex.
    pub fn is_self_loop(&self) -> bool
    where
        T: PartialEq,
    {
        self.source == self.target
    }

    /// Returns whether the edge contains the given vertex at either end.
    ///
    /// # Examples
    ///
    /// ```
    /// use wormnet::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    ///
    /// assert_eq!(edge.contains(&"a"), true);
    /// assert_eq!(edge.contains(&"b"), true);
    /// assert_eq!(edge.contains(&"c"), false);
    /// ```
    pub fn contains(&self, vertex: &T) -> bool
    where
        T: PartialEq,
    {
        self.source() == vertex || self.target() == vertex
    }

    /// Copies the attributes of `other` onto this edge, leaving its endpoints untouched.
    pub(crate) fn overwrite_attributes(&mut self, other: Edge<T>) {
        self.weight = other.weight;
        self.synapse_type = other.synapse_type;
    }
}

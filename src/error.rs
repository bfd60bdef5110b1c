//! Error types for dataset loading, validation and configuration.

use thiserror::Error;

/// Coarse classification of a [`GraphError`], used to pick the user-facing message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
	/// The dataset could not be fetched or parsed.
	DataLoad,
	/// The dataset parsed but is internally inconsistent.
	DataIntegrity,
	/// The viewer configuration was rejected.
	Config,
}

/// Top-level error type for sentiment-graph.
#[derive(Debug, Error)]
pub enum GraphError {
	/// Fetching the dataset failed (network error, non-2xx status, unreadable body).
	#[error("failed to load dataset from {origin}: {message}")]
	DataLoad {
		/// Where the dataset was being read from (URL or inline element id).
		origin: String,
		/// Underlying failure description.
		message: String,
	},

	/// The dataset document is not valid JSON or misses required fields.
	#[error("failed to parse dataset: {0}")]
	Parse(#[from] serde_json::Error),

	/// An edge references a node id that is not in the node list.
	#[error("edge {edge_index} references unknown node `{node_id}`")]
	UnknownNode {
		/// Position of the offending edge in the input sequence.
		edge_index: usize,
		/// The id that could not be resolved.
		node_id: String,
	},

	/// Two nodes share the same id.
	#[error("duplicate node id `{0}`")]
	DuplicateNode(String),

	/// Reading or writing a local file failed (offline converter).
	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),

	/// The viewer configuration failed validation.
	#[error("invalid viewer config: {0}")]
	Config(String),
}

impl GraphError {
	/// Classify this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::DataLoad { .. } | Self::Parse(_) | Self::Io(_) => ErrorKind::DataLoad,
			Self::UnknownNode { .. } | Self::DuplicateNode(_) => ErrorKind::DataIntegrity,
			Self::Config(_) => ErrorKind::Config,
		}
	}

	/// Message shown on the loading screen when initialization halts.
	pub fn user_message(&self) -> String {
		match self.kind() {
			ErrorKind::DataLoad => {
				format!("Error loading data. Please make sure the network data file exists. ({self})")
			}
			ErrorKind::DataIntegrity => format!("The network data is inconsistent: {self}"),
			ErrorKind::Config => self.to_string(),
		}
	}
}

/// Result type for sentiment-graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_errors_are_load_errors() {
		let err: GraphError = serde_json::from_str::<serde_json::Value>("{")
			.unwrap_err()
			.into();
		assert_eq!(err.kind(), ErrorKind::DataLoad);
		assert!(err.user_message().starts_with("Error loading data"));
	}

	#[test]
	fn integrity_errors_name_the_missing_node() {
		let err = GraphError::UnknownNode {
			edge_index: 3,
			node_id: "ghost".into(),
		};
		assert_eq!(err.kind(), ErrorKind::DataIntegrity);
		assert_eq!(err.to_string(), "edge 3 references unknown node `ghost`");
	}

	#[test]
	fn io_errors_are_load_errors() {
		let err: GraphError = std::io::Error::new(std::io::ErrorKind::NotFound, "rows.json").into();
		assert_eq!(err.kind(), ErrorKind::DataLoad);
		assert_eq!(err.to_string(), "i/o error: rows.json");
	}
}

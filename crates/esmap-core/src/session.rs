//! A connected search session: query in, layer out.

use serde_json::Value;
use tracing::{debug, info};

use crate::connection::ConnectionSettings;
use crate::error::{Error, Result};
use crate::layer::{load_into, LayerConfig, LoadReport};
use crate::materialize::materialize;
use crate::response::{documents_from_response, parse_query, pretty_response};
use crate::traits::{LayerSink, QueryExecutor};

pub struct Session<E> {
    settings: ConnectionSettings,
    executor: E,
    layer: LayerConfig,
}

impl<E: QueryExecutor> Session<E> {
    /// Validate `settings` and ping the cluster. Only a successful ping yields a session.
    pub fn connect(settings: ConnectionSettings, executor: E) -> Result<Self> {
        settings.validate()?;
        match executor.ping() {
            Ok(true) => {
                info!(endpoint = ?settings.endpoint(), index = %settings.index, "connected");
                Ok(Self { settings, executor, layer: LayerConfig::default() })
            }
            Ok(false) => Err(Error::ConnectionFailed("Failed to connect to Elasticsearch.".to_string())),
            Err(e) => Err(Error::ConnectionFailed(format!("{e:#}"))),
        }
    }

    pub fn with_layer_config(mut self, layer: LayerConfig) -> Self {
        self.layer = layer;
        self
    }

    pub fn status(&self) -> String {
        self.settings.connected_label()
    }

    /// Parse `query_text`, search the configured index and load the hits into `sink`.
    pub fn run_query<S: LayerSink + ?Sized>(&self, query_text: &str, sink: &mut S) -> Result<QueryOutcome> {
        let body = parse_query(query_text)?;
        debug!(index = %self.settings.index, "executing search");
        let response = self
            .executor
            .search(&self.settings.index, &body)
            .map_err(|e| Error::Query(format!("{e:#}")))?;
        let documents = documents_from_response(&response)?;
        let report = load_into(sink, materialize(&documents), &self.layer)?;
        Ok(QueryOutcome { response, report })
    }
}

#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub response: Value,
    pub report: LoadReport,
}

impl QueryOutcome {
    /// Full text shown to the user after a query: the raw response, then the load summary.
    pub fn message(&self) -> String {
        format!(
            "Query executed successfully, with response: \n\n\n{}\n{}",
            pretty_response(&self.response),
            self.report.summary()
        )
    }
}

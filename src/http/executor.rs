//! Page executor over the HTTP client
//!
//! Turns a [`QuerySpec`] into a module GET, classifies failure envelopes
//! through the taxonomy, and parses success envelopes into [`PageResult`]s
//! using the generation's layout.

use super::client::RestClient;
use crate::error::{Error, Result};
use crate::paginate::{PageExecutor, PageResult};
use crate::query::QuerySpec;
use crate::taxonomy::ErrorTaxonomy;
use crate::version::ApiVersion;
use async_trait::async_trait;
use tracing::warn;

/// [`PageExecutor`] that fetches pages over HTTP
#[derive(Debug)]
pub struct HttpPageExecutor {
    client: RestClient,
    version: ApiVersion,
    taxonomy: ErrorTaxonomy,
}

impl HttpPageExecutor {
    /// Create an executor for one protocol generation
    pub fn new(client: RestClient, version: ApiVersion) -> Self {
        Self {
            client,
            version,
            taxonomy: ErrorTaxonomy::for_version(version),
        }
    }

    /// The protocol generation this executor speaks
    pub fn version(&self) -> ApiVersion {
        self.version
    }
}

#[async_trait]
impl PageExecutor for HttpPageExecutor {
    async fn execute(&self, spec: &QuerySpec) -> Result<PageResult> {
        let params = spec.wire_parameters(self.version.limits());
        let response = self.client.get_json(&spec.module, &params).await?;

        // No content means an empty result set, not a malformed envelope.
        if response.body.is_null() && response.is_success() {
            return Ok(PageResult::default());
        }

        let layout = self.version.layout();

        // Failure envelopes ride on 2xx and 4xx alike; classify before
        // looking at the status.
        if let Some((code, message)) = layout.error_envelope(&response.body) {
            let condition = self.taxonomy.classify(&code, &message);
            warn!(
                module = %spec.module,
                code = %condition.code,
                kind = ?condition.kind,
                "API signaled failure"
            );
            return Err(Error::Api(condition));
        }

        if !response.is_success() {
            return Err(Error::http_status(response.status, response.body.to_string()));
        }

        let records = layout
            .records(&response.body)
            .cloned()
            .ok_or_else(|| Error::record_extraction(layout.records_path, "missing or not an array"))?;

        Ok(PageResult::new(records, layout.total_count(&response.body)))
    }
}

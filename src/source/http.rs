use serde_json::Value;
use tracing::debug;

use super::{Dataset, Source};
use crate::error::SourceError;
use crate::utils::encode_uri_component;

/// Studio data API over HTTP
#[derive(Debug, Clone)]
pub(crate) struct HttpSource {
    base_url: String,
}

impl HttpSource {
    pub(crate) fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn url_for(&self, dataset: Dataset, studio: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            dataset.path_name(),
            encode_uri_component(studio)
        )
    }
}

impl Source for HttpSource {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    fn fetch_raw(&self, dataset: Dataset, studio: &str) -> Result<Value, SourceError> {
        let url = self.url_for(dataset, studio);
        debug!("Fetching data from: {url}");
        let http_err = |source: ureq::Error| SourceError::Http {
            url: url.clone(),
            source: Box::new(source),
        };
        let response = ureq::get(&url).call().map_err(http_err)?;
        response.into_body().read_json::<Value>().map_err(http_err)
    }
}

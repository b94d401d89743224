use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::time::{interval, MissedTickBehavior};

use crate::error::Result;
use crate::generator::{merge_template, publish};
use crate::models::{ProxyRecord, TemplateDocument};
use crate::parser::{parse_source, ProxyFilter};
use crate::settings::Settings;
use crate::utils::http_std::SourceFetcher;
use crate::utils::string::SUFFIX_RNG;

/// Outcome of one fetch, filter, merge and publish cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    /// Number of sources attempted
    pub sources: usize,
    /// Sources that were skipped because they could not be fetched or parsed
    pub failed_sources: Vec<String>,
    /// Number of proxies in the published document
    pub proxies: usize,
    /// Whether the output file was replaced
    pub published: bool,
}

/// Runs the aggregation pipeline against a set of settings
pub struct Aggregator<F: SourceFetcher> {
    settings: Arc<Settings>,
    filter: ProxyFilter,
    apply_groups: HashSet<String>,
    fetcher: F,
}

impl<F: SourceFetcher> Aggregator<F> {
    pub fn new(settings: Arc<Settings>, fetcher: F) -> Self {
        let filter = ProxyFilter::from_settings(&settings);
        let apply_groups = settings.apply_groups.iter().cloned().collect();
        Aggregator {
            settings,
            filter,
            apply_groups,
            fetcher,
        }
    }

    async fn fetch_source(&self, url: &str) -> Result<Vec<ProxyRecord>> {
        let content = self.fetcher.fetch(url).await?;
        let document = parse_source(url, &content)?;
        Ok(self.filter.filter(&document))
    }

    /// Fetch and filter every source in order
    ///
    /// Sources that cannot be fetched or parsed are skipped with a warning;
    /// any other error aborts the collection.
    ///
    /// # Returns
    /// The concatenated proxies and the URLs that failed
    pub async fn collect_proxies(&self) -> Result<(Vec<ProxyRecord>, Vec<String>)> {
        let mut proxies = Vec::new();
        let mut failed = Vec::new();

        for url in &self.settings.source_urls {
            debug!("Fetching source {}", url);
            match self.fetch_source(url).await {
                Ok(mut kept) => {
                    info!("Found {} proxies from {}", kept.len(), url);
                    proxies.append(&mut kept);
                }
                Err(e) if e.is_source_error() => {
                    warn!("Skipping source {}: {}", url, e);
                    failed.push(url.clone());
                }
                Err(e) => return Err(e),
            }
        }

        Ok((proxies, failed))
    }

    /// Run one complete cycle
    ///
    /// Source failures are absorbed. Template and write failures abort the
    /// cycle and leave the previously published file in place.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let (proxies, failed_sources) = self.collect_proxies().await?;
        let mut report = CycleReport {
            sources: self.settings.source_urls.len(),
            failed_sources,
            ..Default::default()
        };

        if proxies.is_empty() {
            warn!(
                "No proxies found, keeping previous output. URLs: {:?}",
                self.settings.source_urls
            );
            return Ok(report);
        }

        let mut template = TemplateDocument::load(&self.settings.template_path).await?;
        let names = {
            let mut rng = SUFFIX_RNG.lock().unwrap_or_else(|e| e.into_inner());
            merge_template(&mut template, proxies, &self.apply_groups, &mut *rng)
        };
        publish(&template, &self.settings.output_path).await?;

        report.proxies = names.len();
        report.published = true;
        Ok(report)
    }

    /// Run a cycle now and then once every refresh interval, forever
    ///
    /// Cycles never overlap: a slow cycle delays the next tick.
    pub async fn run_forever(self) {
        let period = Duration::from_secs(self.settings.refresh_interval.max(1));
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match self.run_cycle().await {
                Ok(report) => info!(
                    "Cycle finished: {} proxies published={} ({} of {} sources failed)",
                    report.proxies,
                    report.published,
                    report.failed_sources.len(),
                    report.sources
                ),
                Err(e) => error!("Cycle failed, keeping previous output: {}", e),
            }
        }
    }
}

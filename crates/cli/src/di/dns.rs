use dnswatch_application::ports::{CorrelationStore, ResolutionReporter};
use dnswatch_application::use_cases::{HandleDnsQueryUseCase, RelayPolicy};
use dnswatch_domain::{Config, HostnameMatcher};
use dnswatch_infrastructure::dns::{LruCorrelationStore, RoundRobinRelay};
use dnswatch_infrastructure::reporting::WebhookReporter;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct DnsServices {
    pub handler_use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing DNS services");

        let policy = RelayPolicy::from_config(&config.dns);
        let relay = RoundRobinRelay::from_targets(
            &config.dns.upstream_servers,
            Duration::from_millis(config.dns.query_timeout),
        )
        .await?;

        let correlations: Arc<dyn CorrelationStore> =
            Arc::new(LruCorrelationStore::from_config(&config.watch));
        let matcher = HostnameMatcher::new(config.watch.patterns.iter().cloned());

        info!(
            patterns = ?config.watch.patterns.iter().map(ToString::to_string).collect::<Vec<_>>(),
            timeout_ms = policy.timeout.as_millis() as u64,
            attempts = policy.attempts,
            "Watch list loaded"
        );
        if config.dns.cache_enabled {
            info!("Answer caching is not supported; cache settings are ignored");
        }

        let mut use_case =
            HandleDnsQueryUseCase::new(Arc::new(relay), matcher, correlations, policy);

        if let Some(reporter) = Self::build_reporter(config)? {
            use_case = use_case.with_reporter(reporter);
        }

        Ok(Self {
            handler_use_case: Arc::new(use_case),
        })
    }

    fn build_reporter(config: &Config) -> anyhow::Result<Option<Arc<dyn ResolutionReporter>>> {
        let Some(url) = &config.reporting.webhook_url else {
            return Ok(None);
        };
        let reporter = WebhookReporter::new(url.clone())?;
        info!(webhook_url = %url, "Resolution webhook enabled");
        Ok(Some(Arc::new(reporter)))
    }
}

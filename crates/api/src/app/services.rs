//! Service wiring (capabilities + readiness gate) and the advise pipeline.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use shopadvisor_ai::{
    CannedTextGenerator, GeminiClient, GenerationOptions, TextGenerator,
    prompt::{build_advice_prompt, templated_advice},
};
use shopadvisor_core::{AffiliateLinkBuilder, Language, Product, ShoppingQuery, sample_products};
use shopadvisor_infra::{
    AppConfig, DocumentStore, GateState, InMemoryDocumentStore, PostgresDocumentStore, ReadinessGate,
    ServiceMode,
};

/// Where the products in a response came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductSource {
    Database,
    Sample,
}

/// Where the advice text in a response came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceSource {
    Ai,
    Template,
}

/// Readiness of one capability as reported to clients.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Ready,
    Unavailable,
    Initializing,
    Pending,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct ServicesSnapshot {
    pub ai: ServiceStatus,
    pub database: ServiceStatus,
}

/// Result of the advise pipeline (before DTO mapping).
#[derive(Debug, Clone)]
pub struct Advice {
    pub advice: String,
    pub advice_source: AdviceSource,
    pub products: Vec<Product>,
    pub product_source: ProductSource,
}

pub struct AppServices {
    gate: ReadinessGate,
    text: Arc<dyn TextGenerator>,
    store: Arc<dyn DocumentStore>,
    links: AffiliateLinkBuilder,
    generation: GenerationOptions,
    max_products: usize,
    mode: ServiceMode,
}

impl AppServices {
    pub fn new(
        text: Arc<dyn TextGenerator>,
        store: Arc<dyn DocumentStore>,
        links: AffiliateLinkBuilder,
        max_products: usize,
        mode: ServiceMode,
    ) -> Self {
        Self {
            gate: ReadinessGate::new(Arc::clone(&text), Arc::clone(&store)),
            text,
            store,
            links,
            generation: GenerationOptions::default(),
            max_products,
            mode,
        }
    }

    pub fn gate(&self) -> &ReadinessGate {
        &self.gate
    }

    pub fn links(&self) -> &AffiliateLinkBuilder {
        &self.links
    }

    pub fn mode(&self) -> ServiceMode {
        self.mode
    }

    /// Non-blocking view of both capabilities.
    pub fn snapshot(&self) -> ServicesSnapshot {
        match self.gate.state() {
            GateState::NotAttempted => ServicesSnapshot {
                ai: ServiceStatus::Pending,
                database: ServiceStatus::Pending,
            },
            GateState::Attempting => ServicesSnapshot {
                ai: ServiceStatus::Initializing,
                database: ServiceStatus::Initializing,
            },
            GateState::Completed(result) => ServicesSnapshot {
                ai: ready_or_unavailable(result.text_service_ready),
                database: ready_or_unavailable(result.store_service_ready),
            },
        }
    }

    /// Products + advice for one query, substituting fallbacks for any
    /// unavailable or failing capability.
    pub async fn advise(&self, query: &ShoppingQuery, language: Language) -> Advice {
        let readiness = self.gate.ensure_ready().await;

        let (products, product_source) = if readiness.store_service_ready {
            match self.store.find(query.filter(), self.max_products).await {
                Ok(products) => (products, ProductSource::Database),
                Err(e) => {
                    warn!(error = %e, "product lookup failed; using sample products");
                    (sample_products(), ProductSource::Sample)
                }
            }
        } else {
            debug!("document store not ready; using sample products");
            (sample_products(), ProductSource::Sample)
        };

        let (advice, advice_source) = if readiness.text_service_ready {
            let prompt = build_advice_prompt(query.text(), &products, language);
            match self.text.generate(&prompt, &self.generation).await {
                Ok(text) => (text, AdviceSource::Ai),
                Err(e) => {
                    warn!(error = %e, "text generation failed; using templated advice");
                    (templated_advice(query.text(), &products, language), AdviceSource::Template)
                }
            }
        } else {
            debug!("text generator not ready; using templated advice");
            (templated_advice(query.text(), &products, language), AdviceSource::Template)
        };

        info!(
            products = products.len(),
            product_source = ?product_source,
            advice_source = ?advice_source,
            "advice assembled"
        );

        Advice {
            advice,
            advice_source,
            products,
            product_source,
        }
    }
}

fn ready_or_unavailable(ready: bool) -> ServiceStatus {
    if ready {
        ServiceStatus::Ready
    } else {
        ServiceStatus::Unavailable
    }
}

/// Wire capabilities according to the configured [`ServiceMode`].
pub fn build_services(config: &AppConfig) -> AppServices {
    let (text, store): (Arc<dyn TextGenerator>, Arc<dyn DocumentStore>) = match config.mode {
        ServiceMode::Live => (
            Arc::new(GeminiClient::new(config.gemini.clone())),
            Arc::new(PostgresDocumentStore::new(
                config.database_url.clone(),
                config.db_connect_timeout,
            )),
        ),
        ServiceMode::Stub => {
            info!("stub mode: canned generator + in-memory demo catalog");
            (
                Arc::new(CannedTextGenerator::new()),
                Arc::new(InMemoryDocumentStore::with_demo_catalog()),
            )
        }
    };

    AppServices::new(
        text,
        store,
        AffiliateLinkBuilder::new(config.affiliate_tag.clone()),
        config.max_products,
        config.mode,
    )
}

/// Kick off initialization in the background so the first request does not pay for it.
pub fn spawn_warmup(services: Arc<AppServices>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let started = std::time::Instant::now();
        let result = services.gate().ensure_ready().await;
        info!(
            text_service_ready = result.text_service_ready,
            store_service_ready = result.store_service_ready,
            elapsed_ms = duration_ms(started.elapsed()),
            "warm-up finished"
        );
    })
}

pub(crate) fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

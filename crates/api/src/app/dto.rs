use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopadvisor_core::{AffiliateLink, AffiliateLinkBuilder, Language, Product, RequestId, sample_products};

use crate::app::services::{
    Advice, AdviceSource, ProductSource, ServiceStatus, ServicesSnapshot, duration_ms,
};
use crate::context::RequestContext;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviseRequest {
    #[serde(default)]
    pub query: String,
    pub user_id: Option<String>,
    pub language: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub affiliate_link: AffiliateLink,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviseMetadata {
    pub request_id: RequestId,
    pub query: String,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub product_source: ProductSource,
    pub advice_source: AdviceSource,
    pub services: ServicesSnapshot,
    pub processing_time_ms: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviseResponse {
    pub success: bool,
    pub advice: String,
    pub products: Vec<ProductView>,
    pub metadata: AdviseMetadata,
}

/// Request facts echoed back in metadata.
#[derive(Debug, Clone)]
pub struct EchoedRequest {
    pub query: String,
    pub language: Language,
    pub user_id: Option<String>,
}

impl AdviseResponse {
    pub fn success(
        advice: Advice,
        request: EchoedRequest,
        services: ServicesSnapshot,
        links: &AffiliateLinkBuilder,
        ctx: &RequestContext,
    ) -> Self {
        Self {
            success: true,
            advice: advice.advice,
            products: product_views(advice.products, links),
            metadata: metadata(request, advice.product_source, advice.advice_source, services, ctx),
        }
    }

    /// Static advice plus the fixed sample, for failures at the request boundary.
    pub fn degraded(
        request: EchoedRequest,
        services: ServicesSnapshot,
        links: &AffiliateLinkBuilder,
        ctx: &RequestContext,
    ) -> Self {
        Self {
            success: false,
            advice: shopadvisor_ai::prompt::static_advice(request.language).to_string(),
            products: product_views(sample_products(), links),
            metadata: metadata(request, ProductSource::Sample, AdviceSource::Template, services, ctx),
        }
    }
}

fn product_views(products: Vec<Product>, links: &AffiliateLinkBuilder) -> Vec<ProductView> {
    products
        .into_iter()
        .map(|product| ProductView {
            affiliate_link: links.link_for(&product),
            product,
        })
        .collect()
}

fn metadata(
    request: EchoedRequest,
    product_source: ProductSource,
    advice_source: AdviceSource,
    services: ServicesSnapshot,
    ctx: &RequestContext,
) -> AdviseMetadata {
    AdviseMetadata {
        request_id: ctx.request_id(),
        query: request.query,
        language: request.language,
        user_id: request.user_id,
        product_source,
        advice_source,
        services,
        processing_time_ms: duration_ms(ctx.elapsed()),
        timestamp: Utc::now(),
    }
}

#[derive(Debug, Serialize)]
pub struct HealthServices {
    pub ai: ServiceStatus,
    pub database: ServiceStatus,
    pub api: ServiceStatus,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub services: HealthServices,
    pub mode: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn new(snapshot: ServicesSnapshot, mode: &'static str) -> Self {
        Self {
            success: true,
            services: HealthServices {
                ai: snapshot.ai,
                database: snapshot.database,
                api: ServiceStatus::Ready,
            },
            mode,
            timestamp: Utc::now(),
        }
    }
}

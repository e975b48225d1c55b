//! 请求分发器
//!
//! 每个请求先等待模拟延迟，再按路由表匹配并交给处理程序，
//! 最终恰好产生一个成功信封或一个拒绝。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use crate::api::envelope::{Envelope, Latency};
use crate::api::handlers::{HandlerContext, auth_handler, collection_handler, write_handler};
use crate::api::request::{Request, RequestPath};
use crate::api::routes::{RouteKind, RouteTable, create_route_table};
use crate::config::ApiConfig;
use crate::error::Result;
use crate::observability::DispatchMetrics;
use crate::services::identity::{IdentityResolver, StoreIdentityResolver};
use crate::storage::ResourceStore;

/// 请求分发 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// 分发请求，拒绝以 `Err` 返回
    async fn dispatch(&self, request: &Request) -> Result<Envelope>;
}

/// 内存模拟后端
pub struct MockApi {
    store: Arc<ResourceStore>,
    identities: Arc<dyn IdentityResolver>,
    routes: RouteTable,
    latency: Latency,
    base_path: Option<String>,
    metrics: Arc<DispatchMetrics>,
}

impl MockApi {
    /// 使用默认身份解析器
    pub fn new(store: Arc<ResourceStore>, config: &ApiConfig) -> Self {
        let identities = Arc::new(StoreIdentityResolver::new(store.clone()));
        Self::with_identities(store, identities, config)
    }

    pub fn with_identities(
        store: Arc<ResourceStore>,
        identities: Arc<dyn IdentityResolver>,
        config: &ApiConfig,
    ) -> Self {
        Self {
            store,
            identities,
            routes: create_route_table(),
            latency: Latency::from_config(config),
            base_path: config.base_path.clone(),
            metrics: Arc::new(DispatchMetrics::new()),
        }
    }

    /// 共享指标
    pub fn with_metrics(mut self, metrics: Arc<DispatchMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn store(&self) -> &Arc<ResourceStore> {
        &self.store
    }

    pub fn metrics(&self) -> &Arc<DispatchMetrics> {
        &self.metrics
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    async fn handle(&self, request: &Request) -> Result<Envelope> {
        let path = RequestPath::parse(&request.path, self.base_path.as_deref());

        // 兜底路由保证每个方法都能命中
        let matched = self.routes.find(request.verb, &path);
        let (kind, params) = match matched {
            Some(matched) => {
                debug!("Matched route: {} {}", matched.pattern.verb(), matched.pattern.template());
                (matched.kind(), matched.params)
            }
            None => (RouteKind::Acknowledge, Vec::new()),
        };

        let ctx = HandlerContext {
            store: &self.store,
            identities: self.identities.as_ref(),
            request,
            path: &path,
            params: &params,
        };

        let payload = match kind {
            RouteKind::Login => auth_handler::login(&ctx),
            RouteKind::Register => auth_handler::register(&ctx),
            RouteKind::CurrentUser => auth_handler::current_user(&ctx).await,
            RouteKind::UserWallet => collection_handler::user_wallet(&ctx),
            RouteKind::Filtered(collection, route) => {
                collection_handler::filtered(&ctx, collection, route)
            }
            RouteKind::EntityLookup(collection) => {
                collection_handler::entity_lookup(&ctx, collection)
            }
            RouteKind::FullList(collection) => collection_handler::full_list(&ctx, collection),
            RouteKind::Acknowledge => write_handler::acknowledge(&ctx),
            RouteKind::Create => write_handler::create(&ctx),
            RouteKind::Update => write_handler::update(&ctx),
            RouteKind::Remove => write_handler::remove(&ctx),
        }?;

        Ok(Envelope::ok(payload))
    }
}

#[async_trait]
impl Dispatcher for MockApi {
    async fn dispatch(&self, request: &Request) -> Result<Envelope> {
        let span = info_span!(
            "dispatch",
            request_id = %Uuid::new_v4(),
            verb = %request.verb,
            path = %request.path,
        );

        async {
            self.latency.elapse().await;

            let outcome = self.handle(request).await;
            match &outcome {
                Ok(envelope) => self.metrics.record(envelope.status, self.latency.delay()),
                Err(err) => {
                    warn!("Request rejected: {} ({})", err, err.status());
                    self.metrics.record(err.status(), self.latency.delay());
                }
            }
            outcome
        }
        .instrument(span)
        .await
    }
}

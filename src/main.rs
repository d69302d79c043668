use std::sync::Arc;

use clap::{Parser, ValueEnum};

use product_microservices::{
    composite_router, product_router, recommendation_router, review_router, serve,
    HttpSources, InMemoryKeyValueStore, ProductCompositeService, ProductService,
    RecommendationApp, ReviewService, ServiceUtil,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ServiceKind {
    Composite,
    Product,
    Recommendation,
    Review,
}

#[derive(Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Which service to run.
    #[clap(long, value_enum)]
    service: ServiceKind,

    #[clap(long, default_value = "7000")]
    port: u16,

    /// Base URL of the product service (composite only).
    #[clap(long, default_value = "http://127.0.0.1:7001")]
    product_url: String,

    /// Base URL of the recommendation service (composite only).
    #[clap(long, default_value = "http://127.0.0.1:7002")]
    recommendation_url: String,

    /// Base URL of the review service (composite only).
    #[clap(long, default_value = "http://127.0.0.1:7003")]
    review_url: String,
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,product_microservices=debug");
    }
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();
    let service_util = ServiceUtil::new(args.port);
    let addr = format!("0.0.0.0:{}", args.port);

    let app = match args.service {
        ServiceKind::Composite => {
            let sources = HttpSources::new(
                args.product_url,
                args.recommendation_url,
                args.review_url,
            );
            let service = ProductCompositeService::new(sources, service_util.address());
            composite_router(Arc::new(service))
        }
        ServiceKind::Product => product_router(Arc::new(ProductService::new(service_util))),
        ServiceKind::Recommendation => {
            let app = RecommendationApp::new(InMemoryKeyValueStore::new(), service_util);
            recommendation_router(Arc::new(app))
        }
        ServiceKind::Review => review_router(Arc::new(ReviewService::new(service_util))),
    };

    serve(app, &addr).await
}

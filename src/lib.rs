use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod report;

use crate::config::{CorsConfig, ReportConfig};
use crate::report::VoucherReportGenerator;

/// JSON body returned alongside non-200 statuses.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable machine-readable code, e.g. `TEMPLATE_NOT_FOUND`.
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_code: &str, message: &str) -> Self {
        Self {
            error: error_code.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BAD_REQUEST", message)
    }
}

/// Process-wide state shared by all workers.
#[derive(Clone)]
pub struct AppState {
    pub config: ReportConfig,
    pub generator: Arc<VoucherReportGenerator>,
    /// Bounds the number of in-flight renders.
    pub render_slots: Arc<Semaphore>,
}

impl AppState {
    pub fn new(config: ReportConfig) -> Self {
        let generator = Arc::new(VoucherReportGenerator::new(&config));
        let render_slots = Arc::new(Semaphore::new(config.max_concurrent_reports.max(1)));
        Self {
            config,
            generator,
            render_slots,
        }
    }
}

fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(config.allowed_methods.iter().map(String::as_str))
        .allow_any_header()
        .max_age(config.max_age);
    for origin in &config.allowed_origins {
        cors = cors.allowed_origin(origin);
    }
    if config.allow_credentials {
        cors = cors.supports_credentials();
    }
    cors
}

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::report::handlers::generate_voucher_pdf,
            crate::report::handlers::health,
        ),
        components(
            schemas(
                report::models::Voucher,
                report::models::VoucherLine,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Report Service", description = "Voucher PDF rendering endpoints.")
        )
    )]
    struct ApiDoc;

    let cors_config = CorsConfig::from_env();
    let report_config = match ReportConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e:#}");
            std::process::exit(1);
        }
    };
    let bind_addr = (report_config.bind_host.clone(), report_config.bind_port);

    let app_state = web::Data::new(AppState::new(report_config));

    let prometheus = PrometheusMetricsBuilder::new("voucher_report_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    log::info!("Starting server at http://{}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        let cors = build_cors(&cors_config);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(cors)
            .app_data(app_state.clone())
            .service(
                web::scope("/api/reports")
                    .service(
                        web::resource("/voucher/pdf")
                            .route(web::post().to(report::handlers::generate_voucher_pdf)),
                    )
                    .service(
                        web::resource("/health").route(web::get().to(report::handlers::health)),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}

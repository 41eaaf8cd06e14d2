//! HTTP handlers for the report endpoints.

use actix_web::http::header::{self, ContentType};
use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};

use crate::{AppState, ErrorResponse};

use super::models::Voucher;
use super::validation;

const HEALTH_MESSAGE: &str = "Report Server is running!";

#[utoipa::path(
    context_path = "/api/reports",
    tag = "Report Service",
    post,
    path = "/voucher/pdf",
    request_body = Voucher,
    responses(
        (status = 200, description = "Rendered voucher PDF", body = Vec<u8>, content_type = "application/pdf"),
        (status = 400, description = "Voucher failed balance validation", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    )
)]
pub async fn generate_voucher_pdf(
    req: web::Json<Voucher>,
    data: web::Data<AppState>,
) -> impl Responder {
    let voucher = req.into_inner();
    info!(
        "Rendering voucher '{}' with {} line entries",
        voucher.voucher_number,
        voucher.line_entries.len()
    );

    if data.config.validate_balance {
        if let Err(message) = validation::validate_balanced(&voucher) {
            warn!("Rejected voucher '{}': {}", voucher.voucher_number, message);
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
        }
    }

    // One permit per in-flight render; the blocking pool does the actual work.
    let _permit = match data.render_slots.clone().acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => {
            error!("Render semaphore closed unexpectedly");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new("RENDER_FAILED", "rendering unavailable"));
        }
    };

    let generator = data.generator.clone();
    let render = web::block(move || generator.generate(&voucher));

    match tokio::time::timeout(data.config.render_timeout, render).await {
        Err(_) => {
            error!(
                "Voucher render timed out after {} ms",
                data.config.render_timeout.as_millis()
            );
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "RENDER_TIMEOUT",
                "report rendering timed out",
            ))
        }
        Ok(Err(blocking)) => {
            error!("Render task aborted: {blocking}");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "RENDER_FAILED",
                "report rendering was aborted",
            ))
        }
        Ok(Ok(Err(render_error))) => {
            error!(
                "Voucher render failed ({}): {render_error}",
                render_error.code()
            );
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                render_error.code(),
                "report rendering failed",
            ))
        }
        Ok(Ok(Ok(report))) => HttpResponse::Ok()
            .content_type("application/pdf")
            .append_header((
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", report.filename),
            ))
            .append_header((
                header::CACHE_CONTROL,
                "must-revalidate, post-check=0, pre-check=0",
            ))
            .body(report.pdf),
    }
}

#[utoipa::path(
    context_path = "/api/reports",
    tag = "Report Service",
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is alive", body = String, content_type = "text/plain")
    )
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(HEALTH_MESSAGE)
}

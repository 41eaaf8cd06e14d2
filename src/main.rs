#[actix_web::main]
async fn main() -> std::io::Result<()> {
    voucher_report_server::run().await
}

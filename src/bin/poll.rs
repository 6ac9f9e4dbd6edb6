pub use weekly_poll::api::handler;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    weekly_poll::setup_logging();
    lambda_runtime::run(lambda_runtime::service_fn(handler)).await
}

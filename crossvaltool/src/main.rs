#![forbid(unsafe_code)]

use crossvaltool::CrossvalError;

#[tokio::main]
async fn main() -> Result<(), CrossvalError> {
    crossvaltool::run().await
}

mod allocator;
mod app;
mod file;
mod types;
mod ui;

use crate::app::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    App::init()?.execute().await
}

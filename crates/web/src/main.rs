use std::error::Error;
use std::path::Path;

use bump_http::config::ServerConfig;
use bump_http::server::Server;
use bump_web::routes::{Repositories, router};

const ENV_FILE: &str = ".env";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = if Path::new(ENV_FILE).exists() {
        ServerConfig::from_env_file(ENV_FILE)?
    } else {
        ServerConfig::from_env()?
    };

    let repositories = Repositories::in_memory();
    let router = router(&repositories)?;

    Server::builder().router(router).config(config).build()?.start().await?;
    Ok(())
}

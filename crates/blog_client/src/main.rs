//! Demonstration client: creates one blog and reads it back.

use blog_client::{BlogClient, DEFAULT_SERVER_URL};
use clap::Parser;
use log::{error, info};

#[derive(Debug, Parser)]
#[command(name = "blog-client")]
#[command(about = "Creates a blog post and reads it back")]
struct Args {
    /// Server base URL.
    #[arg(long, env = "BLOG_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    #[arg(long, default_value = "Stephane")]
    author_id: String,

    #[arg(long, default_value = "My First Blog")]
    title: String,

    #[arg(long, default_value = "Content of the first blog")]
    content: String,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(err) = blog_core::init_logging(&args.log_level, None) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    let client = BlogClient::new(args.server);
    info!("event=client_start module=client server={}", client.base_url());

    let created = match client
        .create_blog(args.author_id, args.title, args.content)
        .await
    {
        Ok(blog) => blog,
        Err(err) => {
            error!("event=create_blog module=client status=error error={err}");
            std::process::exit(1);
        }
    };
    info!("event=create_blog module=client status=ok blog={created:?}");

    match client.read_blog(created.id.as_str()).await {
        Ok(blog) => println!("Blog was read: {blog:?}"),
        Err(err) => {
            error!("event=read_blog module=client status=error error={err}");
            std::process::exit(1);
        }
    }
}

//! 수집 워크플로우 모듈.

pub mod batch;
pub mod checkpoint;
pub mod comment_crawl;
pub mod post_crawl;
pub mod ticker_list;

pub use batch::{run_batches, run_comment_batches, run_post_batches};
pub use checkpoint::resolve_checkpoint;
pub use comment_crawl::crawl_comments;
pub use post_crawl::{crawl_posts, CrawlBound};
pub use ticker_list::{load_ticker_file, parse_ticker_lines};

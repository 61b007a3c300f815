// SPDX-License-Identifier: MIT

//! Service layer: Reddit API access, feed normalization, core reporting.

pub mod core;
pub mod feed;
pub mod reddit;

pub use self::core::CoreReporter;
pub use feed::{FeedPage, FeedService};
pub use reddit::RedditClient;

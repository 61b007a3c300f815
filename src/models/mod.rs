// SPDX-License-Identifier: MIT

//! Data models: platform-neutral wire types and raw Reddit schemas.

pub mod post;
pub mod reddit;

pub use post::{FeedResponse, Post, TokenPair};
pub use reddit::{Identity, Listing, MediaSource, Preview, PreviewImage, RawPost, TokenResponse};

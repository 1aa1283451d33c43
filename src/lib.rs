//! # Photo Tiles
//!
//! Small tools for organizing personal photos, centred on a static gallery
//! builder: give it a list of image files and it writes a single HTML page
//! of square thumbnails, each linking to the full-resolution original.
//!
//! # The Gallery Pipeline
//!
//! ```text
//! paths ─→ select ─→ per image: thumbnail + link ─→ ImageRecords ─→ render ─→ index.html
//! ```
//!
//! Everything happens sequentially and in input order. The output directory
//! is the only state: a thumbnail or alias that already exists is reused, so
//! re-running over the same photos is cheap and produces the same page.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`gallery`] | `create_page`: the whole pipeline for one output directory |
//! | [`select`] | Extension filter that picks out images from arbitrary paths |
//! | [`imaging`] | Square thumbnails through ImageMagick or the `image` crate |
//! | [`link`] | Symbolic links from the output directory to originals |
//! | [`markdown`] | Body copy rendered by pandoc or `pulldown-cmark` |
//! | [`render`] | Maud templates for the gallery and comparison pages |
//! | [`config`] | `GalleryConfig`: defaults, CLI overrides, validation |
//! | [`compress`] | Batch recompression with a user-supplied command |
//! | [`month`] | Symlink one month's photos into a folder |
//! | [`compare`] | Side-by-side page across directories, labelled by size |
//! | [`tool`] | External program invocation with typed failures |
//! | [`listing`] | Sorted directory listings shared by the batch tools |
//! | [`types`] | `ImageRecord` and `ArtifactStatus` |
//! | [`output`] | CLI progress and summary formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## External Tools Behind Traits
//!
//! ImageMagick and pandoc stay the defaults, since they are what these pages
//! have always been built with. Both sit behind a trait
//! ([`imaging::ImageBackend`], [`markdown::MarkdownRenderer`]) with an
//! in-process alternative, and every subprocess goes through
//! [`tool::ToolRunner`] with a structured argument list. A tool that is
//! missing or exits non-zero is an error, never a silently skipped image.
//!
//! ## Links, Not Copies
//!
//! Full-resolution images are published as symbolic links with absolute
//! targets. The gallery folder stays small and the originals stay where they
//! are. Moving the originals breaks the page; that trade is accepted.

pub mod compare;
pub mod compress;
pub mod config;
pub mod gallery;
pub mod imaging;
pub mod link;
pub mod listing;
pub mod logging;
pub mod markdown;
pub mod month;
pub mod output;
pub mod render;
pub mod select;
pub mod tool;
pub mod types;

//! # Catalog Pages
//!
//! A minimal static site generator for image-driven product catalogs. The
//! image directory is the data source: files named `<index>-<name>.jpg` are
//! grouped into products, listed in a markdown index, and each product gets
//! a printable HTML page with links to its neighbours.
//!
//! # Architecture
//!
//! ```text
//! README.md ─► seed ─┐
//!                    ├─► merge ─► sort + link ─► README.md, <index>.html
//! *.jpg ─► listing ──┘
//! ```
//!
//! The markdown index is both output and input: sizes and descriptions are
//! filled in by hand, and the next run reads them back before merging newly
//! scanned images. Nothing else is persisted.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | `<index>-<name>.<ext>` filename grammar, natural ordering |
//! | [`scan`] | Lists candidate image files in scan order |
//! | [`snapshot`] | Parses and renders the markdown index |
//! | [`catalog`] | Product model, merge, ordering and prev/next links |
//! | [`layout`] | Per-image height for printable pages |
//! | [`generate`] | Renders product pages with Maud, writes or deletes them |
//! | [`pipeline`] | One complete run, shared by `check` and `build` |
//! | [`config`] | `catalog.toml` loading, defaults, validation |
//! | [`output`] | CLI output formatting |

pub mod catalog;
pub mod config;
pub mod generate;
pub mod layout;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_helpers;

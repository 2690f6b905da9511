//! Report renderers for products, history and additives.
//!
//! - [`terminal`] — colored, tabular output; respects `--quiet`.

pub mod terminal;

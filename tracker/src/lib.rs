//! Personal expense tracker: a JSON-backed list of dated, categorized
//! expenses with filtering, totals and SVG charts.

pub mod backend;

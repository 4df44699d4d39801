//! Self-hosted traffic widget for Cabin-style web analytics.
//!
//! The pipeline is range → fetch → cache → derive → layout → render: a
//! logical range token becomes a concrete UTC date window, daily traffic
//! data is fetched through a TTL cache, headline ratios are derived from
//! the summary, and the chart modules turn the daily series into SVG
//! markup plus percent-positioned hit regions for tooltip placement.

pub mod api;
pub mod chart;
pub mod config;
pub mod derive;
pub mod fetch;
pub mod render;
pub mod server;

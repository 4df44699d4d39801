//! Render orchestration: one fetch, derived headline metrics, and the
//! mode-specific chart artifacts, combined into a single result the API
//! layer can serialize. Every input arrives as an explicit parameter;
//! nothing here reads ambient state.

use crate::chart::geometry::{clean_points, layout};
use crate::chart::overlay::{hit_regions, DetailEntry, HitRegion};
use crate::chart::sparkline::{self, SPARK_HEIGHT, SPARK_WIDTH};
use crate::chart::stacked;
use crate::config::DisplayMode;
use crate::derive::{headline, Headline};
use crate::fetch::client::AnalyticsClient;
use crate::fetch::range::RangeToken;
use crate::fetch::FetchError;
use serde::Serialize;

/// One widget render request, fully explicit.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub domain: &'a str,
    pub range: RangeToken,
    pub mode: DisplayMode,
    /// Trusted as-is; the host performs its own authorization before
    /// setting this.
    pub force_refresh: bool,
}

/// Mode-specific visual artifacts.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WidgetView {
    /// Trend sparkline markup. Always renderable; a short series
    /// degrades to a flat baseline inside the SVG itself.
    Sparkline { svg: String },
    /// Stacked chart markup plus its interaction artifacts.
    Chart {
        svg: String,
        regions: Vec<HitRegion>,
        details: Vec<DetailEntry>,
    },
    /// Fewer than two usable daily points. A renderable empty state,
    /// not an error.
    InsufficientData { message: String },
}

/// Complete render result for one request.
#[derive(Debug, Serialize)]
pub struct WidgetRender {
    pub domain: String,
    pub range: RangeToken,
    pub mode: DisplayMode,
    pub summary: Headline,
    pub view: WidgetView,
}

/// Run the full pipeline for one request.
pub async fn render_widget(
    client: &AnalyticsClient,
    api_key: &str,
    request: RenderRequest<'_>,
) -> Result<WidgetRender, FetchError> {
    let payload = client
        .fetch(
            api_key,
            request.domain,
            request.range,
            request.mode,
            request.force_refresh,
        )
        .await?;

    let summary = headline(&payload.summary);

    let view = match request.mode {
        DisplayMode::Sparkline => WidgetView::Sparkline {
            svg: sparkline::render(&payload.page_view_series(), SPARK_WIDTH, SPARK_HEIGHT),
        },
        DisplayMode::Chart => {
            let points = clean_points(&payload.daily_data);
            layout(&points).map_or_else(
                || WidgetView::InsufficientData {
                    message: "Not enough data to render chart.".to_string(),
                },
                |chart| {
                    let (regions, details) = hit_regions(&points, &chart);
                    WidgetView::Chart {
                        svg: stacked::render(&points, &chart),
                        regions,
                        details,
                    }
                },
            )
        }
    };

    Ok(WidgetRender {
        domain: request.domain.to_string(),
        range: request.range,
        mode: request.mode,
        summary,
        view,
    })
}

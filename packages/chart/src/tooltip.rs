//! Pointer interaction for map regions.
//!
//! [`Hover`] defines what each pointer event does to the tooltip and the
//! hovered region. [`pointer_script`] does not restate that behavior: it
//! replays the style changes [`Hover::handle`] reports, serialized as
//! [`PointerEffects`], through a generic applier in the browser. The
//! tooltip markup is pre-rendered by [`tooltip_html`] and stored on each
//! region.

use serde::Serialize;
use serde_json::{Map, Value};
use theft_map_chart_models::{RegionFeature, Rgb, TooltipConfig};

use crate::format::format_grouped;
use crate::svg::escape;

/// Placeholder shown when a region has no readable incident count.
pub const MISSING_COUNT: &str = "n/d";

/// A pointer event over a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// The pointer entered the region.
    Enter,
    /// The pointer moved within the region, at page coordinates.
    Move {
        /// Horizontal page coordinate.
        page_x: f64,
        /// Vertical page coordinate.
        page_y: f64,
    },
    /// The pointer left the region.
    Leave,
}

/// Floating tooltip state.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    /// CSS opacity.
    pub opacity: f64,
    /// CSS `left`, in pixels.
    pub left: f64,
    /// CSS `top`, in pixels.
    pub top: f64,
    /// Inner HTML.
    pub html: String,
}

/// Inline style of a region shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    /// CSS opacity.
    pub opacity: f64,
    /// Outline color.
    pub stroke: Rgb,
    /// CSS cursor, when set.
    pub cursor: Option<String>,
}

/// Inline style properties written by one pointer event, keyed by CSS
/// property name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleChanges {
    /// Properties written on the tooltip.
    pub tooltip: Map<String, Value>,
    /// Properties written on the hovered region.
    pub region: Map<String, Value>,
}

fn px(value: f64) -> Value {
    Value::String(format!("{value}px"))
}

/// Hover state of one region and the shared tooltip.
#[derive(Debug, Clone)]
pub struct Hover<'a> {
    config: &'a TooltipConfig,
    content: String,
    tooltip: TooltipState,
    shape: ShapeStyle,
}

impl<'a> Hover<'a> {
    /// Starts with a hidden tooltip and an unhovered shape outlined in
    /// `stroke`. `content` is the tooltip markup for the region.
    #[must_use]
    pub fn new(config: &'a TooltipConfig, stroke: Rgb, content: String) -> Self {
        Self {
            config,
            content,
            tooltip: TooltipState {
                opacity: 0.0,
                left: 0.0,
                top: 0.0,
                html: String::new(),
            },
            shape: ShapeStyle {
                opacity: 1.0,
                stroke,
                cursor: None,
            },
        }
    }

    /// Applies a pointer event and returns the inline style properties it
    /// wrote. The tooltip's inner HTML is content, not style, and is not
    /// reported.
    #[allow(clippy::suboptimal_flops)]
    pub fn handle(&mut self, event: PointerEvent) -> StyleChanges {
        let mut changes = StyleChanges::default();
        match event {
            PointerEvent::Enter => {
                self.tooltip.opacity = 1.0;
                self.shape.opacity = self.config.hover_opacity;
                changes.tooltip.insert("opacity".into(), self.tooltip.opacity.into());
                changes.region.insert("opacity".into(), self.shape.opacity.into());
                if let Some(cursor) = &self.config.cursor {
                    self.shape.cursor = Some(cursor.clone());
                    changes.region.insert("cursor".into(), cursor.clone().into());
                }
            }
            PointerEvent::Move { page_x, page_y } => {
                self.tooltip.html.clone_from(&self.content);
                self.tooltip.left = page_x + self.config.offset_x;
                self.tooltip.top = page_y + self.config.offset_y;
                changes.tooltip.insert("left".into(), px(self.tooltip.left));
                changes.tooltip.insert("top".into(), px(self.tooltip.top));
            }
            PointerEvent::Leave => {
                self.tooltip.opacity = 0.0;
                self.tooltip.left = 0.0;
                self.tooltip.top = 0.0;
                self.shape.stroke = self.config.leave_stroke;
                self.shape.opacity = 1.0;
                changes.tooltip.insert("opacity".into(), self.tooltip.opacity.into());
                changes.tooltip.insert("left".into(), px(self.tooltip.left));
                changes.tooltip.insert("top".into(), px(self.tooltip.top));
                changes.region.insert("stroke".into(), self.shape.stroke.to_hex().into());
                changes.region.insert("opacity".into(), self.shape.opacity.into());
            }
        }
        changes
    }

    /// Current tooltip state.
    #[must_use]
    pub const fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Current shape style.
    #[must_use]
    pub const fn shape(&self) -> &ShapeStyle {
        &self.shape
    }
}

/// The style changes the page script replays for each pointer event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointerEffects {
    /// Written when the pointer enters a region.
    pub enter: StyleChanges,
    /// Tooltip position relative to the pointer while it moves.
    pub offset: [f64; 2],
    /// Written when the pointer leaves a region.
    pub leave: StyleChanges,
}

impl PointerEffects {
    /// Records one enter/move/leave cycle of [`Hover`]. The move happens at
    /// the page origin, so the resulting tooltip position is the offset
    /// from the pointer.
    #[must_use]
    pub fn from_config(config: &TooltipConfig) -> Self {
        let mut hover = Hover::new(config, config.leave_stroke, String::new());
        let enter = hover.handle(PointerEvent::Enter);
        hover.handle(PointerEvent::Move {
            page_x: 0.0,
            page_y: 0.0,
        });
        let offset = [hover.tooltip().left, hover.tooltip().top];
        let leave = hover.handle(PointerEvent::Leave);
        Self {
            enter,
            offset,
            leave,
        }
    }
}

/// Renders the tooltip markup for `region`: its name and its
/// thousands-separated incident count.
#[must_use]
pub fn tooltip_html(region: &RegionFeature, config: &TooltipConfig) -> String {
    let count = region
        .incident_count
        .and_then(|count| i64::try_from(count).ok())
        .map_or_else(|| MISSING_COUNT.to_string(), format_grouped);

    format!(
        "<div class=\"tooltip-title\"><div><strong>{}</strong> {}</div></div>\
         <div class=\"tooltip-content\"><ul><li><strong>{}</strong> {count}</li></ul></div>",
        escape(&config.title_label),
        escape(&region.name),
        escape(&config.count_label),
    )
}

/// Browser-side applier for [`PointerEffects`].
const POINTER_SCRIPT: &str = r"(function () {
  var effects = __EFFECTS__;
  var tooltip = document.querySelector('#map .tooltip');
  if (!tooltip) {
    return;
  }
  function apply(element, changes) {
    Object.keys(changes).forEach(function (property) {
      element.style[property] = changes[property];
    });
  }
  document.querySelectorAll('#map path.region').forEach(function (region) {
    region.addEventListener('mouseover', function () {
      apply(tooltip, effects.enter.tooltip);
      apply(region, effects.enter.region);
    });
    region.addEventListener('mousemove', function (event) {
      tooltip.innerHTML = region.getAttribute('data-tooltip');
      tooltip.style.left = (event.pageX + effects.offset[0]) + 'px';
      tooltip.style.top = (event.pageY + effects.offset[1]) + 'px';
    });
    region.addEventListener('mouseleave', function () {
      apply(tooltip, effects.leave.tooltip);
      apply(region, effects.leave.region);
    });
  });
})();";

/// Serializes `effects` as a JavaScript literal that is safe to inline in
/// a `<script>` element.
fn effects_literal(effects: &PointerEffects) -> String {
    serde_json::to_string(effects)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
}

/// Returns the inline script binding the tooltip to the map regions.
#[must_use]
pub fn pointer_script(config: &TooltipConfig) -> String {
    POINTER_SCRIPT.replace(
        "__EFFECTS__",
        &effects_literal(&PointerEffects::from_config(config)),
    )
}

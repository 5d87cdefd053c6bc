//! Host maps the convenience wrappers delegate to.
//!
//! A host owns the map state: layers, controls and the view. [`HtmlDocument`] renders the state
//! as a standalone Leaflet page, [`WidgetModel`] exposes it as the JSON state of an interactive
//! widget. Any other type implementing [`MapHost`] can be wrapped instead, which is how tests
//! substitute their own hosts.

mod html;
mod widget;

pub use html::HtmlDocument;
pub use widget::{WidgetModel, DEFAULT_HEIGHT};

use crate::geo::LatLonBounds;
use crate::layer::{Control, Layer};

/// Map state the wrappers operate on.
pub trait MapHost {
    /// Adds a layer on top of the existing ones.
    fn add_layer(&mut self, layer: Layer);

    /// Attaches a control. Adding the same control twice attaches two controls.
    fn add_control(&mut self, control: Control);

    /// Fits the view to the given bounds.
    fn fit_bounds(&mut self, bounds: LatLonBounds);

    /// Layers in the order they were added.
    fn layers(&self) -> &[Layer];

    /// Controls in the order they were added.
    fn controls(&self) -> &[Control];

    /// Bounds of the last fit, if the view was fitted.
    fn view_bounds(&self) -> Option<LatLonBounds>;
}

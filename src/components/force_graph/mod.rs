//! Force-directed graph canvas.
//!
//! Renders a [`Subgraph`](crate::filter::Subgraph) on an HTML canvas with:
//! - Physics-based node positioning via `force_graph`
//! - Pan, zoom, node dragging and click selection
//! - Sentiment-colored edges that brighten on hover and selection
//!
//! # Example
//!
//! ```ignore
//! view! {
//!     <ForceGraphCanvas
//!         data=subgraph
//!         selected=selected
//!         commands=commands
//!         on_select=Callback::new(move |id| selected.set(id))
//!         fullscreen=true
//!     />
//! }
//! ```

mod component;
mod render;
mod scale;
mod state;
mod theme;

pub use component::{ForceGraphCanvas, ViewCommand};

//! Navigator Graph - egui rendering for the semantic navigator
//!
//! Paints the `DrawList` produced by `semantic_navigator::Navigator` and
//! turns pointer and keyboard input back into navigator operations.
//!
//! ```text
//! NavigatorWidget::ui()
//!   ├─ controls   (view mode, topic chips, persona + playback)
//!   ├─ Camera2D   (pan / zoom / fit)
//!   ├─ SpatialIndex (hit testing)
//!   ├─ GraphPainter (edges, nodes, labels)
//!   └─ detail card (related nodes, personas, Navigate)
//! ```

pub mod camera;
pub mod colors;
pub mod detail_card;
pub mod render;
pub mod spatial;
pub mod widget;

pub use camera::Camera2D;
pub use colors::{accent_color, parse_color_tag, DEFAULT_ACCENT};
pub use detail_card::CardAction;
pub use render::GraphPainter;
pub use spatial::{SpatialIndex, SpatialNode};
pub use widget::NavigatorWidget;

#![warn(missing_docs)]

//! Illustrative 2D schematics of a solved chamfer.
//!
//! The drawing shows the part profile with the chamfer, the axis, dimension
//! lines for `L1`, `D` and `D1`, and the chamfer angle. It can be rendered
//! as SVG or written as DXF R12.
//!
//! # Example
//!
//! ```
//! use chamfer_drafting::{Schematic, SchematicSettings};
//! use chamfer_kernel::{calculate, ChamferInput, ChamferSettings};
//!
//! let input = ChamferInput::new(Some(20.0), None, Some(45.0), Some(2.0));
//! let result = calculate(&input, &ChamferSettings::default()).unwrap();
//!
//! let schematic = Schematic::from_result(&result, &SchematicSettings::default());
//! assert!(schematic.to_svg().contains("45.0°"));
//! ```

mod dxf;
pub mod schematic;
mod svg;
mod types;

pub use schematic::{Schematic, SchematicSettings};
pub use types::{Entity, Layer, Point2D};
